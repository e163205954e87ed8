//! Parsing of `#[thrift(...)]` attributes.

use syn::{Attribute, Expr, LitInt, LitStr};

/// Struct/enum-level options.
#[derive(Default)]
pub struct ContainerAttrs {
    pub name: Option<String>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("thrift") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    result.name = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported thrift attribute, expected `name`"))
                }
            })?;
        }
        Ok(result)
    }
}

/// Field/variant-level options.
#[derive(Default)]
pub struct MemberAttrs {
    pub id: Option<i16>,
    pub required: bool,
    pub default: Option<Expr>,
    pub rename: Option<String>,
}

impl MemberAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("thrift") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    let lit: LitInt = meta.value()?.parse()?;
                    result.id = Some(lit.base10_parse::<i16>()?);
                } else if meta.path.is_ident("required") {
                    result.required = true;
                } else if meta.path.is_ident("default") {
                    result.default = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    result.rename = Some(lit.value());
                } else {
                    return Err(meta.error(
                        "unsupported thrift attribute, expected `id`, `required`, `default` or `rename`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(result)
    }
}

/// Converts a Rust identifier to the lowerCamelCase wire name.
///
/// `column_values` becomes `columnValues`, `DeleteSingle` becomes
/// `deleteSingle`.
pub fn wire_name(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = false;
    for ch in ident.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else if upper_next {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        upper_next = false;
    }
    out
}
