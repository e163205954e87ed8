//! Derive macro implementation for `ThriftStruct`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Expr, Fields, GenericArgument, Ident, PathArguments, Type};

use crate::attrs::{wire_name, ContainerAttrs, MemberAttrs};

enum Kind {
    Required,
    Optional,
    Defaulted(Expr),
    Default,
}

struct FieldInfo<'a> {
    ident: &'a Ident,
    id: i16,
    name: String,
    value_ty: &'a Type,
    kind: Kind,
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "ThriftStruct cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "ThriftStruct only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "ThriftStruct can only be derived for structs",
            ))
        }
    };

    let container = ContainerAttrs::parse(&input.attrs)?;
    let struct_name = container.name.unwrap_or_else(|| name.to_string());

    let mut infos = Vec::with_capacity(fields.len());
    for field in fields {
        infos.push(field_info(field)?);
    }
    infos.sort_by_key(|info| info.id);
    for pair in infos.windows(2) {
        if pair[0].id == pair[1].id {
            return Err(syn::Error::new(
                pair[1].ident.span(),
                format!(
                    "duplicate thrift field id {} (also used by `{}`)",
                    pair[1].id, pair[0].ident
                ),
            ));
        }
    }

    let mut helpers = Vec::with_capacity(infos.len());
    let mut specs = Vec::with_capacity(infos.len());
    for info in &infos {
        let (helper, spec) = field_tokens(name, info);
        helpers.push(helper);
        specs.push(spec);
    }

    Ok(quote! {
        const _: () = {
            #(#helpers)*

            static FIELDS: &[::hbase_thrift_core::FieldSpec<#name>] = &[#(#specs),*];

            impl ::hbase_thrift_core::ThriftStruct for #name {
                const NAME: &'static str = #struct_name;

                fn fields() -> &'static [::hbase_thrift_core::FieldSpec<Self>] {
                    FIELDS
                }
            }

            impl ::hbase_thrift_core::ThriftValue for #name {
                const TTYPE: ::hbase_thrift_core::TType = ::hbase_thrift_core::TType::Struct;

                fn read_value(
                    input: &mut dyn ::hbase_thrift_core::TInputProtocol,
                ) -> ::hbase_thrift_core::Result<Self> {
                    ::hbase_thrift_core::read_struct(input)
                }

                fn write_value(
                    &self,
                    output: &mut dyn ::hbase_thrift_core::TOutputProtocol,
                ) -> ::hbase_thrift_core::Result<()> {
                    ::hbase_thrift_core::write_struct(self, output)
                }
            }
        };
    })
}

fn field_info(field: &syn::Field) -> syn::Result<FieldInfo<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
    let attrs = MemberAttrs::parse(&field.attrs)?;
    let id = attrs.id.ok_or_else(|| {
        syn::Error::new(ident.span(), "missing `#[thrift(id = N)]` on field")
    })?;
    let name = attrs
        .rename
        .unwrap_or_else(|| wire_name(&ident.to_string()));

    let option_inner = option_inner(&field.ty);
    let (value_ty, kind) = match (option_inner, attrs.required, attrs.default) {
        (Some(inner), false, None) => (inner, Kind::Optional),
        (Some(_), _, _) => {
            return Err(syn::Error::new(
                field.ty.span(),
                "`Option` fields are optional and cannot be `required` or have a `default`",
            ))
        }
        (None, true, Some(_)) => {
            return Err(syn::Error::new(
                ident.span(),
                "a field cannot be both `required` and `default`",
            ))
        }
        (None, true, None) => (&field.ty, Kind::Required),
        (None, false, Some(expr)) => (&field.ty, Kind::Defaulted(expr)),
        (None, false, None) => (&field.ty, Kind::Default),
    };

    Ok(FieldInfo {
        ident,
        id,
        name,
        value_ty,
        kind,
    })
}

/// Returns `T` if the type is `Option<T>` (matched on the last path segment).
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

fn field_tokens(name: &Ident, info: &FieldInfo<'_>) -> (TokenStream, TokenStream) {
    let ident = info.ident;
    let ty = info.value_ty;
    let id = info.id;
    let wire = &info.name;
    let span = ty.span();

    let read_fn = format_ident!("read_{}", ident);
    let write_fn = format_ident!("write_{}", ident);
    let is_set_fn = format_ident!("is_set_{}", ident);

    let (requiredness, read_body, write_body, is_set_body) = match &info.kind {
        Kind::Optional => (
            quote!(Optional),
            quote_spanned! {span=>
                value.#ident = ::std::option::Option::Some(
                    <#ty as ::hbase_thrift_core::ThriftValue>::read_value(input)?,
                );
            },
            quote_spanned! {span=>
                match &value.#ident {
                    ::std::option::Option::Some(inner) => {
                        ::hbase_thrift_core::ThriftValue::write_value(inner, output)
                    }
                    ::std::option::Option::None => ::std::result::Result::Ok(()),
                }
            },
            quote!(value.#ident.is_some()),
        ),
        Kind::Defaulted(default) => (
            quote!(Defaulted),
            read_assign(ident, ty, span),
            write_plain(ident, span),
            quote_spanned! {default.span()=> value.#ident != #default },
        ),
        Kind::Required => (
            quote!(Required),
            read_assign(ident, ty, span),
            write_plain(ident, span),
            quote!(true),
        ),
        Kind::Default => (
            quote!(Default),
            read_assign(ident, ty, span),
            write_plain(ident, span),
            quote!(true),
        ),
    };

    let helpers = quote! {
        fn #read_fn(
            value: &mut #name,
            input: &mut dyn ::hbase_thrift_core::TInputProtocol,
        ) -> ::hbase_thrift_core::Result<()> {
            #read_body
            ::std::result::Result::Ok(())
        }

        fn #write_fn(
            value: &#name,
            output: &mut dyn ::hbase_thrift_core::TOutputProtocol,
        ) -> ::hbase_thrift_core::Result<()> {
            #write_body
        }

        #[allow(unused_variables)]
        fn #is_set_fn(value: &#name) -> bool {
            #is_set_body
        }
    };

    let spec = quote! {
        ::hbase_thrift_core::FieldSpec {
            name: #wire,
            id: #id,
            field_type: <#ty as ::hbase_thrift_core::ThriftValue>::TTYPE,
            requiredness: ::hbase_thrift_core::Requiredness::#requiredness,
            read: #read_fn,
            write: #write_fn,
            is_set: #is_set_fn,
        }
    };

    (helpers, spec)
}

fn read_assign(ident: &Ident, ty: &Type, span: proc_macro2::Span) -> TokenStream {
    quote_spanned! {span=>
        value.#ident = <#ty as ::hbase_thrift_core::ThriftValue>::read_value(input)?;
    }
}

fn write_plain(ident: &Ident, span: proc_macro2::Span) -> TokenStream {
    quote_spanned! {span=>
        ::hbase_thrift_core::ThriftValue::write_value(&value.#ident, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: DeriveInput) -> String {
        match expand(&input) {
            Ok(tokens) => tokens.to_string(),
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_fields_sorted_by_id() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample {
                #[thrift(id = 2)]
                second: Option<i32>,
                #[thrift(id = 1, required)]
                first: ::bytes::Bytes,
            }
        };
        let out = expand_str(input);
        let first = out.find("name : \"first\"").unwrap();
        let second = out.find("name : \"second\"").unwrap();
        assert!(first < second);
        assert!(out.contains("Requiredness :: Required"));
        assert!(out.contains("Requiredness :: Optional"));
    }

    #[test]
    fn test_struct_name_override() {
        let input: DeriveInput = syn::parse_quote! {
            #[thrift(name = "TResult_")]
            struct TResult {
                #[thrift(id = 1)]
                row: Option<::bytes::Bytes>,
            }
        };
        assert!(expand_str(input).contains("\"TResult_\""));
    }

    #[test]
    fn test_default_expression_used_for_is_set() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample {
                #[thrift(id = 3, default = 1)]
                amount: i64,
            }
        };
        let out = expand_str(input);
        assert!(out.contains("Requiredness :: Defaulted"));
        assert!(out.contains("value . amount != 1"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample {
                #[thrift(id = 1)]
                a: i32,
                #[thrift(id = 1)]
                b: i32,
            }
        };
        let err = expand(&input).unwrap_err();
        assert!(err.to_string().contains("duplicate thrift field id 1"));
    }

    #[test]
    fn test_missing_id_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample {
                a: i32,
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_optional_required_conflict_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample {
                #[thrift(id = 1, required)]
                a: Option<i32>,
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_generic_struct_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Sample<T> {
                #[thrift(id = 1)]
                a: T,
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_option_detection() {
        let ty: Type = syn::parse_quote!(std::option::Option<Vec<u8>>);
        assert!(option_inner(&ty).is_some());
        let ty: Type = syn::parse_quote!(Vec<Option<u8>>);
        assert!(option_inner(&ty).is_none());
    }
}
