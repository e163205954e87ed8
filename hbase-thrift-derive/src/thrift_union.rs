//! Derive macro implementation for `ThriftUnion`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use crate::attrs::{wire_name, ContainerAttrs, MemberAttrs};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "ThriftUnion cannot be derived for generic types",
        ));
    }

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "ThriftUnion can only be derived for enums",
            ))
        }
    };
    if variants.is_empty() {
        return Err(syn::Error::new(
            input.span(),
            "ThriftUnion needs at least one variant",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;
    let union_name = container.name.unwrap_or_else(|| name.to_string());

    let mut members = Vec::with_capacity(variants.len());
    for variant in variants {
        let ty = match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => &fields.unnamed[0].ty,
            _ => {
                return Err(syn::Error::new(
                    variant.span(),
                    "ThriftUnion variants must hold exactly one unnamed field",
                ))
            }
        };
        let attrs = MemberAttrs::parse(&variant.attrs)?;
        if attrs.required || attrs.default.is_some() {
            return Err(syn::Error::new(
                variant.span(),
                "union members take only `id` and `rename`",
            ));
        }
        let id = attrs.id.ok_or_else(|| {
            syn::Error::new(variant.ident.span(), "missing `#[thrift(id = N)]` on variant")
        })?;
        let wire = attrs
            .rename
            .unwrap_or_else(|| wire_name(&variant.ident.to_string()));
        members.push((id, &variant.ident, ty, wire));
    }
    members.sort_by_key(|(id, ..)| *id);
    for pair in members.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(syn::Error::new(
                pair[1].1.span(),
                format!("duplicate thrift field id {}", pair[1].0),
            ));
        }
    }

    let mut helpers = Vec::with_capacity(members.len());
    let mut specs = Vec::with_capacity(members.len());
    for (index, (id, variant, ty, wire)) in members.iter().enumerate() {
        let read_fn = format_ident!("read_member_{}", index);
        let write_fn = format_ident!("write_member_{}", index);
        let is_set_fn = format_ident!("is_set_member_{}", index);

        helpers.push(quote! {
            fn #read_fn(
                input: &mut dyn ::hbase_thrift_core::TInputProtocol,
            ) -> ::hbase_thrift_core::Result<#name> {
                <#ty as ::hbase_thrift_core::ThriftValue>::read_value(input).map(#name::#variant)
            }

            #[allow(unreachable_patterns)]
            fn #write_fn(
                value: &#name,
                output: &mut dyn ::hbase_thrift_core::TOutputProtocol,
            ) -> ::hbase_thrift_core::Result<()> {
                match value {
                    #name::#variant(inner) => {
                        ::hbase_thrift_core::ThriftValue::write_value(inner, output)
                    }
                    _ => ::std::result::Result::Ok(()),
                }
            }

            fn #is_set_fn(value: &#name) -> bool {
                ::std::matches!(value, #name::#variant(_))
            }
        });

        specs.push(quote! {
            ::hbase_thrift_core::VariantSpec {
                name: #wire,
                id: #id,
                field_type: <#ty as ::hbase_thrift_core::ThriftValue>::TTYPE,
                read: #read_fn,
                write: #write_fn,
                is_set: #is_set_fn,
            }
        });
    }

    Ok(quote! {
        const _: () = {
            #(#helpers)*

            static VARIANTS: &[::hbase_thrift_core::VariantSpec<#name>] = &[#(#specs),*];

            impl ::hbase_thrift_core::ThriftUnion for #name {
                const NAME: &'static str = #union_name;

                fn variants() -> &'static [::hbase_thrift_core::VariantSpec<Self>] {
                    VARIANTS
                }
            }

            impl ::hbase_thrift_core::ThriftValue for #name {
                const TTYPE: ::hbase_thrift_core::TType = ::hbase_thrift_core::TType::Struct;

                fn read_value(
                    input: &mut dyn ::hbase_thrift_core::TInputProtocol,
                ) -> ::hbase_thrift_core::Result<Self> {
                    ::hbase_thrift_core::read_union(input)
                }

                fn write_value(
                    &self,
                    output: &mut dyn ::hbase_thrift_core::TOutputProtocol,
                ) -> ::hbase_thrift_core::Result<()> {
                    ::hbase_thrift_core::write_union(self, output)
                }
            }
        };
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_expansion() {
        let input: DeriveInput = syn::parse_quote! {
            enum TMutation {
                #[thrift(id = 2)]
                DeleteSingle(TDelete),
                #[thrift(id = 1)]
                Put(TPut),
            }
        };
        let out = expand(&input).unwrap().to_string();
        let put = out.find("name : \"put\"").unwrap();
        let delete = out.find("name : \"deleteSingle\"").unwrap();
        assert!(put < delete);
        assert!(out.contains("read_union"));
    }

    #[test]
    fn test_struct_variant_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Bad {
                #[thrift(id = 1)]
                A { x: i32 },
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_required_member_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Bad {
                #[thrift(id = 1, required)]
                A(i32),
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_struct_input_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct NotAnEnum {
                a: i32,
            }
        };
        assert!(expand(&input).is_err());
    }
}
