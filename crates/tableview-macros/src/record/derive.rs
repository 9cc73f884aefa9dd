//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_record_attrs, Kind};

/// Returns the inner type when `ty` is written as `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let last = path.path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Expression turning `place` (a reference to the field value) into a
/// `tableview::Value`.
fn value_expr(kind: Kind, place: TokenStream) -> TokenStream {
    match kind {
        Kind::Text => quote! {
            ::tableview::Value::Text(::core::convert::AsRef::<str>::as_ref(#place))
        },
        Kind::Number => quote! {
            ::tableview::Value::Number(::tableview::Number::from(*#place))
        },
        Kind::Timestamp => quote! {
            ::tableview::Value::Timestamp(::tableview::RecordTimestamp::record_timestamp(#place))
        },
        Kind::Enum => quote! {
            ::tableview::Value::Enum(::tableview::EnumValue::of(#place))
        },
        Kind::Bool => quote! {
            ::tableview::Value::Bool(*#place)
        },
    }
}

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut defs: Vec<TokenStream> = Vec::new();
    let mut arms: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_record_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }
        let Some(kind) = attr.kind else {
            continue;
        };

        let name = attr.rename.unwrap_or_else(|| ident.to_string());
        if seen.contains(&name) {
            return Err(Error::new(
                attr.span,
                format!("duplicate record field name '{name}'"),
            ));
        }
        seen.push(name.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&name));
        let doc = format!("Name of the `{name}` field.");
        constants.push(quote! {
            #[doc = #doc]
            pub const #const_name: &'static str = #name;
        });

        let variant = format_ident!("{}", kind.variant());
        defs.push(quote! {
            ::tableview::FieldDef::new(#name, ::tableview::FieldKind::#variant)
        });

        let value = if option_inner(&field.ty).is_some() {
            let present = value_expr(kind, quote! { value });
            quote! {
                match &self.#ident {
                    ::core::option::Option::Some(value) => #present,
                    ::core::option::Option::None => ::tableview::Value::None,
                }
            }
        } else {
            value_expr(kind, quote! { &self.#ident })
        };
        arms.push(quote! { #name => #value, });
    }

    let record_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::tableview::Record for #struct_name #ty_generics #where_clause {
            fn schema() -> &'static ::tableview::Schema {
                static SCHEMA: ::tableview::Schema = ::tableview::Schema::new(
                    #record_name,
                    &[#(#defs),*],
                );
                &SCHEMA
            }

            fn field_value(&self, field: &str) -> ::tableview::Value<'_> {
                match field {
                    #(#arms)*
                    _ => ::tableview::Value::None,
                }
            }
        }
    })
}

/// `createdAt` and `created_at` both become `CREATED_AT`.
fn to_screaming_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c);
            prev_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            out.push('_');
            prev_lower = false;
        } else {
            out.extend(c.to_uppercase());
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("status"), "STATUS");
        assert_eq!(to_screaming_snake_case("end_date"), "END_DATE");
        assert_eq!(to_screaming_snake_case("contractNo"), "CONTRACT_NO");
        assert_eq!(to_screaming_snake_case("unit-price"), "UNIT_PRICE");
        assert_eq!(to_screaming_snake_case("line2Total"), "LINE2_TOTAL");
    }

    #[test]
    fn detects_option_fields() {
        let plain: Type = syn::parse_quote!(String);
        let optional: Type = syn::parse_quote!(Option<f64>);
        let qualified: Type = syn::parse_quote!(std::option::Option<String>);
        assert!(option_inner(&plain).is_none());
        assert!(option_inner(&optional).is_some());
        assert!(option_inner(&qualified).is_some());
    }

    #[test]
    fn generates_schema_and_accessor() {
        let input: DeriveInput = syn::parse_quote! {
            struct Contract {
                #[record(Text)]
                customer: String,
                #[record(Number, rename = "value")]
                amount: Option<f64>,
                #[record(skip)]
                internal: u64,
                notes: String,
            }
        };
        let tokens = record_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("pub const CUSTOMER"));
        assert!(tokens.contains("pub const VALUE"));
        assert!(!tokens.contains("INTERNAL"));
        assert!(!tokens.contains("NOTES"));
        assert!(tokens.contains("\"Contract\""));
    }

    #[test]
    fn rejects_non_structs_and_duplicates() {
        let tuple: DeriveInput = syn::parse_quote! { struct Pair(u32, u32); };
        assert!(record_derive_impl(tuple).is_err());

        let enumeration: DeriveInput = syn::parse_quote! { enum Status { Open } };
        assert!(record_derive_impl(enumeration).is_err());

        let duplicate: DeriveInput = syn::parse_quote! {
            struct Row {
                #[record(Text)]
                name: String,
                #[record(Text, rename = "name")]
                label: String,
            }
        };
        let err = record_derive_impl(duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate record field name 'name'"));
    }
}
