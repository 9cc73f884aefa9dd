//! Parsing of `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result, Token,
};

const KINDS: &str = "Text, Number, Timestamp, Enum, Bool";

/// Kind of an exposed field, mirrored by `tableview::FieldKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Number,
    Timestamp,
    Enum,
    Bool,
}

impl Kind {
    fn parse(name: &str, span: Span) -> Result<Self> {
        match name {
            "Text" | "text" | "String" | "string" => Ok(Kind::Text),
            "Number" | "number" => Ok(Kind::Number),
            "Timestamp" | "timestamp" | "Date" | "date" => Ok(Kind::Timestamp),
            "Enum" | "enum" | "enumeration" => Ok(Kind::Enum),
            "Bool" | "bool" | "boolean" => Ok(Kind::Bool),
            other => Err(Error::new(
                span,
                format!("unknown record field kind '{other}', expected one of: {KINDS}"),
            )),
        }
    }

    pub fn variant(self) -> &'static str {
        match self {
            Kind::Text => "Text",
            Kind::Number => "Number",
            Kind::Timestamp => "Timestamp",
            Kind::Enum => "Enum",
            Kind::Bool => "Bool",
        }
    }
}

/// Options from one `#[record(...)]` attribute.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    pub kind: Option<Kind>,
    pub skip: bool,
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: None,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

fn string_value(value: &Expr, key: &str) -> Result<LitStr> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{key} must be a string literal"),
        )),
    }
}

impl RecordAttr {
    fn set_kind(&mut self, kind: Kind, span: Span) -> Result<()> {
        if self.kind.is_some() {
            return Err(Error::new(span, "record field kind given twice"));
        }
        self.kind = Some(kind);
        self.span = span;
        Ok(())
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();
        let items: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in items {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => attr.skip = true,
                Meta::Path(path) => {
                    let ident: &Ident = path.get_ident().ok_or_else(|| {
                        Error::new(path.span(), format!("expected {KINDS} or skip"))
                    })?;
                    let kind = Kind::parse(&ident.to_string(), ident.span())?;
                    attr.set_kind(kind, ident.span())?;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("ty") => {
                    let lit = string_value(&nv.value, "ty")?;
                    attr.set_kind(Kind::parse(&lit.value(), lit.span())?, lit.span())?;
                }
                Meta::NameValue(nv) => {
                    return Err(Error::new(
                        nv.path.span(),
                        "unknown record option, expected rename or ty",
                    ));
                }
                Meta::List(list) => {
                    return Err(Error::new(
                        list.span(),
                        format!("unexpected list; expected {KINDS}, skip, rename = \"...\" or ty = \"...\""),
                    ));
                }
            }
        }

        if attr.skip && (attr.kind.is_some() || attr.rename.is_some()) {
            return Err(Error::new(
                attr.span,
                "skip cannot be combined with a kind or rename",
            ));
        }

        Ok(attr)
    }
}

/// Reads the `#[record(...)]` attribute of a field, if any.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut found = attrs.iter().filter(|attr| attr.path().is_ident("record"));
    let Some(first) = found.next() else {
        return Ok(RecordAttr::default());
    };
    if let Some(extra) = found.next() {
        return Err(Error::new(
            extra.span(),
            "only one #[record(...)] attribute is allowed per field",
        ));
    }
    first.parse_args::<RecordAttr>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn kinds() {
        assert_eq!(parse("Text").unwrap().kind, Some(Kind::Text));
        assert_eq!(parse("String").unwrap().kind, Some(Kind::Text));
        assert_eq!(parse("Number").unwrap().kind, Some(Kind::Number));
        assert_eq!(parse("Timestamp").unwrap().kind, Some(Kind::Timestamp));
        assert_eq!(parse("Enum").unwrap().kind, Some(Kind::Enum));
        assert_eq!(parse("Bool").unwrap().kind, Some(Kind::Bool));
    }

    #[test]
    fn keyword_kinds_through_ty() {
        assert_eq!(parse(r#"ty = "enum""#).unwrap().kind, Some(Kind::Enum));
        assert_eq!(parse(r#"ty = "bool""#).unwrap().kind, Some(Kind::Bool));
    }

    #[test]
    fn skip() {
        let attr = parse("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn rename() {
        let attr = parse(r#"Text, rename = "customer_name""#).unwrap();
        assert_eq!(attr.kind, Some(Kind::Text));
        assert_eq!(attr.rename.as_deref(), Some("customer_name"));
    }

    #[test]
    fn errors() {
        let err = parse("Money").unwrap_err();
        assert!(err.to_string().contains("unknown record field kind 'Money'"));

        let err = parse("Text, Number").unwrap_err();
        assert!(err.to_string().contains("given twice"));

        let err = parse("skip, Text").unwrap_err();
        assert!(err.to_string().contains("skip cannot be combined"));

        let err = parse("rename = 3").unwrap_err();
        assert!(err.to_string().contains("rename must be a string literal"));

        assert!(parse(r#"label = "x""#).is_err());
    }

    #[test]
    fn attribute_lookup() {
        let input: syn::DeriveInput = syn::parse_quote! {
            struct Invoice {
                #[serde(default)]
                #[record(Number)]
                amount: f64,
                note: String,
            }
        };
        let syn::Data::Struct(data) = input.data else {
            panic!("expected a struct");
        };
        let fields: Vec<&syn::Field> = data.fields.iter().collect();

        let attr = parse_record_attrs(&fields[0].attrs).unwrap();
        assert_eq!(attr.kind, Some(Kind::Number));
        assert_eq!(parse_record_attrs(&fields[1].attrs).unwrap().kind, None);
    }
}
