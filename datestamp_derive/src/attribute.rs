use crate::err;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Path, Result, Token};

enum TimeFormatAttr {
    Layout(LitStr),
}

impl TimeFormatAttr {
    fn new(nested: &Meta) -> Result<Self> {
        let path = path_ident_string(nested.path(), &nested)?;
        match path.as_str() {
            "layout" => match nested {
                Meta::NameValue(name_value) => {
                    let expr = &name_value.value;
                    match expr {
                        Expr::Lit(ExprLit {
                            lit: Lit::Str(v), ..
                        }) => {
                            if v.value().is_empty() {
                                return err(v, "layout must not be empty");
                            }
                            Ok(Self::Layout(v.clone()))
                        }
                        _ => err(&expr, "expected string e.g. \"2006-01-02\""),
                    }
                }
                _ => err(&nested, "expected name value"),
            },
            _ => err(&nested, "unknown attribute"),
        }
    }

    fn apply(self, attrs: &mut TimeFormatAttrs, nested: &Meta) -> Result<()> {
        match self {
            Self::Layout(layout) => {
                if attrs.layout.is_some() {
                    return err(nested, "duplicate");
                }
                attrs.layout = Some(layout);
                Ok(())
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct TimeFormatAttrs {
    layout: Option<LitStr>,
}

impl TimeFormatAttrs {
    pub fn layout(&self) -> Option<&LitStr> {
        self.layout.as_ref()
    }

    pub fn parse_derive(attrs: &[Attribute]) -> Result<Self> {
        let mut ret = Self::default();
        for attr in attrs {
            let path = path_ident_string(attr.path(), attr)?;
            if path.as_str() != "time_format" {
                continue; // Ignore all other attributes.
            }

            let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
            for nested in nested {
                TimeFormatAttr::new(&nested)?.apply(&mut ret, &nested)?;
            }
        }
        Ok(ret)
    }
}

fn path_ident_string(path: &Path, spanned: &impl Spanned) -> Result<String> {
    if let Some(path) = path.get_ident() {
        Ok(path.to_string())
    } else {
        err(spanned, "expected ident")
    }
}
