//! `#[dto(...)]` attribute parsing

use syn::{Attribute, Field, Ident, LitStr, Result};

/// Collection flavor override for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    List,
    Collection,
    Enumerable,
}

impl Flavor {
    pub fn variant(self) -> &'static str {
        match self {
            Flavor::List => "List",
            Flavor::Collection => "Collection",
            Flavor::Enumerable => "Enumerable",
        }
    }
}

/// Struct-level options
#[derive(Debug, Default)]
pub struct TypeAttrs {
    pub rename: Option<String>,
    pub self_clone: bool,
    pub freezable: bool,
}

/// Field-level options
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub readonly: bool,
    pub skip: bool,
    pub flavor: Option<Flavor>,
}

impl TypeAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = TypeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("dto")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    out.rename = Some(name.value());
                } else if meta.path.is_ident("self_clone") {
                    out.self_clone = true;
                } else if meta.path.is_ident("freezable") {
                    out.freezable = true;
                } else {
                    return Err(meta.error("expected `rename`, `self_clone` or `freezable`"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

impl FieldAttrs {
    pub fn parse(field: &Field) -> Result<Self> {
        let mut out = FieldAttrs::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("dto")) {
            attr.parse_nested_meta(|meta| {
                let flavor = if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    out.rename = Some(name.value());
                    None
                } else if meta.path.is_ident("readonly") {
                    out.readonly = true;
                    None
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    None
                } else if meta.path.is_ident("list") {
                    Some(Flavor::List)
                } else if meta.path.is_ident("collection") {
                    Some(Flavor::Collection)
                } else if meta.path.is_ident("enumerable") {
                    Some(Flavor::Enumerable)
                } else {
                    return Err(meta.error(
                        "expected `rename`, `readonly`, `skip`, `list`, `collection` or `enumerable`",
                    ));
                };

                if let Some(flavor) = flavor {
                    if out.flavor.is_some() {
                        return Err(meta.error("only one collection flavor may be given"));
                    }
                    out.flavor = Some(flavor);
                }
                Ok(())
            })?;
        }
        Ok(out)
    }

    /// The property name: the rename if given, else the field name with any
    /// raw-identifier prefix removed
    pub fn property_name(&self, ident: &Ident) -> String {
        match &self.rename {
            Some(name) => name.clone(),
            None => {
                let name = ident.to_string();
                name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
            }
        }
    }
}
