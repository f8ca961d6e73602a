//! Code generation for `#[derive(Dto)]`

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Ident, Result, Type};

use crate::attrs::{FieldAttrs, TypeAttrs};

/// One property backed by a struct field
struct Property {
    ident: Ident,
    ty: Type,
    name: String,
    attrs: FieldAttrs,
}

pub fn derive_dto(input: DeriveInput) -> Result<TokenStream> {
    let type_attrs = TypeAttrs::parse(&input.attrs)?;
    let properties = collect_properties(&input)?;

    let ident = &input.ident;
    let type_name = type_attrs
        .rename
        .clone()
        .unwrap_or_else(|| ident.to_string());
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let describe = properties.iter().map(|p| {
        let name = &p.name;
        let ty = &p.ty;
        let mut info = quote! {
            ::permafrost::PropertyInfo::new(#name, <#ty as ::permafrost::FieldValue>::KIND)
        };
        if let Some(flavor) = p.attrs.flavor {
            let variant = Ident::new(flavor.variant(), Span::call_site());
            info = quote! { #info.with_kind(::permafrost::PropertyKind::#variant) };
        }
        if p.attrs.readonly {
            info = quote! { #info.read_only() };
        }
        quote! { .with_property(#info) }
    });

    let getters = properties.iter().map(|p| {
        let name = &p.name;
        let field = &p.ident;
        quote! {
            #name => ::std::result::Result::Ok(::permafrost::FieldValue::to_value(&self.#field)),
        }
    });

    let setters = properties.iter().map(|p| {
        let name = &p.name;
        let field = &p.ident;
        let ty = &p.ty;
        if p.attrs.readonly {
            quote! {
                #name => ::std::result::Result::Err(::permafrost::PermafrostError::ReadOnlyProperty {
                    type_name: #type_name.to_string(),
                    property: property.to_string(),
                }),
            }
        } else {
            quote! {
                #name => {
                    self.#field = <#ty as ::permafrost::FieldValue>::from_value(value)?;
                    ::std::result::Result::Ok(())
                }
            }
        }
    });

    let self_clone = type_attrs.self_clone.then(|| {
        quote! {
            fn self_clone(&self) -> ::std::option::Option<::std::boxed::Box<dyn ::permafrost::Dto>> {
                ::std::option::Option::Some(::std::boxed::Box::new(::std::clone::Clone::clone(self)))
            }
        }
    });

    let freezable = type_attrs.freezable.then(|| {
        quote! {
            fn freezable(&mut self) -> ::std::option::Option<&mut dyn ::permafrost::Freezable> {
                ::std::option::Option::Some(self)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::permafrost::DtoType for #ident #ty_generics #where_clause {
            fn describe() -> ::permafrost::TypeInfo {
                ::permafrost::TypeInfo::new::<Self>(#type_name)
                    #(#describe)*
            }
        }

        impl #impl_generics ::permafrost::Dto for #ident #ty_generics #where_clause {
            fn type_info(&self) -> ::std::sync::Arc<::permafrost::TypeInfo> {
                ::permafrost::registry::type_info_of::<Self>()
            }

            fn get(&self, property: &str) -> ::permafrost::Result<::permafrost::Value> {
                match property {
                    #(#getters)*
                    _ => ::std::result::Result::Err(::permafrost::PermafrostError::UnknownProperty {
                        type_name: #type_name.to_string(),
                        property: property.to_string(),
                    }),
                }
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                property: &str,
                value: ::permafrost::Value,
            ) -> ::permafrost::Result<()> {
                match property {
                    #(#setters)*
                    _ => ::std::result::Result::Err(::permafrost::PermafrostError::UnknownProperty {
                        type_name: #type_name.to_string(),
                        property: property.to_string(),
                    }),
                }
            }

            #self_clone

            #freezable

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    })
}

fn collect_properties(input: &DeriveInput) -> Result<Vec<Property>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Dto can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "Dto can only be derived for structs",
            ))
        }
    };

    let mut properties = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::parse(field)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = attrs.property_name(&ident);
        if properties.iter().any(|p: &Property| p.name == name) {
            return Err(Error::new_spanned(
                &ident,
                format!("duplicate property name `{}`", name),
            ));
        }
        properties.push(Property {
            ident,
            ty: field.ty.clone(),
            name,
            attrs,
        });
    }
    Ok(properties)
}
