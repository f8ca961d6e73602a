//! # Permafrost Derive
//!
//! `#[derive(Dto)]` for plain structs with named fields.
//!
//! The derive generates `permafrost::Dto` (property reads and writes by
//! name) and `permafrost::DtoType` (the type description the registry
//! caches). Every field type must implement `permafrost::FieldValue`, and
//! the struct must implement `Default`.
//!
//! ## Attributes
//!
//! On the struct:
//!
//! - `#[dto(rename = "Name")]`: type name used in errors and diagnostics
//! - `#[dto(self_clone)]`: use the type's `Clone` impl as its self-clone
//!   capability
//! - `#[dto(freezable)]`: use the type's `Freezable` impl for native freeze
//!   support
//!
//! On a field:
//!
//! - `#[dto(rename = "name")]`: property name
//! - `#[dto(readonly)]`: readable, but writes fail with `ReadOnlyProperty`
//! - `#[dto(skip)]`: not a property
//! - `#[dto(list)]`, `#[dto(collection)]`, `#[dto(enumerable)]`: the proxy
//!   flavor a wrapper hands out for this field

#![warn(missing_docs)]
#![warn(clippy::all)]

mod attrs;
mod expand;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive the `Dto` capability interface
#[proc_macro_derive(Dto, attributes(dto))]
pub fn derive_dto(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive_dto(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
