#![recursion_limit = "128"]
//! # Readmodel Derive Macros
//!
//! This crate provides procedural macros for the `readmodel` crate.
//!
//! ## Macros
//!
//! ### `Identifiable`
//!
//! Derives `readmodel::repository::Identifiable` for a struct, so the struct
//! can be stored by a document repository.
//!
//! - **Supported for**: Structs with named fields only
//! - **Type attribute**: `#[read_model(class = "...", id = "...")]`, both optional
//! - **Defaults**: the class is the struct name, the identifier is the `id` field
//! - **Requirement**: the identifier field implements `Display`
//!
//! # Examples
//!
//! ```rust,ignore
//! use readmodel_derive::Identifiable;
//!
//! #[derive(Identifiable, Serialize, Deserialize)]
//! pub struct OrderView {
//!     pub id: String,
//!     pub total: i64,
//! }
//!
//! #[derive(Identifiable, Serialize, Deserialize)]
//! #[read_model(class = "Customer", id = "customer_id")]
//! pub struct CustomerSummary {
//!     pub customer_id: u64,
//!     pub orders: u32,
//! }
//! ```
//!
//! ## Error Messages
//!
//! - Enums, unions and tuple structs are rejected
//! - A missing identifier field names the field that was looked for

extern crate proc_macro;
mod identifiable;

use crate::identifiable::generate_identifiable_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives the `Identifiable` trait for read-model persistence.
///
/// # Attributes
///
/// - `#[read_model(class = "Name")]` - class tag, defaults to the struct name
/// - `#[read_model(id = "field")]` - identifier field, defaults to `id`
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to an enum or union
/// - Used on tuple structs or unit structs
/// - The identifier field does not exist
///
/// # Examples
///
/// ```rust,ignore
/// use readmodel_derive::Identifiable;
///
/// #[derive(Identifiable)]
/// pub struct Ticket {
///     pub id: u32,
///     pub title: String,
/// }
/// ```
#[proc_macro_derive(Identifiable, attributes(read_model))]
pub fn derive_identifiable(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => {
            let result = generate_identifiable_for_struct(&ast, data);
            match result {
                Ok(token_stream) => token_stream,
                Err(e) => e.to_compile_error().into(),
            }
        }
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Identifiable for enums. Implement Identifiable by hand to report a class per variant.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Identifiable for unions. Unions are not supported by the Identifiable derive macro.",
            );
            error.to_compile_error().into()
        }
    }
}
