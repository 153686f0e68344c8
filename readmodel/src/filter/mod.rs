//! Equality filters for selecting documents from collections.
//!
//! A read-model lookup is always an exact-match conjunction of field
//! equalities, so this module only offers what such lookups need.
//!
//! # Creating Filters
//!
//! - `field("name").eq("Alice")` - equality check
//! - `field("age").eq(30).and(field("city").eq("Oslo"))` - conjunction
//! - `and(vec![...])` - conjunction of many filters
//! - `all()` - match every document
//!
//! # Examples
//!
//! ```rust,ignore
//! use readmodel::filter::{all, and, field};
//!
//! let filter = and(vec![field("_id").eq("42"), field("status").eq("active")]);
//! let results = collection.find(filter)?;
//! let everything = collection.find(all())?;
//! ```
//!
//! Numeric equality is cross-width, so `field("n").eq(1i32)` matches a stored
//! `1i64`. A field holding a different kind never matches.

mod basic_filters;
mod filter;
mod fluent;
mod logical_filters;

pub(crate) use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub(crate) use logical_filters::*;
