//! Shared types: store-native values, the plain-value coercion pass, field
//! name constants and lock helpers.

mod coercion;
mod constants;
mod lock;
mod value;

pub use coercion::*;
pub use constants::*;
pub use lock::*;
pub use value::*;
