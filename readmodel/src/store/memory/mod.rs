mod collection;
mod config;
mod store;

pub use collection::*;
pub use config::*;
pub use store::*;
