pub mod context;
pub mod types;
mod utils;

pub mod attribute;
pub mod current;
pub mod home;
pub mod probe;
pub mod registry;
pub mod scope;

#[cfg(test)]
mod test_utils;

pub use context::NrmContext;
pub use types::*;
