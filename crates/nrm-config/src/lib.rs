pub mod annotations;
pub mod config;
pub mod display;
pub mod error;
pub mod ini;
pub mod registry;
pub mod store;

#[cfg(test)]
pub mod test_utils;
