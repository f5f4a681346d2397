use error::NrmError;

pub mod error;
pub mod resolver;
pub mod table;

pub type NrmResult<T> = std::result::Result<T, NrmError>;
