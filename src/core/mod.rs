pub mod engine;
pub mod error;
pub mod utils;

pub use error::{ErrorKind, FsError};

pub type Result<T> = std::result::Result<T, FsError>;
