pub mod benchmark;
pub mod error;
pub mod keys;
pub mod types;

pub use benchmark::*;
pub use error::*;
pub use keys::*;
pub use types::*;
