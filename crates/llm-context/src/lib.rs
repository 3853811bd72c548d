pub mod client;
pub mod context;
pub mod error;
pub mod prompt;

pub use client::*;
pub use context::*;
pub use error::*;
pub use prompt::*;
