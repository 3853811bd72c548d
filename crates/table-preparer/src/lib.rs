pub mod csv_io;
pub mod error;
pub mod locale;
pub mod prepare;

pub use csv_io::*;
pub use error::*;
pub use locale::*;
pub use prepare::*;
