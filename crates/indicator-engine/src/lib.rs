pub mod alerts;
pub mod deltas;
pub mod dupont;
pub mod kpis;
pub mod narrative;
pub mod report;

pub use alerts::*;
pub use deltas::*;
pub use dupont::*;
pub use kpis::*;
pub use narrative::*;
pub use report::*;
