pub mod timing;
pub mod tracker;

pub use timing::*;
pub use tracker::*;
