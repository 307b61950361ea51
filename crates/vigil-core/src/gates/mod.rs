pub mod proof;
pub mod transport;

pub use proof::*;
pub use transport::*;
