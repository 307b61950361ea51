pub mod ledger;
pub mod level;

pub use ledger::*;
pub use level::*;
