//! Type definitions

pub mod duty;
pub mod log_sheet;
pub mod trip;

pub use duty::*;
pub use log_sheet::*;
pub use trip::*;
