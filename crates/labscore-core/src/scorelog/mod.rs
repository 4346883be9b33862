//! Lab log parsing and best-score reduction.

mod best;
mod event;
mod parser;

pub use best::*;
pub use event::*;
pub use parser::*;
