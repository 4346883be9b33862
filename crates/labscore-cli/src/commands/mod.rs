//! CLI command implementations.

pub mod parse;
pub mod publish;
pub mod render;
