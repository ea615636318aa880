//! CLI command definitions.

pub mod call;
pub mod methods;
pub mod serve;
