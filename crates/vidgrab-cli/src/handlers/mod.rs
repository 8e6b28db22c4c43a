//! Command handlers.

pub mod check_deps;
pub mod fetch;
pub mod paths;
pub mod serve;
