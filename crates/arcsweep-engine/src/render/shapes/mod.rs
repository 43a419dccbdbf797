//! Shape pipelines.

mod common;

pub mod arc;
