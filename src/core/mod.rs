//! Core evaluation logic — types, parsing, topology selection, graph assembly.

pub mod graph;
pub mod parser;
pub mod readiness;
pub mod topology;
pub mod types;
