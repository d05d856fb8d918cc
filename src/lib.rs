//! `minipy` library crate.
//!
//! High-level layout:
//! - frontend: `lexer` turns source text into the token stream that an
//!   external parser consumes through the `current()`/`advance()` protocol
//! - shared runtime value/class model: `runtime`
//! - execution: `ast` holds the statement tree and its tree-walking evaluator
pub mod ast;
pub mod lexer;
pub mod runtime;
