//! Scope analysis.
//!
//! Walks a module and records, for every module, function and class body,
//! the names it binds. Nested bodies are analyzed breadth-first: a definition
//! binds its name and parameters immediately, and its body is visited only
//! after the enclosing body is finished.

mod declarer;

pub use declarer::Declarer;

#[cfg(test)]
mod declarer_test;
