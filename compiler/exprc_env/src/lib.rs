//! Variable bindings consulted when evaluating expressions.

pub mod env;

pub use env::{Bindings, VarEnv};
