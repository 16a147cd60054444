//! Tree-walking evaluator for the Lars language.

pub mod evaluator;

pub use evaluator::{eval, Evaluator};
