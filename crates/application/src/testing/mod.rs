//! Response checking and the run loop.

mod evaluator;
mod runner;

pub use evaluator::{evaluate, evaluate_all, json_kind};
pub use runner::TestRunner;
