pub mod cli;
pub mod codegen;
pub mod commands;
pub mod error;
pub mod loader;
pub mod models;
pub mod renderer;

pub use error::{Plan2DslError, Result};
