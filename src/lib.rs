pub mod cli;
pub mod error;
pub mod models;
pub mod stages;
pub mod utils;

pub use error::{PipelineError, Result};
