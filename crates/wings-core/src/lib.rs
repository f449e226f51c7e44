pub mod config;
pub mod dates;
pub mod error;
pub mod join;
pub mod outputs;
pub mod photos;
pub mod pipeline;
pub mod sheets;
pub mod sources;

pub use error::{PipelineError, Result};
