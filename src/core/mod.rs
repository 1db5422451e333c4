pub mod batch;
pub mod engine;

pub use crate::domain::model::{BatchSummary, DoseRecord, DoseRequest};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
