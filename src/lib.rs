pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{batch::CsvBatchPipeline, engine::BatchEngine};
pub use crate::domain::calculator::{calculate, calculate_mg};
pub use crate::domain::form::DosageForm;
pub use crate::domain::model::{Concentration, DosageResult, DoseBreakdown};
pub use crate::utils::error::{DoseError, Result};
