use crate::domain::model::{Concentration, DoseRecord, DoseRequest};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait ConfigProvider {
    fn default_weight(&self) -> &str;
    fn default_concentration(&self) -> Concentration;
    fn output_format(&self) -> OutputFormat;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<DoseRequest>>;
    fn transform(&self, requests: Vec<DoseRequest>) -> Result<Vec<DoseRecord>>;
    fn load(&self, records: &[DoseRecord]) -> Result<String>;
}
