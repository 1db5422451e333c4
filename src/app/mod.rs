pub mod output;
pub mod settings;
