pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use crate::core::OutputFormat;
    use crate::domain::model::Concentration;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Parser, Subcommand};

    fn parse_concentration(value: &str) -> std::result::Result<Concentration, String> {
        value.parse().map_err(|e: crate::utils::error::DoseError| e.to_string())
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "pcm-dose")]
    #[command(about = "Paediatric paracetamol syrup dose calculator")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(long, global = true)]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Calculate the recommended volume for one weight
        Calc {
            /// Body weight in kilograms
            #[arg(short, long, allow_hyphen_values = true)]
            weight: Option<String>,

            /// Syrup concentration in mg/5ml (120 or 250)
            #[arg(short = 'c', long, value_parser = parse_concentration)]
            concentration: Option<Concentration>,

            #[arg(short, long, value_enum)]
            format: Option<OutputFormat>,
        },

        /// Calculate volumes for every row of a CSV file
        Batch {
            /// CSV file with a `weight` column and an optional `concentration` column
            #[arg(short, long)]
            input: String,

            #[arg(short, long)]
            output: String,

            /// Concentration used for rows without one
            #[arg(short = 'c', long, value_parser = parse_concentration)]
            concentration: Option<Concentration>,
        },

        /// List the available concentrations
        Options,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(config) = &self.config {
                validation::validate_path("config", config)?;
            }

            if let Command::Batch { input, output, .. } = &self.command {
                validation::validate_path("input", input)?;
                validation::validate_file_extension("input", input, &["csv"])?;
                validation::validate_path("output", output)?;
                validation::validate_file_extension("output", output, &["csv"])?;
            }

            Ok(())
        }
    }

}
