use clap::Parser;
use pcm_dose::app::{output, settings::CalcSettings};
use pcm_dose::core::ConfigProvider;
use pcm_dose::utils::error::DoseError;
use pcm_dose::utils::{logger, validation::Validate};
use pcm_dose::{BatchEngine, CliConfig, Command, CsvBatchPipeline, LocalStorage, TomlConfig};

fn main() {
    let config = CliConfig::parse();

    // 載入 TOML 配置 (可選)
    let file_config = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(file_config) => file_config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                exit_with(&e);
            }
        },
        None => TomlConfig::default(),
    };

    // 初始化日誌
    if file_config.json_logging() {
        logger::init_json_logger(config.verbose, file_config.log_level());
    } else {
        logger::init_cli_logger(config.verbose, file_config.log_level());
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate().and_then(|_| file_config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        exit_with(&e);
    }

    if let Err(e) = run(config.command, &file_config) {
        tracing::error!(
            "❌ pcm-dose failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        exit_with(&e);
    }
}

/// 根據錯誤嚴重程度決定退出碼
fn exit_with(e: &DoseError) -> ! {
    std::process::exit(e.severity().exit_code())
}

fn run(command: Command, file_config: &TomlConfig) -> Result<(), DoseError> {
    match command {
        Command::Calc {
            weight,
            concentration,
            format,
        } => {
            let settings = CalcSettings::resolve(file_config, weight, concentration, format);
            let format = settings.format;
            // 無效體重只顯示訊息，不視為失敗
            let form = settings.submit();
            println!("{}", output::render_calculation(&form, format)?);
        }
        Command::Batch {
            input,
            output: output_path,
            concentration,
        } => {
            let concentration = concentration.unwrap_or_else(|| file_config.default_concentration());
            tracing::info!("📁 Input: {}, default concentration: {}", input, concentration.label());

            let pipeline = CsvBatchPipeline::new(LocalStorage::new("."), input, output_path, concentration);
            let summary = BatchEngine::new(pipeline).run()?;

            println!("✅ {}", output::render_summary(&summary));
        }
        Command::Options => {
            println!("{}", output::render_options(file_config.output_format())?);
        }
    }

    Ok(())
}
