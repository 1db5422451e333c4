//! Output formatting for the command-line surface

use crate::core::{BatchSummary, OutputFormat};
use crate::domain::form::DosageForm;
use crate::domain::model::{Concentration, DosageResult};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct CalculationReport<'a> {
    weight: &'a str,
    concentration: Concentration,
    #[serde(flatten)]
    result: &'a DosageResult,
}

#[derive(Serialize)]
struct ConcentrationOption {
    mg_per_5ml: u32,
    label: String,
    default: bool,
}

pub fn render_calculation(form: &DosageForm, format: OutputFormat) -> Result<String> {
    match (format, form.result()) {
        (OutputFormat::Json, Some(result)) => {
            let report = CalculationReport {
                weight: form.weight_text(),
                concentration: form.concentration(),
                result,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        (OutputFormat::Json, None) => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "weight": form.weight_text(),
            "concentration": form.concentration(),
            "result": form.display(),
        }))?),
        (OutputFormat::Text, _) => {
            let mut lines = vec![
                "Kalkulator Dos Paracetamol".to_string(),
                "==========================".to_string(),
                format!("Berat (kg):              {}", form.weight_text()),
                format!("Pekatan PCM (mg/5ml):    {}", form.concentration().label()),
            ];

            if let Some(breakdown) = form.result().and_then(DosageResult::breakdown) {
                lines.push(format!("Dos (mg):                {}", breakdown.dose_mg));
            }
            lines.push(format!("Dos yang Disyorkan (ml): {}", form.display()));

            Ok(lines.join("\n"))
        }
    }
}

pub fn render_options(format: OutputFormat) -> Result<String> {
    let default = Concentration::default();

    match format {
        OutputFormat::Json => {
            let options: Vec<ConcentrationOption> = Concentration::ALL
                .iter()
                .map(|c| ConcentrationOption {
                    mg_per_5ml: c.mg_per_5ml(),
                    label: c.label(),
                    default: *c == default,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&options)?)
        }
        OutputFormat::Text => Ok(Concentration::ALL
            .iter()
            .map(|c| {
                if *c == default {
                    format!("{} (default)", c.label())
                } else {
                    c.label()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn render_summary(summary: &BatchSummary) -> String {
    format!(
        "Processed {} rows ({} valid, {} invalid)\nReport saved to: {}",
        summary.total, summary.valid, summary.invalid, summary.output_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::INVALID_WEIGHT_MESSAGE;

    #[test]
    fn test_text_output_after_submit() {
        let mut form = DosageForm::new("10", Concentration::Mg120);
        form.submit();

        let text = render_calculation(&form, OutputFormat::Text).unwrap();
        assert!(text.contains("120 mg/5ml"));
        assert!(text.contains("Dos (mg):                150"));
        assert!(text.ends_with("Dos yang Disyorkan (ml): 6.3"));
    }

    #[test]
    fn test_text_output_for_invalid_weight() {
        let mut form = DosageForm::new("abc", Concentration::Mg250);
        form.submit();

        let text = render_calculation(&form, OutputFormat::Text).unwrap();
        assert!(!text.contains("Dos (mg)"));
        assert!(text.contains(INVALID_WEIGHT_MESSAGE));
    }

    #[test]
    fn test_json_output() {
        let mut form = DosageForm::default();
        form.submit();

        let json: serde_json::Value =
            serde_json::from_str(&render_calculation(&form, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["weight"], "10");
        assert_eq!(json["concentration"], 250);
        assert_eq!(json["ok"], true);
        assert_eq!(json["result"], "3.0");
        assert_eq!(json["volume_ml"], 3.0);
    }

    #[test]
    fn test_json_output_before_submit_shows_placeholder() {
        let form = DosageForm::default();
        let json: serde_json::Value =
            serde_json::from_str(&render_calculation(&form, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["result"], "0.0");
    }

    #[test]
    fn test_options_listing() {
        let text = render_options(OutputFormat::Text).unwrap();
        assert_eq!(text, "120 mg/5ml\n250 mg/5ml (default)");

        let json: serde_json::Value =
            serde_json::from_str(&render_options(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json[0]["mg_per_5ml"], 120);
        assert_eq!(json[1]["default"], true);
    }

    #[test]
    fn test_summary() {
        let summary = BatchSummary {
            total: 3,
            valid: 2,
            invalid: 1,
            output_path: "out.csv".to_string(),
        };
        assert_eq!(
            render_summary(&summary),
            "Processed 3 rows (2 valid, 1 invalid)\nReport saved to: out.csv"
        );
    }
}
