use crate::core::{ConfigProvider, OutputFormat};
use crate::domain::form::DosageForm;
use crate::domain::model::Concentration;

/// 命令列覆蓋設定檔後的單次計算設定
#[derive(Debug, Clone, PartialEq)]
pub struct CalcSettings {
    pub weight_text: String,
    pub concentration: Concentration,
    pub format: OutputFormat,
}

impl CalcSettings {
    pub fn resolve<C: ConfigProvider>(
        config: &C,
        weight: Option<String>,
        concentration: Option<Concentration>,
        format: Option<OutputFormat>,
    ) -> Self {
        Self {
            weight_text: weight.unwrap_or_else(|| config.default_weight().to_string()),
            concentration: concentration.unwrap_or_else(|| config.default_concentration()),
            format: format.unwrap_or_else(|| config.output_format()),
        }
    }

    pub fn into_form(self) -> DosageForm {
        DosageForm::new(self.weight_text, self.concentration)
    }

    /// 建立表單並計算一次；無效體重只記錄警告，結果照常回傳
    pub fn submit(self) -> DosageForm {
        let mut form = self.into_form();
        if !form.submit().is_valid() {
            tracing::warn!("Weight '{}' is not a valid number", form.weight_text());
        }
        form
    }
}
