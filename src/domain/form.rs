use crate::domain::calculator::calculate;
use crate::domain::model::{Concentration, DosageResult};

pub const DEFAULT_WEIGHT_TEXT: &str = "10";

/// 尚未計算時結果欄位顯示的預設文字
pub const RESULT_PLACEHOLDER: &str = "0.0";

/// 計算表單的三個欄位
///
/// 每次使用者操作都直接重新指定欄位值；`submit` 會覆蓋上一次的結果。
#[derive(Debug, Clone, PartialEq)]
pub struct DosageForm {
    weight_text: String,
    concentration: Concentration,
    result: Option<DosageResult>,
}

impl Default for DosageForm {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_TEXT, Concentration::default())
    }
}

impl DosageForm {
    pub fn new(weight_text: impl Into<String>, concentration: Concentration) -> Self {
        Self {
            weight_text: weight_text.into(),
            concentration,
            result: None,
        }
    }

    pub fn weight_text(&self) -> &str {
        &self.weight_text
    }

    pub fn concentration(&self) -> Concentration {
        self.concentration
    }

    pub fn result(&self) -> Option<&DosageResult> {
        self.result.as_ref()
    }

    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.weight_text = text.into();
    }

    pub fn select_concentration(&mut self, concentration: Concentration) {
        self.concentration = concentration;
    }

    pub fn submit(&mut self) -> &DosageResult {
        let result = calculate(&self.weight_text, self.concentration);
        tracing::debug!(
            weight = %self.weight_text,
            concentration = %self.concentration,
            result = %result,
            "form submitted"
        );
        self.result.insert(result)
    }

    pub fn display(&self) -> String {
        self.result
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| RESULT_PLACEHOLDER.to_string())
    }
}
