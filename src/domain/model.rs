use crate::utils::error::{DoseError, INVALID_WEIGHT_MESSAGE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 糖漿濃度 (mg/5ml)，只有兩個選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Concentration {
    Mg120,
    #[default]
    Mg250,
}

impl Concentration {
    pub const ALL: [Concentration; 2] = [Concentration::Mg120, Concentration::Mg250];

    pub fn mg_per_5ml(self) -> u32 {
        match self {
            Concentration::Mg120 => 120,
            Concentration::Mg250 => 250,
        }
    }

    pub fn label(self) -> String {
        format!("{} mg/5ml", self.mg_per_5ml())
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mg_per_5ml())
    }
}

impl TryFrom<u32> for Concentration {
    type Error = DoseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            120 => Ok(Concentration::Mg120),
            250 => Ok(Concentration::Mg250),
            other => Err(DoseError::UnknownConcentration {
                value: other.to_string(),
            }),
        }
    }
}

impl From<Concentration> for u32 {
    fn from(value: Concentration) -> Self {
        value.mg_per_5ml()
    }
}

impl FromStr for Concentration {
    type Err = DoseError;

    /// 接受 "120"、"250" 以及標籤形式 "120 mg/5ml"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix("mg/5ml")
            .map(str::trim_end)
            .unwrap_or(trimmed);

        number
            .parse::<u32>()
            .ok()
            .and_then(|mg| Concentration::try_from(mg).ok())
            .ok_or_else(|| DoseError::UnknownConcentration {
                value: s.to_string(),
            })
    }
}

/// 一次成功計算的中間值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseBreakdown {
    pub weight_kg: f64,
    pub mg_per_5ml: u32,
    pub dose_mg: f64,
    pub volume_ml: f64,
}

impl DoseBreakdown {
    /// 四捨五入到一位小數後的毫升數
    pub fn rounded_ml(&self) -> f64 {
        round_one_decimal(self.volume_ml)
    }

    /// 與表單顯示一致的文字
    pub fn volume_text(&self) -> String {
        format_one_decimal(self.volume_ml)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DosageResult {
    Volume(DoseBreakdown),
    InvalidWeight,
}

impl DosageResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, DosageResult::Volume(_))
    }

    pub fn breakdown(&self) -> Option<&DoseBreakdown> {
        match self {
            DosageResult::Volume(b) => Some(b),
            DosageResult::InvalidWeight => None,
        }
    }

    pub fn volume_ml(&self) -> Option<f64> {
        self.breakdown().map(DoseBreakdown::rounded_ml)
    }
}

impl fmt::Display for DosageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DosageResult::Volume(b) => f.write_str(&b.volume_text()),
            DosageResult::InvalidWeight => f.write_str(INVALID_WEIGHT_MESSAGE),
        }
    }
}

#[derive(Serialize)]
struct DosageResultView<'a> {
    ok: bool,
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a DoseBreakdown>,
}

impl Serialize for DosageResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DosageResultView {
            ok: self.is_valid(),
            result: self.to_string(),
            volume_ml: self.volume_ml().filter(|v| v.is_finite()),
            breakdown: self.breakdown(),
        }
        .serialize(serializer)
    }
}

/// 批次輸入中的一列
#[derive(Debug, Clone, PartialEq)]
pub struct DoseRequest {
    pub row: usize,
    pub weight_text: String,
    pub concentration: Concentration,
}

/// 批次輸出中的一列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseRecord {
    pub weight: String,
    pub concentration: u32,
    pub dose_mg: Option<f64>,
    pub volume_ml: Option<f64>,
    pub result: String,
    #[serde(skip)]
    pub valid: bool,
}

impl DoseRecord {
    pub fn from_result(request: &DoseRequest, result: &DosageResult) -> Self {
        Self {
            weight: request.weight_text.clone(),
            concentration: request.concentration.mg_per_5ml(),
            // 非有限值只出現在 result 欄 ("Infinity")，數字欄留空
            dose_mg: result.breakdown().map(|b| b.dose_mg).filter(|v| v.is_finite()),
            volume_ml: result.volume_ml().filter(|v| v.is_finite()),
            result: result.to_string(),
            valid: result.is_valid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub output_path: String,
}

/// 在精確的二進位值上做「四捨五入、遠離零」的一位小數進位
///
/// 只有 x*4 為奇數整數時才會正好落在 .x5 上，此時向遠離零方向進位；
/// 其餘情況交給標準格式化 (已是正確進位)。
pub fn format_one_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= 1e21 {
        return format_exponent(value);
    }
    // -0 顯示為 0.0
    let value = if value == 0.0 { 0.0 } else { value };

    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (value * 10.0).round();
        return format!("{:.1}", tenths / 10.0);
    }

    format!("{:.1}", value)
}

pub fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format_one_decimal(value).parse().unwrap_or(value)
}

fn format_exponent(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}
