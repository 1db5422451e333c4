use crate::domain::model::{Concentration, DosageResult, DoseBreakdown};
use regex::Regex;
use std::sync::OnceLock;

/// 每公斤體重 15 mg 的兒童劑量
pub const MG_PER_KG: f64 = 15.0;

/// 濃度以每 5 ml 計
pub const ML_PER_UNIT: f64 = 5.0;

// 只接受 ASCII 數字；空白字元集合與瀏覽器 parseFloat 相同 (含 U+FEFF，不含 U+0085)
const NUMBER_PREFIX: &str = concat!(
    r"^[\t\n\x0B\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]*",
    r"([+-]?)(Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)",
);

fn number_prefix() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| match Regex::new(NUMBER_PREFIX) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("Invalid weight pattern: {}", e);
            None
        }
    })
    .as_ref()
}

/// 解析體重文字
///
/// 跳過前導空白，讀取最長的數字前綴，後面多餘的字元忽略 ("10kg" -> 10)。
/// 沒有數字前綴時回傳 `None`。
pub fn parse_weight(text: &str) -> Option<f64> {
    let caps = number_prefix()?.captures(text)?;
    let negative = &caps[1] == "-";
    let magnitude = match &caps[2] {
        "Infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().ok()?,
    };

    Some(if negative { -magnitude } else { magnitude })
}

/// 以兩種固定濃度之一計算建議容量
pub fn calculate(weight_text: &str, concentration: Concentration) -> DosageResult {
    calculate_mg(weight_text, concentration.mg_per_5ml())
}

/// 以整數濃度 (mg/5ml) 計算建議容量
///
/// 濃度為 0 時與無效體重一樣回傳錯誤。負數或極大的體重不做限制。
pub fn calculate_mg(weight_text: &str, mg_per_5ml: u32) -> DosageResult {
    let weight_kg = match parse_weight(weight_text) {
        Some(w) if mg_per_5ml != 0 => w,
        _ => {
            tracing::debug!(
                weight_text,
                mg_per_5ml,
                "rejecting input: weight is not a number or concentration is zero"
            );
            return DosageResult::InvalidWeight;
        }
    };

    let dose_mg = weight_kg * MG_PER_KG;
    let units = dose_mg / f64::from(mg_per_5ml);
    let volume_ml = units * ML_PER_UNIT;

    tracing::debug!(weight_kg, mg_per_5ml, dose_mg, volume_ml, "computed dose");

    DosageResult::Volume(DoseBreakdown {
        weight_kg,
        mg_per_5ml,
        dose_mg,
        volume_ml,
    })
}
