use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::utils::error::Result;

/// 試算表與 pandas 常見的缺值標記
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 來源 CSV 的一列，只取需要的兩個欄位
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Categoria")]
    pub category: String,
    /// 空白、缺值標記與 NaN 都視為缺值
    #[serde(rename = "Valor", deserialize_with = "deserialize_amount")]
    pub amount: Option<f64>,
}

fn deserialize_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let raw = raw.trim();
    if MISSING_VALUE_MARKERS.contains(&raw) {
        return Ok(None);
    }

    let amount: f64 = raw
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", raw)))?;
    Ok(if amount.is_nan() { None } else { Some(amount) })
}

impl SalesRecord {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount: Some(amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Valor")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub totals: Vec<CategoryTotal>,
}

impl Report {
    pub fn new(totals: Vec<CategoryTotal>) -> Self {
        Self { totals }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn grand_total(&self) -> f64 {
        self.totals.iter().map(|t| t.total).sum()
    }

    /// 以類別為鍵的檢視，比較報表時不受順序影響
    pub fn as_map(&self) -> BTreeMap<&str, f64> {
        self.totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect()
    }

    /// 四格縮排的 JSON，寫入 processed zone 的格式
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        // serde_json 只會輸出合法 UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn from_json(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report::new(vec![
            CategoryTotal {
                category: "Alimentos".to_string(),
                total: 30.0,
            },
            CategoryTotal {
                category: "Eletrônicos".to_string(),
                total: 150.0,
            },
        ])
    }

    #[test]
    fn test_pretty_json_uses_four_space_indent_and_legacy_keys() {
        let json = sample_report().to_pretty_json().unwrap();
        let expected = "[\n    {\n        \"Categoria\": \"Alimentos\",\n        \"Valor\": 30.0\n    },\n    {\n        \"Categoria\": \"Eletrônicos\",\n        \"Valor\": 150.0\n    }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_round_trip_preserves_pairs() {
        let report = sample_report();
        let json = report.to_pretty_json().unwrap();
        let parsed = Report::from_json(json.as_bytes()).unwrap();
        assert_eq!(parsed.as_map(), report.as_map());
    }

    #[test]
    fn test_empty_report_serializes_to_empty_array() {
        let json = Report::default().to_pretty_json().unwrap();
        assert_eq!(json, "[]");
        assert!(Report::from_json(json.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_grand_total() {
        assert_eq!(sample_report().grand_total(), 180.0);
        assert_eq!(Report::default().grand_total(), 0.0);
    }
}
