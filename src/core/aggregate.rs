use crate::domain::model::{CategoryTotal, SalesRecord};
use std::collections::BTreeMap;

/// 依 `Categoria` 分組加總 `Valor`。
///
/// - 空類別的列不參與分組
/// - 缺值的 `Valor` 不計入，但類別仍會出現（總額為 0）
/// - 輸出依類別排序
pub fn aggregate(records: &[SalesRecord]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        if record.category.is_empty() {
            skipped += 1;
            continue;
        }

        let total = groups.entry(record.category.as_str()).or_insert(0.0);
        if let Some(amount) = record.amount {
            *total += amount;
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows with an empty category", skipped);
    }

    groups
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect()
}
