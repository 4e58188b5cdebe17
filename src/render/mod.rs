// Presentation layer: turns a pipeline outcome into an HTML page.
// Renderers never see storage or configuration, only `Result<Report>`.

pub mod social;
pub mod template;

use crate::core::Report;
use crate::utils::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use social::SocialPostRenderer;
pub use template::TemplateRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Tera page with a table of totals
    Template,
    /// Inline page with the JSON report and an editable post
    Social,
}

pub trait Renderer: Send + Sync {
    /// 管道失敗也要產生頁面；只有渲染本身出錯才回傳 `Err`
    fn render(&self, outcome: &Result<Report>) -> Result<String>;
}

/// 金額固定兩位小數
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
