use crate::core::Report;
use crate::render::{format_amount, Renderer};
use crate::utils::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Debug, Serialize)]
struct RowView<'a> {
    category: &'a str,
    total: String,
}

pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // 名稱以 .html 結尾，自動跳脫生效
        tera.add_raw_template(TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera })
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, outcome: &Result<Report>) -> Result<String> {
        let mut context = Context::new();

        match outcome {
            Ok(report) => {
                let rows: Vec<RowView> = report
                    .totals
                    .iter()
                    .map(|t| RowView {
                        category: &t.category,
                        total: format_amount(t.total),
                    })
                    .collect();
                context.insert("rows", &rows);
                context.insert("grand_total", &format_amount(report.grand_total()));
                context.insert("error", &Option::<String>::None);
            }
            Err(e) => {
                context.insert("rows", &Vec::<RowView>::new());
                context.insert("grand_total", &format_amount(0.0));
                context.insert("error", &Some(e.user_friendly_message()));
            }
        }

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}
