use crate::core::Report;
use crate::render::{format_amount, Renderer};
use crate::utils::error::{EtlError, Result};
use tera::escape_html;

pub const POST_HEADING: &str = "Relatório de vendas por categoria:";

/// 產生可直接貼到社群平台的純文字貼文
pub fn format_post(report: &Report) -> String {
    let mut lines = vec![POST_HEADING.to_string()];
    for total in &report.totals {
        lines.push(format!(
            "- Categoria: {}, Total de Vendas: R$ {}",
            total.category,
            format_amount(total.total)
        ));
    }
    lines.join("\n")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SocialPostRenderer;

impl SocialPostRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_report(&self, report: &Report) -> Result<String> {
        let json = report.to_pretty_json()?;
        let post = format_post(report);

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>Relatório de Vendas</title></head>\n<body>\n");
        html.push_str("<h1>Relatório processado com sucesso!</h1>\n");
        html.push_str("<h2>Dados (JSON)</h2>\n");
        html.push_str(&format!("<pre>{}</pre>\n", escape_html(&json)));
        html.push_str("<h2>Post para redes sociais</h2>\n");
        html.push_str(&format!(
            "<textarea rows=\"{}\" cols=\"80\">{}</textarea>\n",
            report.len() + 3,
            escape_html(&post)
        ));
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }

    fn render_error(&self, error: &EtlError) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>Erro</title></head>\n<body>\n<h1>Erro ao gerar o relatório</h1>\n<p style=\"color: red;\">{}</p>\n</body>\n</html>\n",
            escape_html(&error.user_friendly_message())
        )
    }
}

impl Renderer for SocialPostRenderer {
    fn render(&self, outcome: &Result<Report>) -> Result<String> {
        match outcome {
            Ok(report) => self.render_report(report),
            Err(e) => Ok(self.render_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CategoryTotal;

    fn report() -> Report {
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
    fn test_format_post_lines() {
        let post = format_post(&report());
        let lines: Vec<&str> = post.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], POST_HEADING);
        assert_eq!(lines[1], "- Categoria: Alimentos, Total de Vendas: R$ 30.00");
        assert_eq!(lines[2], "- Categoria: Eletrônicos, Total de Vendas: R$ 150.00");
    }

    #[test]
    fn test_format_post_rounds_to_two_decimals() {
        let report = Report::new(vec![CategoryTotal {
            category: "Livros".to_string(),
            total: 10.0 / 3.0,
        }]);
        assert!(format_post(&report).ends_with("R$ 3.33"));
    }

    #[test]
    fn test_render_embeds_json_and_post() {
        let html = SocialPostRenderer::new().render(&Ok(report())).unwrap();

        assert!(html.contains("<pre>[\n    {\n        &quot;Categoria&quot;: &quot;Alimentos&quot;"));
        assert!(html.contains("<textarea"));
        assert!(html.contains("- Categoria: Eletrônicos, Total de Vendas: R$ 150.00"));
    }

    #[test]
    fn test_render_error_page() {
        let outcome = Err(EtlError::malformed("CSV header is missing required column 'Valor'"));
        let html = SocialPostRenderer::new().render(&outcome).unwrap();

        assert!(html.contains("Erro ao gerar o relatório"));
        assert!(html.contains("Ocorreu um erro: Malformed input"));
        assert!(!html.contains("<textarea"));
    }
}
