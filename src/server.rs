use crate::core::etl::EtlEngine;
use crate::core::Pipeline;
use crate::render::{Renderer, RendererKind, SocialPostRenderer, TemplateRenderer};
use crate::utils::error::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 每個請求共用的狀態：管道與兩個渲染器都只建立一次
pub struct AppState<P: Pipeline> {
    engine: EtlEngine<P>,
    default_renderer: RendererKind,
    template: TemplateRenderer,
    social: SocialPostRenderer,
}

impl<P: Pipeline> AppState<P> {
    pub fn new(engine: EtlEngine<P>, default_renderer: RendererKind) -> Result<Self> {
        Ok(Self {
            engine,
            default_renderer,
            template: TemplateRenderer::new()?,
            social: SocialPostRenderer::new(),
        })
    }

    fn renderer(&self, kind: RendererKind) -> &dyn Renderer {
        match kind {
            RendererKind::Template => &self.template,
            RendererKind::Social => &self.social,
        }
    }

    /// 跑完整個管道再渲染；管道失敗仍回 200 與錯誤頁
    async fn handle(&self, kind: RendererKind) -> Response {
        let outcome = self.engine.run().await;

        if let Err(e) = &outcome {
            tracing::error!(
                "❌ Report pipeline failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        }

        match self.renderer(kind).render(&outcome) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("❌ Failed to render {:?} page: {}", kind, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!("<h1>Erro interno</h1><p>{}</p>", tera::escape_html(&e.to_string()))),
                )
                    .into_response()
            }
        }
    }
}

pub fn router<P: Pipeline + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index::<P>))
        .route("/social", get(social::<P>))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn index<P: Pipeline + 'static>(State(state): State<Arc<AppState<P>>>) -> Response {
    state.handle(state.default_renderer).await
}

async fn social<P: Pipeline + 'static>(State(state): State<Arc<AppState<P>>>) -> Response {
    state.handle(RendererKind::Social).await
}

async fn health_check() -> &'static str {
    "ok"
}
