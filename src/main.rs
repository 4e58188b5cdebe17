use clap::Parser;
use report_etl::config::{LogFormat, StorageBackend};
use report_etl::core::Storage;
use report_etl::server::{self, AppState};
use report_etl::utils::logger;
use report_etl::{EtlEngine, LocalStorage, PipelineSettings, ReportPipeline, ServerConfig};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    // 初始化日誌
    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting report-server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    // 啟動前驗證，缺少桶名稱時直接結束
    let settings = match config.pipeline_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "📁 Landing zone: {}/{}, processed zone: {}/{}",
        settings.landing_bucket,
        settings.source_key,
        settings.processed_bucket,
        settings.report_key
    );

    match config.storage_backend {
        StorageBackend::Local => {
            // 驗證已確保 local_root 存在
            let root = config.local_root.clone().unwrap_or_default();
            tracing::info!("Using local storage rooted at {}", root);
            serve(LocalStorage::new(root), settings, &config).await
        }
        #[cfg(feature = "s3")]
        StorageBackend::S3 => {
            let s3_settings = report_etl::S3Settings {
                region: config.s3_region.clone(),
                endpoint_url: config.s3_endpoint_url.clone(),
            };
            let storage = report_etl::S3Storage::from_settings(&s3_settings).await;
            serve(storage, settings, &config).await
        }
        #[cfg(not(feature = "s3"))]
        StorageBackend::S3 => {
            eprintln!("❌ This build was compiled without the `s3` feature; use --storage-backend local");
            std::process::exit(1);
        }
    }
}

async fn serve<S: Storage + 'static>(
    storage: S,
    settings: PipelineSettings,
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = ReportPipeline::new(storage, settings);
    let state = AppState::new(EtlEngine::new(pipeline), config.renderer)?;
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "🚀 Listening on {} (renderer for /: {:?})",
        listener.local_addr()?,
        config.renderer
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
