//! HTTP inference service: one immutable [`InferenceContext`], an explicit
//! route table, and a warm-up call before the listener binds.

mod config;
mod context;
mod openapi;
mod routes;
#[cfg(test)]
mod testing;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use qingxu_ai::OnnxEmotionModel;
use qingxu_core::AnalysisError;
use tokio::net::TcpListener;
use tracing::info;

pub use config::{
    DEFAULT_HOST, DEFAULT_MODEL_DIR, DEFAULT_PORT, DEFAULT_WARMUP_TEXT, ServiceConfig,
};
pub use context::InferenceContext;
pub use routes::{ApiError, router};

/// Load the checkpoint and run the warm-up call.
///
/// Any error here is a start-up failure: the caller must not begin serving.
pub fn load_context(config: &ServiceConfig) -> Result<InferenceContext, AnalysisError> {
    let model = OnnxEmotionModel::load(&config.model_dir, &config.encoder)?;
    let ctx = InferenceContext::new(Box::new(model));
    ctx.warm_up(&config.warmup_text)?;
    Ok(ctx)
}

/// Start the service and run until ctrl-c.
pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    info!(model_dir = %config.model_dir.display(), "loading model");
    let load_config = config.clone();
    let ctx = tokio::task::spawn_blocking(move || load_context(&load_config))
        .await
        .context("model loading task panicked")??;

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("bind {}:{}", config.host, config.port))?;

    serve_on(listener, Arc::new(ctx), shutdown_signal())
        .await
        .context("server error")
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(
    listener: TcpListener,
    ctx: Arc<InferenceContext>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "emotion analysis service listening");
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_context_fails_without_checkpoint() {
        let config = ServiceConfig {
            model_dir: std::env::temp_dir().join("qingxu-no-such-model"),
            ..ServiceConfig::default()
        };
        let err = load_context(&config).err().unwrap();
        assert!(matches!(err, AnalysisError::Startup(_)));
    }

    #[tokio::test]
    async fn serve_fails_without_checkpoint() {
        let config = ServiceConfig {
            host: "127.0.0.1".into(),
            port: 0,
            model_dir: std::env::temp_dir().join("qingxu-no-such-model"),
            ..ServiceConfig::default()
        };
        let err = serve(config).await.unwrap_err();
        assert!(err.to_string().contains("model.onnx"));
    }
}
