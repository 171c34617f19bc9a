//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{infrastructure::registry::ConnectionRegistry, usecase::DispatchCommandUseCase};

use super::{
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket broadcast server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(registry, dispatch_command_usecase);
/// server.run("127.0.0.1", 8080).await?;
/// ```
pub struct Server {
    /// ConnectionRegistry（接続中のクライアント）
    registry: Arc<ConnectionRegistry>,
    /// DispatchCommandUseCase（受信メッセージのコマンド処理のユースケース）
    dispatch_command_usecase: Arc<DispatchCommandUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        dispatch_command_usecase: Arc<DispatchCommandUseCase>,
    ) -> Self {
        Self {
            registry,
            dispatch_command_usecase,
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            registry: self.registry.clone(),
            dispatch_command_usecase: self.dispatch_command_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the WebSocket broadcast server until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Broadcast server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
