use answer_dns_application::ReloadAnswersUseCase;
use std::sync::Arc;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Reloads the answers file on every SIGHUP. Failures are logged by the use case
/// and the previous answers stay installed.
#[cfg(unix)]
pub fn spawn_reload_on_signal(reload: Arc<ReloadAnswersUseCase>) -> anyhow::Result<JoinHandle<()>> {
    let mut hangup = signal::unix::signal(signal::unix::SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            info!("Received SIGHUP, reloading answers");
            let _ = reload.execute().await;
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_reload_on_signal(_reload: Arc<ReloadAnswersUseCase>) -> anyhow::Result<JoinHandle<()>> {
    info!("Signal-triggered reload is not available on this platform");
    Ok(tokio::spawn(std::future::pending()))
}

/// Wait for SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
