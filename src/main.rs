// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, process, sync::Arc, time::Duration};

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use offramp_server::{
    api::router,
    config::{AppConfig, TlsConfig},
    offramp::{initialize_with_config, OfframpProviderRegistry},
    state::AppState,
    telemetry::init_tracing,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };

    init_tracing(config.log_format, &config.log_filter);

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            process::exit(1);
        }
    };

    let registry = Arc::new(OfframpProviderRegistry::new());
    let registered = initialize_with_config(&registry, &config.offramp);
    info!(registered, "Offramp providers initialized");

    if config.admin_api_token.is_none() {
        warn!("ADMIN_API_TOKEN not set; admin routes are disabled");
    }

    let state = AppState::new(registry, config.admin_api_token.clone());
    let app = router(state);

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let result = match &config.tls {
        Some(tls) => serve_tls(app, addr, tls, shutdown).await,
        None => serve_plain(app, addr, shutdown).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Server failed");
        process::exit(1);
    }
    info!("Server stopped");
}

async fn serve_plain(app: Router, addr: SocketAddr, shutdown: CancellationToken) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Offramp server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
        })
        .await
}

async fn serve_tls(
    app: Router,
    addr: SocketAddr,
    tls: &TlsConfig,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    // Must be installed before any TLS config is built. Fails only if a
    // provider is already installed, which is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
    info!(
        %addr,
        cert = %tls.cert_path.display(),
        "Offramp server listening on https://{addr} (docs at /docs)"
    );

    let handle = axum_server::Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            shutdown.cancelled().await;
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
    });

    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
}

/// Cancel `token` on Ctrl+C or SIGTERM.
async fn wait_for_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
    token.cancel();
}
