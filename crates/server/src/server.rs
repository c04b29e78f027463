use axum::{
    Router, middleware,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{expenses, identity, reviews};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// The `/api/expenses` routes. Every route requires the development identity
/// headers.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/expenses", post(expenses::create))
        .route("/api/expenses/my-expenses", get(expenses::my_expenses))
        .route("/api/expenses/my-pending", get(expenses::my_pending))
        .route("/api/expenses/my-rejected", get(expenses::my_rejected))
        .route(
            "/api/expenses/pending-manager-approval",
            get(expenses::pending_manager),
        )
        .route(
            "/api/expenses/approved-by-manager",
            get(expenses::approved_by_manager),
        )
        .route("/api/expenses/manager-history", get(expenses::manager_history))
        .route(
            "/api/expenses/pending-finance-approval",
            get(expenses::pending_finance),
        )
        .route(
            "/api/expenses/approved-by-finance",
            get(expenses::approved_by_finance),
        )
        .route("/api/expenses/finance-history", get(expenses::finance_history))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        .route("/api/expenses/{id}/history", get(expenses::history))
        .route("/api/expenses/{id}/approve", post(reviews::approve))
        .route("/api/expenses/{id}/reject", post(reviews::reject))
        .route(
            "/api/expenses/{id}/finance-approve",
            post(reviews::finance_approve),
        )
        .route(
            "/api/expenses/{id}/finance-reject",
            post(reviews::finance_reject),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity::identify,
        ))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
