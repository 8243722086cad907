use std::{
    io,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    engine::Engine,
    executor::ExecuteResult,
    types::error::{DatabaseError, Result},
};

/// The engine is single-writer; requests take turns on the mutex.
pub type SharedEngine = Arc<Mutex<Engine>>;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/query", post(query))
        .layer(TraceLayer::new_for_http())
        .with_state(engine)
}

/// Serves `POST /query` until SIGINT/SIGTERM, then closes the engine so
/// every touched page reaches the file.
pub async fn serve(engine: Engine, bind: SocketAddr) -> Result<()> {
    let engine: SharedEngine = Arc::new(Mutex::new(engine));
    let app = router(engine.clone());

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(%bind, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");

    match Arc::try_unwrap(engine) {
        Ok(engine) => engine
            .into_inner()
            .map_err(|_| io::Error::other("engine lock poisoned"))?
            .close(),
        Err(shared) => {
            warn!("engine still referenced after shutdown; flushing in place");
            let mut engine = shared
                .lock()
                .map_err(|_| io::Error::other("engine lock poisoned"))?;
            engine.table_mut().pager_mut().flush()
        }
    }
}

async fn healthz() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

/// Runs the query on the blocking pool so page I/O stays off the async workers.
pub async fn query(State(engine): State<SharedEngine>, Json(request): Json<QueryRequest>) -> Response {
    match tokio::task::spawn_blocking(move || run_query(&engine, &request.query)).await {
        Ok(response) => response,
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("query task failed: {err}")),
    }
}

fn run_query(engine: &SharedEngine, text: &str) -> Response {
    let Ok(mut engine) = engine.lock() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "engine lock poisoned".to_string());
    };

    let statement = match engine.prepare(text) {
        Ok(statement) => statement,
        Err(err) => {
            warn!(query = %text, "rejected query: {err}");
            return error_response(StatusCode::BAD_REQUEST, err.to_string());
        }
    };

    match engine.execute(&statement) {
        Ok(ExecuteResult::Rows(rows)) => Json(rows).into_response(),
        Ok(ExecuteResult::Inserted) => Json(json!({ "status": "success" })).into_response(),
        Err(err) => database_error_response(err),
    }
}

fn database_error_response(err: DatabaseError) -> Response {
    let status = if err.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(status = status.as_u16(), "query failed: {err}");
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("cannot install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}
