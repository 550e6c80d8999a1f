use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::Router as AxumRouter;

use quorumkv_core::{Error, Payload, RecordID};
use quorumkv_rpc::{GrpcNodeClient, GrpcRouterClient};

pub type AppFrontend = quorumkv_core::Frontend<GrpcNodeClient, GrpcRouterClient, quorumkv_core::RendezvousFinder>;

/// Small HTTP surface over the frontend's quorum operations, so a plain
/// HTTP client can exercise Put/Get/Del without speaking gRPC.
pub fn router(frontend: Arc<AppFrontend>) -> AxumRouter {
    AxumRouter::new()
        .route("/records/{id}", put(put_record))
        .route("/records/{id}", get(get_record))
        .route("/records/{id}", delete(del_record))
        .with_state(frontend)
}

async fn put_record(State(frontend): State<Arc<AppFrontend>>, Path(id): Path<u64>, body: Bytes) -> Response {
    match frontend.put(RecordID(id), Payload::from(body.to_vec())) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_record(State(frontend): State<Arc<AppFrontend>>, Path(id): Path<u64>) -> Response {
    match frontend.get(RecordID(id)) {
        Ok(payload) => (StatusCode::OK, payload.0.to_vec()).into_response(),
        Err(e) => error_response(e),
    }
}

async fn del_record(State(frontend): State<Arc<AppFrontend>>, Path(id): Path<u64>) -> Response {
    match frontend.del(RecordID(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: Error) -> Response {
    let status = match err {
        Error::RecordExists => StatusCode::CONFLICT,
        Error::RecordNotFound => StatusCode::NOT_FOUND,
        Error::NotEnoughDaemons | Error::QuorumNotReached => StatusCode::SERVICE_UNAVAILABLE,
        Error::UnknownDaemon => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, err.to_string()).into_response()
}
