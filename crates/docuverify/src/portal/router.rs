use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

use super::service::{ConsentRequest, PortalService, PortalServiceError};
use super::session::{NavigationRequest, SessionId};

/// Router builder exposing the wizard, review, and payment modal endpoints.
pub fn portal_router(service: Arc<PortalService>) -> Router {
    Router::new()
        .route("/api/v1/portal/sessions", post(create_handler))
        .route(
            "/api/v1/portal/sessions/:session_id",
            get(session_handler).delete(discard_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/sections/:section",
            put(section_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/navigation",
            post(navigation_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/consent",
            put(consent_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/finalize",
            post(finalize_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/review",
            get(review_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/payment",
            get(payment_handler).delete(close_payment_handler),
        )
        .route(
            "/api/v1/portal/sessions/:session_id/payment/mount",
            post(mount_payment_handler),
        )
        .with_state(service)
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, PortalServiceError>) -> Response {
    match result {
        Ok(view) => (status, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn create_handler(State(service): State<Arc<PortalService>>) -> Response {
    (StatusCode::CREATED, Json(service.create())).into_response()
}

pub(crate) async fn session_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.get(&SessionId(session_id)))
}

pub(crate) async fn discard_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    match service.discard(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub(crate) async fn section_handler(
    State(service): State<Arc<PortalService>>,
    Path((session_id, section)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    respond(
        StatusCode::OK,
        service.update_section(&SessionId(session_id), &section, body),
    )
}

pub(crate) async fn navigation_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
    Json(request): Json<NavigationRequest>,
) -> Response {
    respond(
        StatusCode::OK,
        service.navigate(&SessionId(session_id), request),
    )
}

pub(crate) async fn consent_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
    Json(request): Json<ConsentRequest>,
) -> Response {
    respond(
        StatusCode::OK,
        service.set_consent(&SessionId(session_id), request),
    )
}

pub(crate) async fn finalize_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.finalize(&SessionId(session_id)))
}

pub(crate) async fn review_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.review(&SessionId(session_id)))
}

pub(crate) async fn mount_payment_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(
        StatusCode::OK,
        service.mount_payment_container(&SessionId(session_id)),
    )
}

pub(crate) async fn payment_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.payment(&SessionId(session_id)))
}

pub(crate) async fn close_payment_handler(
    State(service): State<Arc<PortalService>>,
    Path(session_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.close_payment(&SessionId(session_id)))
}
