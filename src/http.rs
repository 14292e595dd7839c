use crate::backend::AppointmentBackend;
use crate::error::StoreError;
use crate::types::AppointmentTime;
use axum::extract::Path;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum::{
    routing::{delete, get},
    Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use validator::Validate;

lazy_static! {
    static ref TIME_PATTERN: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2} (1?\d|2[0-3]):00$").expect("valid time pattern");
    static ref NON_BLANK: Regex = Regex::new(r"\S").expect("valid name pattern");
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct CreateAppointmentRequest {
    #[validate(regex(path = *TIME_PATTERN))]
    time: String,
    #[validate(regex(path = *NON_BLANK))]
    name: String,
}

#[derive(Clone)]
struct AppState<T> {
    appointments: T,
}

/// Serves the three appointment operations on top of any backend.
pub fn create_app<T: AppointmentBackend + Clone>(backend: T) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        appointments: backend,
    };

    Router::new()
        .route(
            "/api/appointments",
            get(get_appointments::<T>).post(create_appointment::<T>),
        )
        .route("/api/appointments/:time", delete(remove_appointment::<T>))
        .with_state(state)
        .layer(cors)
}

fn store_error_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Network(_) | StoreError::InvalidUrl(_) | StoreError::Status(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

async fn get_appointments<T: AppointmentBackend + Clone>(
    State(state): State<AppState<T>>,
) -> impl IntoResponse {
    match state.appointments.list_all().await {
        Ok(appointments) => Json(appointments).into_response(),
        Err(err) => {
            error!(%err, "Failed to list appointments");
            (store_error_status(&err), err.to_string()).into_response()
        }
    }
}

async fn create_appointment<T: AppointmentBackend + Clone>(
    State(state): State<AppState<T>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> impl IntoResponse {
    if let Err(err) = request.validate() {
        return (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response();
    }
    let time: AppointmentTime = match request.time.parse() {
        Ok(time) => time,
        Err(err) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, format!("{err}")).into_response();
        }
    };

    match state.appointments.create(time, request.name).await {
        Ok(appointment) => {
            info!(%time, "Appointment booked");
            (StatusCode::CREATED, Json(appointment)).into_response()
        }
        Err(err) => (store_error_status(&err), err.to_string()).into_response(),
    }
}

async fn remove_appointment<T: AppointmentBackend + Clone>(
    State(state): State<AppState<T>>,
    Path(time): Path<String>,
) -> impl IntoResponse {
    let time: AppointmentTime = match time.parse() {
        Ok(time) => time,
        Err(err) => return (StatusCode::BAD_REQUEST, format!("{err}")).into_response(),
    };

    match state.appointments.remove(time).await {
        Ok(()) => {
            info!(%time, "Appointment cancelled");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => (store_error_status(&err), err.to_string()).into_response(),
    }
}
