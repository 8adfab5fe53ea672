//! Service catalog endpoints.

use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::service;
use crate::models::Service;

#[derive(Serialize)]
pub struct ServicesResponse {
    pub services: Vec<Service>,
}

/// `GET /api/services` — the catalog, ordered by name.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
) -> Result<Json<ServicesResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let services = service::list_services(&conn)?;
    Ok(Json(ServicesResponse { services }))
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub duration_minutes: i64,
    pub price_cents: i64,
}

/// `POST /api/services` — add a service to the catalog.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<Service>, ApiError> {
    if payload.duration_minutes <= 0 {
        return Err(ApiError::BadRequest("duration must be positive".into()));
    }
    if payload.price_cents < 0 {
        return Err(ApiError::BadRequest("price cannot be negative".into()));
    }

    let conn = ctx.core.open_db()?;
    let new_service = Service {
        id: Uuid::new_v4(),
        name: payload.name,
        duration_minutes: payload.duration_minutes,
        price_cents: payload.price_cents,
    };
    service::insert_service(&conn, &new_service)?;

    Ok(Json(new_service))
}
