//! Employee endpoints — listing and photo upload.

use axum::extract::{Multipart, Path, State};
use axum::Extension;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::employee;
use crate::models::Employee;
use crate::uploads;

#[derive(Serialize)]
pub struct EmployeesResponse {
    pub employees: Vec<Employee>,
}

/// `GET /api/employees` — all employees ordered by name.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
) -> Result<Json<EmployeesResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    let employees = employee::list_employees(&conn)?;
    Ok(Json(EmployeesResponse { employees }))
}

#[derive(Serialize)]
pub struct PhotoResponse {
    pub photo: String,
}

/// `POST /api/employees/:id/photo` — multipart photo upload.
///
/// Expects one `photo` field with a filename. The stored reference is
/// recorded on the employee and served under `/uploads/`.
pub async fn upload_photo(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Path(employee_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<PhotoResponse>, ApiError> {
    let conn = ctx.core.open_db()?;
    if employee::get_employee(&conn, &employee_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Employee not found: {employee_id}"
        )));
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("photo") {
            continue;
        }
        let original_name = field
            .file_name()
            .ok_or(ApiError::BadRequest("photo field has no filename".into()))?
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let filename = uploads::save_photo(&ctx.core.uploads_dir, &original_name, &bytes)?;
        employee::set_employee_photo(&conn, &employee_id, &filename)?;

        return Ok(Json(PhotoResponse { photo: filename }));
    }

    Err(ApiError::BadRequest("missing photo field".into()))
}
