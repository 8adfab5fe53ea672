//! Client endpoints — the client book with per-client visit history.

use axum::extract::{Query, State};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::repository::client::{self, VisitRecord};
use crate::models::Client;

#[derive(Deserialize)]
pub struct ClientsQuery {
    /// Substring filter on the client name.
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct ClientWithHistory {
    #[serde(flatten)]
    pub client: Client,
    pub history: Vec<VisitRecord>,
}

#[derive(Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<ClientWithHistory>,
}

/// `GET /api/clients?name=…` — clients with their merged visit history
/// (active appointments plus finalized ones), newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Query(query): Query<ClientsQuery>,
) -> Result<Json<ClientsResponse>, ApiError> {
    let conn = ctx.core.open_db()?;

    let mut clients = Vec::new();
    for record in client::list_clients(&conn, query.name.as_deref())? {
        let history = client::visit_history(&conn, &record.id)?;
        clients.push(ClientWithHistory {
            client: record,
            history,
        });
    }

    Ok(Json(ClientsResponse { clients }))
}
