use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use refind::model::{is_valid_category, ItemDraft, ItemKind};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query parameters for the listing endpoints
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Optional status filter; `active` limits output to unresolved reports
    #[serde(default)]
    pub status: Option<String>,
}

/// Report a lost item
pub async fn report_lost(
    State(state): State<Arc<ServerState>>,
    Json(draft): Json<ItemDraft>,
) -> ServerResult<impl IntoResponse> {
    submit_report(&state, ItemKind::Lost, draft)
}

/// Report a found item
pub async fn report_found(
    State(state): State<Arc<ServerState>>,
    Json(draft): Json<ItemDraft>,
) -> ServerResult<impl IntoResponse> {
    submit_report(&state, ItemKind::Found, draft)
}

fn submit_report(
    state: &ServerState,
    kind: ItemKind,
    draft: ItemDraft,
) -> ServerResult<impl IntoResponse> {
    if !draft.has_required_fields() {
        return Err(ServerError::BadRequest(
            "All required fields must be provided".to_string(),
        ));
    }

    if !is_valid_category(&draft.category) {
        return Err(ServerError::BadRequest(format!(
            "Unknown category: {}",
            draft.category
        )));
    }

    let item = state.store.insert(kind, draft)?;

    metrics::counter!("refind_reports_total", "kind" => kind.as_str()).increment(1);

    let message = match kind {
        ItemKind::Lost => "Lost item reported successfully",
        ItemKind::Found => "Found item reported successfully",
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": message,
            "item": item,
        })),
    ))
}

/// List lost reports
pub async fn list_lost(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListItemsQuery>,
) -> ServerResult<impl IntoResponse> {
    list_reports(&state, ItemKind::Lost, query)
}

/// List found reports
pub async fn list_found(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListItemsQuery>,
) -> ServerResult<impl IntoResponse> {
    list_reports(&state, ItemKind::Found, query)
}

fn list_reports(
    state: &ServerState,
    kind: ItemKind,
    query: ListItemsQuery,
) -> ServerResult<impl IntoResponse> {
    let items = match query.status.as_deref() {
        Some("active") => state.store.list_active(kind),
        Some(other) => {
            return Err(ServerError::BadRequest(format!(
                "Unknown status filter: {other}"
            )))
        }
        None => state.store.list(kind),
    };

    Ok(Json(json!({
        "success": true,
        "items": items,
    })))
}
