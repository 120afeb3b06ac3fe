use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use refind::model::ItemKind;
use refind::{compute_matches, MatchCandidate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Matching response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub success: bool,
    pub total_matches: usize,
    pub matches: Vec<MatchCandidate>,
}

/// Compute ranked lost/found candidate pairings (admin)
///
/// Loads both active report sets and runs the scoring heuristic over every
/// (lost, found) pair. Candidates are recomputed on every call and never
/// stored; an empty result is a normal outcome when either active set is
/// empty or no pair scores above zero.
pub async fn list_matches(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let lost = state.store.list_active(ItemKind::Lost);
    let found = state.store.list_active(ItemKind::Found);

    let matches = compute_matches(&lost, &found);

    metrics::counter!("refind_match_computations_total").increment(1);
    tracing::debug!(
        lost = lost.len(),
        found = found.len(),
        candidates = matches.len(),
        "computed match candidates"
    );

    Ok(Json(MatchesResponse {
        success: true,
        total_matches: matches.len(),
        matches,
    }))
}

/// Reunite request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReuniteRequest {
    pub lost_item_id: String,
    pub found_item_id: String,
}

/// Mark a lost/found pair as reunited (admin)
///
/// Both records are resolved atomically in memory and cross-linked with a
/// snapshot of their counterpart; a missing id on either side returns 404
/// without mutating anything.
pub async fn reunite_items(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ReuniteRequest>,
) -> ServerResult<impl IntoResponse> {
    let (lost_item, found_item) = state
        .store
        .reunite(&request.lost_item_id, &request.found_item_id)?;

    metrics::counter!("refind_reunites_total").increment(1);

    Ok(Json(json!({
        "success": true,
        "message": "Items marked as reunited successfully",
        "lostItem": lost_item,
        "foundItem": found_item,
    })))
}
