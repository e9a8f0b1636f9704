//! The endpoint for reversing a previously recorded contribution.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    AppState, Error,
    database_id::{GoalId, SequenceNumber},
    models::UserID,
};

/// A route handler for reversing (deleting) a contribution.
///
/// The contribution keeps its sequence number forever: reversing number 2
/// of {1, 2, 3} leaves {1, 3}, and the next contribution is numbered 4.
/// Responds with the deleted contribution's snapshot for confirmation.
pub async fn delete_contribution_endpoint(
    State(mut state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path((goal_id, sequence_number)): Path<(GoalId, SequenceNumber)>,
) -> Result<impl IntoResponse, Error> {
    let contribution = state
        .service
        .remove_contribution(user_id, goal_id, sequence_number)?;

    Ok(Json(json!({
        "success": true,
        "message": "Contribution deleted successfully.",
        "deleted_contribution": contribution,
    })))
}
