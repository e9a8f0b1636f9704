//! The endpoint for deleting a savings goal.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{AppState, Error, database_id::GoalId, models::UserID};

/// A route handler for deleting a goal.
///
/// The goal's contribution log is deleted with it.
pub async fn delete_goal_endpoint(
    State(mut state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(goal_id): Path<GoalId>,
) -> Result<impl IntoResponse, Error> {
    state.service.delete_goal(user_id, goal_id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Goal deleted successfully.",
    })))
}
