//! The endpoint for updating a savings goal's fields.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{AppState, Error, database_id::GoalId, models::UserID, service::UpdateGoal};

/// A route handler for applying a sparse update to a goal.
///
/// Only the fields present in the request body are changed. The current
/// amount cannot be updated here; it belongs to the ledger.
pub async fn update_goal_endpoint(
    State(mut state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(goal_id): Path<GoalId>,
    Json(request): Json<UpdateGoal>,
) -> Result<impl IntoResponse, Error> {
    let goal = state.service.update_goal(user_id, goal_id, request)?;

    Ok(Json(json!({
        "success": true,
        "message": "Goal updated successfully.",
        "data": {
            "goal": goal,
        },
    })))
}
