//! The endpoint for listing a goal's contributions.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{AppState, Error, database_id::GoalId, models::UserID};

/// A route handler for listing a goal's contributions, newest first,
/// together with their count and total.
///
/// The total is summed from the listed contributions rather than read from
/// the goal row, so callers can cross-check it against the goal's current
/// amount.
pub async fn get_contributions_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(goal_id): Path<GoalId>,
) -> Result<impl IntoResponse, Error> {
    let summary = state.service.contributions_for_goal(user_id, goal_id)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "contributions": summary.contributions,
        },
        "count": summary.count,
        "total": summary.total,
    })))
}
