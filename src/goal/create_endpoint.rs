//! The endpoint for creating a new savings goal.

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{AppState, Error, models::UserID, service::CreateGoal};

/// A route handler for creating a new savings goal.
///
/// New goals start with a current amount of zero and the `active` status;
/// money is added through the contribution endpoints only.
pub async fn create_goal_endpoint(
    State(mut state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Json(request): Json<CreateGoal>,
) -> Result<impl IntoResponse, Error> {
    let goal = state.service.create_goal(user_id, request)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Goal created successfully.",
            "data": {
                "goal": goal,
            },
        })),
    ))
}
