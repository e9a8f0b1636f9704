//! The endpoints for reading savings goals.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, Error, database_id::GoalId, models::UserID};

/// A route handler for getting a goal by its database ID.
pub async fn get_goal_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(goal_id): Path<GoalId>,
) -> Result<impl IntoResponse, Error> {
    let goal = state.service.get_goal(user_id, goal_id)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "goal": goal,
        },
    })))
}

/// A route handler for listing the authenticated user's goals.
pub async fn get_goals_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
) -> Result<impl IntoResponse, Error> {
    let goals = state.service.goals_for_user(user_id)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "count": goals.len(),
            "goals": goals,
        },
    })))
}

/// The query string for filtering goals by status.
#[derive(Debug, Deserialize)]
pub struct StateQuery {
    /// The status to filter by (`active`, `completed` or `cancelled`).
    pub status: Option<String>,
}

/// A route handler for listing the authenticated user's goals with a given
/// status.
pub async fn get_goals_by_state_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<StateQuery>,
) -> Result<impl IntoResponse, Error> {
    let status = query.status.ok_or(Error::MissingField("status"))?;
    let goals = state.service.goals_by_status(user_id, &status)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "count": goals.len(),
            "status": status,
            "goals": goals,
        },
    })))
}

/// The query string for filtering goals by name.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    /// The name fragment to search for.
    pub name: Option<String>,
}

/// A route handler for listing the authenticated user's goals whose name
/// contains the queried fragment.
pub async fn get_goals_by_name_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<NameQuery>,
) -> Result<impl IntoResponse, Error> {
    let name = query.name.ok_or(Error::MissingField("name"))?;
    let goals = state.service.goals_by_name(user_id, &name)?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "count": goals.len(),
            "goals": goals,
        },
    })))
}
