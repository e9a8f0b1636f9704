//! The endpoint for recording a contribution against a savings goal.

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, Error, database_id::GoalId, models::UserID};

/// The request body for recording a contribution.
///
/// Both fields are required; they are optional here so that their absence
/// can be reported as a validation error rather than a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct CreateContribution {
    /// The goal to contribute to.
    pub goal_id: Option<GoalId>,
    /// The amount to put aside, strictly positive.
    pub monto: Option<f64>,
}

/// A route handler for recording a contribution against a goal.
///
/// The contribution and the goal's current amount are written as one
/// atomic unit; on any failure neither is applied.
pub async fn create_contribution_endpoint(
    State(mut state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Json(request): Json<CreateContribution>,
) -> Result<impl IntoResponse, Error> {
    let goal_id = request.goal_id.ok_or(Error::MissingField("goal_id"))?;
    let amount = request.monto.ok_or(Error::MissingField("monto"))?;

    let contribution = state.service.add_contribution(user_id, goal_id, amount)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Contribution recorded successfully.",
            "data": {
                "monto": contribution.amount,
            },
        })),
    ))
}

#[cfg(test)]
mod create_contribution_endpoint_tests {
    use serde_json::{Value, json};

    use crate::{
        auth::USER_ID_HEADER,
        contribution::test_utils::{create_test_goal, get_test_server},
        endpoints::{self, format_endpoint},
    };

    #[tokio::test]
    async fn create_contribution_updates_the_goal() {
        let server = get_test_server();
        let goal_id = create_test_goal(&server, 1).await;

        let response = server
            .post(endpoints::CONTRIBUTIONS)
            .add_header(USER_ID_HEADER, "1")
            .json(&json!({ "goal_id": goal_id, "monto": 250.0 }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["monto"], 250.0);

        let goal = server
            .get(&format_endpoint(endpoints::GOAL, goal_id))
            .add_header(USER_ID_HEADER, "1")
            .await
            .json::<Value>();
        assert_eq!(goal["data"]["goal"]["current_amount"], 250.0);
    }

    #[tokio::test]
    async fn create_contribution_fails_without_required_fields() {
        let server = get_test_server();
        let goal_id = create_test_goal(&server, 1).await;

        server
            .post(endpoints::CONTRIBUTIONS)
            .add_header(USER_ID_HEADER, "1")
            .json(&json!({ "monto": 250.0 }))
            .await
            .assert_status_bad_request();

        server
            .post(endpoints::CONTRIBUTIONS)
            .add_header(USER_ID_HEADER, "1")
            .json(&json!({ "goal_id": goal_id }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn create_contribution_fails_on_non_positive_amount() {
        let server = get_test_server();
        let goal_id = create_test_goal(&server, 1).await;

        for amount in [0.0, -100.0] {
            server
                .post(endpoints::CONTRIBUTIONS)
                .add_header(USER_ID_HEADER, "1")
                .json(&json!({ "goal_id": goal_id, "monto": amount }))
                .await
                .assert_status_bad_request();
        }

        // A rejected contribution leaves the goal untouched.
        let goal = server
            .get(&format_endpoint(endpoints::GOAL, goal_id))
            .add_header(USER_ID_HEADER, "1")
            .await
            .json::<Value>();
        assert_eq!(goal["data"]["goal"]["current_amount"], 0.0);
    }

    #[tokio::test]
    async fn create_contribution_fails_on_unknown_goal() {
        let server = get_test_server();

        server
            .post(endpoints::CONTRIBUTIONS)
            .add_header(USER_ID_HEADER, "1")
            .json(&json!({ "goal_id": 999, "monto": 100.0 }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn create_contribution_fails_for_non_owner() {
        let server = get_test_server();
        let goal_id = create_test_goal(&server, 1).await;

        server
            .post(endpoints::CONTRIBUTIONS)
            .add_header(USER_ID_HEADER, "2")
            .json(&json!({ "goal_id": goal_id, "monto": 100.0 }))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn create_contribution_requires_an_identity() {
        let server = get_test_server();

        server
            .post(endpoints::CONTRIBUTIONS)
            .json(&json!({ "goal_id": 1, "monto": 100.0 }))
            .await
            .assert_status_unauthorized();
    }
}
