//! Endpoints for the goal contribution ledger.

mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use create_endpoint::create_contribution_endpoint;
pub use delete_endpoint::delete_contribution_endpoint;
pub use list_endpoint::get_contributions_endpoint;

#[cfg(test)]
pub(crate) mod test_utils {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, auth::USER_ID_HEADER, build_router, endpoints};

    pub fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(connection).expect("Could not initialize database.");

        TestServer::new(build_router(state))
    }

    /// Create a goal via the API for the user `user_id` and return its ID.
    pub async fn create_test_goal(server: &TestServer, user_id: i64) -> i64 {
        let response = server
            .post(endpoints::GOALS)
            .add_header(USER_ID_HEADER, user_id.to_string())
            .json(&json!({
                "name": "Emergency fund",
                "target_amount": 1000.0,
                "target_date": "2027-06-30",
            }))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);

        response.json::<serde_json::Value>()["data"]["goal"]["id"]
            .as_i64()
            .expect("goal id missing from response")
    }
}
