//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    auth::identity_guard,
    contribution::{
        create_contribution_endpoint, delete_contribution_endpoint, get_contributions_endpoint,
    },
    endpoints,
    goal::{
        create_goal_endpoint, delete_goal_endpoint, get_goal_endpoint,
        get_goals_by_name_endpoint, get_goals_by_state_endpoint, get_goals_endpoint,
        update_goal_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
///
/// Every route requires a verified caller identity (see [crate::auth]);
/// requests without one are rejected with 401 before reaching a handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::GOALS,
            post(create_goal_endpoint).get(get_goals_endpoint),
        )
        .route(endpoints::GOALS_BY_STATE, get(get_goals_by_state_endpoint))
        .route(endpoints::GOALS_BY_NAME, get(get_goals_by_name_endpoint))
        .route(endpoints::CONTRIBUTIONS, post(create_contribution_endpoint))
        .route(endpoints::CONTRIBUTION, delete(delete_contribution_endpoint))
        .route(
            endpoints::CONTRIBUTIONS_BY_GOAL,
            get(get_contributions_endpoint),
        )
        .route(
            endpoints::GOAL,
            get(get_goal_endpoint)
                .put(update_goal_endpoint)
                .delete(delete_goal_endpoint),
        )
        .layer(middleware::from_fn(identity_guard))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
