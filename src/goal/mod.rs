//! Endpoints for creating, reading, updating and deleting savings goals.

mod create_endpoint;
mod delete_endpoint;
mod get_endpoints;
mod update_endpoint;

pub use create_endpoint::create_goal_endpoint;
pub use delete_endpoint::delete_goal_endpoint;
pub use get_endpoints::{
    get_goal_endpoint, get_goals_by_name_endpoint, get_goals_by_state_endpoint,
    get_goals_endpoint,
};
pub use update_endpoint::update_goal_endpoint;
