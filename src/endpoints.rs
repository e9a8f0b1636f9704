//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/goals/{goal_id}', use [format_endpoint].

/// The route to create a goal or list the caller's goals.
pub const GOALS: &str = "/goals";
/// The route to access a single goal.
pub const GOAL: &str = "/goals/{goal_id}";
/// The route to filter the caller's goals by status.
pub const GOALS_BY_STATE: &str = "/goals/filter/state";
/// The route to filter the caller's goals by name.
pub const GOALS_BY_NAME: &str = "/goals/filter/name";
/// The route to record a contribution against a goal.
pub const CONTRIBUTIONS: &str = "/goals/contribution";
/// The route to reverse a single contribution.
pub const CONTRIBUTION: &str = "/goals/contribution/{goal_id}/{nro_contribution}";
/// The route to list a goal's contributions.
pub const CONTRIBUTIONS_BY_GOAL: &str = "/goals/contribution/goal/{goal_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/goals/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
