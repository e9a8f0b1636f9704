//! Defines the store for savings goals.

use crate::{
    Error,
    database_id::GoalId,
    models::{Goal, GoalPatch, GoalStatus, NewGoal, UserID},
};

/// Handles the creation and retrieval of savings goal aggregates.
///
/// The goal's current amount is out of bounds for this store: it is read
/// here but only ever written by the
/// [LedgerCoordinator](crate::stores::LedgerCoordinator).
pub trait GoalStore {
    /// Create a new goal in the store with a current amount of zero.
    fn create(&mut self, goal: NewGoal) -> Result<Goal, Error>;

    /// Retrieve a goal by its `id`.
    fn get(&self, id: GoalId) -> Result<Goal, Error>;

    /// Retrieve all goals owned by `user_id`.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Goal>, Error>;

    /// Retrieve the goals owned by `user_id` that have `status`.
    fn get_by_status(&self, user_id: UserID, status: GoalStatus) -> Result<Vec<Goal>, Error>;

    /// Retrieve the goals owned by `user_id` whose name contains `fragment`.
    fn get_by_name(&self, user_id: UserID, fragment: &str) -> Result<Vec<Goal>, Error>;

    /// Apply a sparse `patch` to the goal `id`, leaving absent fields
    /// untouched, and refresh the goal's updated-at timestamp.
    fn update_fields(&mut self, id: GoalId, patch: GoalPatch) -> Result<Goal, Error>;

    /// Delete the goal `id` along with its contribution log.
    fn delete(&mut self, id: GoalId) -> Result<(), Error>;
}
