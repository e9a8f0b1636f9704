//! Defines the coordinator for atomic ledger operations.

use crate::{
    Error,
    database_id::{GoalId, SequenceNumber},
    models::Contribution,
};

/// Applies and reverses contributions as single atomic units.
///
/// Every operation touches two places: the contribution log and the owning
/// goal's current amount. The coordinator guarantees that either both
/// writes commit or neither does, and that two concurrent operations on
/// the same goal can never be assigned the same sequence number.
///
/// No retries happen here; a failed transaction surfaces as an error and
/// the caller decides whether to resubmit the whole call.
pub trait LedgerCoordinator {
    /// Record a contribution of `amount` against `goal_id`.
    ///
    /// The contribution is numbered one past the highest sequence number
    /// ever recorded for the goal (starting at one) and the goal's current
    /// amount is incremented by `amount` in the same transaction.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `amount` is zero or negative
    /// (checked before any storage access), [Error::NotFound] if the goal
    /// does not exist, or [Error::TransactionFailure] if the unit could
    /// not be committed.
    fn apply(&mut self, goal_id: GoalId, amount: f64) -> Result<Contribution, Error>;

    /// Reverse (delete) the contribution identified by
    /// (`goal_id`, `sequence_number`).
    ///
    /// The goal's current amount is decremented by the contribution's
    /// amount and the contribution row is deleted in the same transaction.
    /// The remaining contributions keep their sequence numbers; the freed
    /// number is never reused.
    ///
    /// Returns the deleted contribution's snapshot for caller confirmation.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the contribution or its goal does not
    /// exist, or [Error::TransactionFailure] if the unit could not be
    /// committed.
    fn reverse(
        &mut self,
        goal_id: GoalId,
        sequence_number: SequenceNumber,
    ) -> Result<Contribution, Error>;
}
