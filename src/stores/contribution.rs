//! Defines the read surface of the contribution ledger.

use crate::{
    Error,
    database_id::{GoalId, SequenceNumber},
    models::Contribution,
};

/// Handles lookups into a goal's append-only contribution log.
///
/// This trait is read-only on purpose: inserting or deleting a
/// contribution must also adjust the owning goal's current amount, so the
/// write path lives behind the
/// [LedgerCoordinator](crate::stores::LedgerCoordinator), which runs both
/// halves inside one transaction.
pub trait ContributionLedger {
    /// Retrieve the contribution identified by (`goal_id`, `sequence_number`).
    fn get(&self, goal_id: GoalId, sequence_number: SequenceNumber)
    -> Result<Contribution, Error>;

    /// Retrieve all contributions for `goal_id`, newest sequence number
    /// first.
    fn get_by_goal(&self, goal_id: GoalId) -> Result<Vec<Contribution>, Error>;
}
