//! Implements the SQLite backed ledger coordinator, the only writer of
//! contribution rows and goal balances.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, TransactionBehavior};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{GoalId, SequenceNumber},
    models::Contribution,
    stores::LedgerCoordinator,
};

use super::contribution::{
    delete_contribution, insert_contribution, next_sequence_number, select_contribution,
};

/// Applies and reverses contributions as single atomic units.
///
/// Each operation opens an immediate transaction, which takes SQLite's
/// write lock up front. Together with the shared connection this
/// serializes ledger mutations, so two concurrent `apply` calls on the
/// same goal can never compute the same sequence number.
#[derive(Debug, Clone)]
pub struct SQLiteLedgerCoordinator {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerCoordinator {
    /// Create a new coordinator from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl LedgerCoordinator for SQLiteLedgerCoordinator {
    fn apply(&mut self, goal_id: GoalId, amount: f64) -> Result<Contribution, Error> {
        // Rejected before any storage access, leaving the goal and its log
        // untouched.
        if amount <= 0.0 {
            return Err(Error::InvalidAmount);
        }

        let mut connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let transaction =
            connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let sequence_number = next_sequence_number(&transaction, goal_id)?;
        let contribution = insert_contribution(&transaction, goal_id, sequence_number, amount)?;

        let rows_updated = transaction.execute(
            "UPDATE goal SET current_amount = current_amount + ?2, updated_at = ?3 \
                WHERE id = ?1",
            (goal_id, amount, OffsetDateTime::now_utc()),
        )?;

        if rows_updated == 0 {
            // Dropping the transaction rolls back the contribution insert.
            return Err(Error::NotFound);
        }

        transaction
            .commit()
            .map_err(|error| Error::TransactionFailure(error.to_string()))?;

        Ok(contribution)
    }

    fn reverse(
        &mut self,
        goal_id: GoalId,
        sequence_number: SequenceNumber,
    ) -> Result<Contribution, Error> {
        let mut connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        let transaction =
            connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let contribution = select_contribution(&transaction, goal_id, sequence_number)?;

        let rows_updated = transaction.execute(
            "UPDATE goal SET current_amount = current_amount - ?2, updated_at = ?3 \
                WHERE id = ?1",
            (goal_id, contribution.amount, OffsetDateTime::now_utc()),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        delete_contribution(&transaction, goal_id, sequence_number)?;

        transaction
            .commit()
            .map_err(|error| Error::TransactionFailure(error.to_string()))?;

        Ok(contribution)
    }
}
