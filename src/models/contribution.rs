//! This file defines the type `Contribution`, one entry in a goal's
//! append-only event log.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::database_id::{GoalId, SequenceNumber};

/// One immutable monetary event recorded against a goal.
///
/// Contributions are created and deleted only through the ledger
/// coordinator so the owning goal's current amount always matches the sum
/// of its live contributions. They are never updated in place.
///
/// The `nro_contribution` and `monto` wire names are part of the public
/// API contract and are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// The ID of the goal this contribution was applied to.
    pub goal_id: GoalId,
    /// The contribution's position in its goal's event log.
    #[serde(rename = "nro_contribution")]
    pub sequence_number: SequenceNumber,
    /// The amount of money put aside, always strictly positive.
    #[serde(rename = "monto")]
    pub amount: f64,
    /// The day the contribution was made.
    pub date: Date,
    /// When the contribution row was created.
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod contribution_tests {
    use time::macros::{date, datetime};

    use super::Contribution;

    #[test]
    fn serializes_with_the_api_wire_names() {
        let contribution = Contribution {
            goal_id: 7,
            sequence_number: 3,
            amount: 125.5,
            date: date!(2025 - 11 - 02),
            created_at: datetime!(2025-11-02 09:30:00 UTC),
        };

        let value = serde_json::to_value(&contribution).unwrap();

        assert_eq!(value["goal_id"], 7);
        assert_eq!(value["nro_contribution"], 3);
        assert_eq!(value["monto"], 125.5);
        assert_eq!(value["date"], "2025-11-02");
    }
}
