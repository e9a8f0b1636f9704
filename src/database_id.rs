//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// The ID of a savings goal row.
pub type GoalId = DatabaseID;

/// A per-goal contribution sequence number.
///
/// Sequence numbers start at one, strictly increase within a goal and are
/// never reused, even after the contribution they identify is deleted.
pub type SequenceNumber = i64;
