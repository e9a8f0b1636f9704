//! This file defines the type `Goal`, the aggregate side of the savings
//! ledger: a target amount paired with a running current amount.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, database_id::GoalId, models::UserID};

/// The lifecycle state of a savings goal.
///
/// The status is only ever set by the goal's owner; reaching the target
/// amount does not change it automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// The goal is being saved towards.
    Active,
    /// The owner marked the goal as achieved.
    Completed,
    /// The owner abandoned the goal.
    Cancelled,
}

impl GoalStatus {
    /// The status as the lowercase string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status from its lowercase string form.
    ///
    /// # Errors
    /// Returns [Error::InvalidStatus] if `raw` does not name a status.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        match raw {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" => Ok(GoalStatus::Cancelled),
            _ => Err(Error::InvalidStatus(raw.to_owned())),
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A savings objective with a target amount and a running current amount.
///
/// `current_amount` is written only by the ledger coordinator and is always
/// equal to the sum of the goal's recorded contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// The ID of the goal.
    pub id: GoalId,
    /// The ID of the user that owns this goal.
    pub user_id: UserID,
    /// A short name for the goal, e.g. "New laptop".
    pub name: String,
    /// An optional longer description.
    pub description: Option<String>,
    /// The amount of money the owner wants to put aside.
    pub target_amount: f64,
    /// The running sum of the goal's contributions.
    pub current_amount: f64,
    /// The lifecycle state of the goal.
    pub status: GoalStatus,
    /// When saving towards the goal started.
    pub start_date: Date,
    /// When the owner wants to reach the target amount.
    pub target_date: Date,
    /// When the goal row was created.
    pub created_at: OffsetDateTime,
    /// When the goal row was last written to.
    pub updated_at: OffsetDateTime,
}

/// The data needed to create a new [Goal].
///
/// New goals always start with a current amount of zero and the `active`
/// status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    /// The ID of the user that will own the goal.
    pub user_id: UserID,
    /// A short name for the goal.
    pub name: String,
    /// An optional longer description.
    pub description: Option<String>,
    /// The amount of money the owner wants to put aside.
    pub target_amount: f64,
    /// When the owner wants to reach the target amount.
    pub target_date: Date,
}

/// A sparse update to a [Goal].
///
/// Fields set to `None` are left untouched by
/// [GoalStore::update_fields](crate::stores::GoalStore::update_fields); the
/// update is a partial patch, never a full replace. The current amount is
/// deliberately absent: it belongs to the ledger coordinator alone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GoalPatch {
    /// Replace the goal's name.
    pub name: Option<String>,
    /// Replace the goal's description.
    pub description: Option<String>,
    /// Replace the goal's target amount.
    pub target_amount: Option<f64>,
    /// Replace the goal's status.
    pub status: Option<GoalStatus>,
    /// Replace the goal's target date.
    pub target_date: Option<Date>,
}

impl GoalPatch {
    /// Whether the patch leaves every field untouched.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.target_amount.is_none()
            && self.status.is_none()
            && self.target_date.is_none()
    }
}
