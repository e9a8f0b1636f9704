//! The goal service facade: request validation, ownership enforcement,
//! and read-side aggregation over the stores.

use serde::Deserialize;

use crate::{
    Error,
    database_id::{GoalId, SequenceNumber},
    date_validation::validate_calendar_date,
    models::{Contribution, Goal, GoalPatch, GoalStatus, NewGoal, UserID},
    stores::{ContributionLedger, GoalStore, LedgerCoordinator},
};

/// A request to create a new savings goal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGoal {
    /// A short name for the goal.
    pub name: Option<String>,
    /// An optional longer description.
    pub description: Option<String>,
    /// The amount of money to put aside, strictly positive.
    pub target_amount: Option<f64>,
    /// The date to reach the target by, as a `YYYY-MM-DD` string.
    pub target_date: Option<String>,
}

/// A sparse update to a savings goal.
///
/// Fields left out of the request body are not modified.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGoal {
    /// Replace the goal's name.
    pub name: Option<String>,
    /// Replace the goal's description.
    pub description: Option<String>,
    /// Replace the goal's target amount.
    pub target_amount: Option<f64>,
    /// Replace the goal's status (`active`, `completed` or `cancelled`).
    pub status: Option<String>,
    /// Replace the goal's target date, as a `YYYY-MM-DD` string.
    pub target_date: Option<String>,
}

/// The read-side view of a goal's contribution log.
///
/// `total` is summed from the listed contributions on demand rather than
/// read from the goal row, so it can be cross-checked against the goal's
/// current amount.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSummary {
    /// The goal's contributions, newest sequence number first.
    pub contributions: Vec<Contribution>,
    /// How many contributions the goal has.
    pub count: usize,
    /// The sum of the listed contribution amounts.
    pub total: f64,
}

/// Validates requests, enforces ownership and sequences calls into the
/// goal store, the contribution ledger and the ledger coordinator.
///
/// Every read goes to the store; the service holds no goal or contribution
/// state of its own.
#[derive(Debug, Clone)]
pub struct GoalService<G, L, C> {
    goals: G,
    ledger: L,
    coordinator: C,
}

impl<G, L, C> GoalService<G, L, C>
where
    G: GoalStore,
    L: ContributionLedger,
    C: LedgerCoordinator,
{
    /// Create a new service over the given stores.
    pub fn new(goals: G, ledger: L, coordinator: C) -> Self {
        Self {
            goals,
            ledger,
            coordinator,
        }
    }

    /// Create a new goal owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::MissingField] when a required field is absent or
    /// blank, [Error::InvalidAmount] for a non-positive target amount, or
    /// [Error::InvalidDate] when the target date is not a calendar date.
    pub fn create_goal(&mut self, user_id: UserID, request: CreateGoal) -> Result<Goal, Error> {
        let name = request
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(Error::MissingField("name"))?;

        let target_amount = request
            .target_amount
            .ok_or(Error::MissingField("target_amount"))?;

        if target_amount <= 0.0 {
            return Err(Error::InvalidAmount);
        }

        let raw_target_date = request
            .target_date
            .ok_or(Error::MissingField("target_date"))?;
        let target_date = validate_calendar_date(&raw_target_date)?;

        self.goals.create(NewGoal {
            user_id,
            name,
            description: request.description,
            target_amount,
            target_date,
        })
    }

    /// Retrieve the goal `goal_id`, checking that `user_id` owns it.
    pub fn get_goal(&self, user_id: UserID, goal_id: GoalId) -> Result<Goal, Error> {
        self.owned_goal(user_id, goal_id)
    }

    /// Retrieve all goals owned by `user_id`.
    pub fn goals_for_user(&self, user_id: UserID) -> Result<Vec<Goal>, Error> {
        self.goals.get_by_user(user_id)
    }

    /// Retrieve the goals owned by `user_id` with the status named by
    /// `raw_status`.
    pub fn goals_by_status(&self, user_id: UserID, raw_status: &str) -> Result<Vec<Goal>, Error> {
        let status = GoalStatus::parse(raw_status)?;

        self.goals.get_by_status(user_id, status)
    }

    /// Retrieve the goals owned by `user_id` whose name contains
    /// `fragment`.
    pub fn goals_by_name(&self, user_id: UserID, fragment: &str) -> Result<Vec<Goal>, Error> {
        self.goals.get_by_name(user_id, fragment)
    }

    /// Apply a sparse update to the goal `goal_id`.
    ///
    /// Validation happens before any store access: an update without
    /// fields, an unknown status or an invalid date are all rejected
    /// without touching the goal.
    pub fn update_goal(
        &mut self,
        user_id: UserID,
        goal_id: GoalId,
        request: UpdateGoal,
    ) -> Result<Goal, Error> {
        let status = request.status.map(|raw| GoalStatus::parse(&raw)).transpose()?;
        let target_date = request
            .target_date
            .map(|raw| validate_calendar_date(&raw))
            .transpose()?;

        if let Some(target_amount) = request.target_amount
            && target_amount <= 0.0
        {
            return Err(Error::InvalidAmount);
        }

        let patch = GoalPatch {
            name: request.name,
            description: request.description,
            target_amount: request.target_amount,
            status,
            target_date,
        };

        if patch.is_empty() {
            return Err(Error::EmptyUpdate);
        }

        self.owned_goal(user_id, goal_id)?;

        self.goals.update_fields(goal_id, patch)
    }

    /// Delete the goal `goal_id` and, transitively, its contribution log.
    pub fn delete_goal(&mut self, user_id: UserID, goal_id: GoalId) -> Result<(), Error> {
        self.owned_goal(user_id, goal_id)?;

        self.goals.delete(goal_id)
    }

    /// Record a contribution of `amount` against the goal `goal_id`.
    pub fn add_contribution(
        &mut self,
        user_id: UserID,
        goal_id: GoalId,
        amount: f64,
    ) -> Result<Contribution, Error> {
        if amount <= 0.0 {
            return Err(Error::InvalidAmount);
        }

        self.owned_goal(user_id, goal_id)?;

        self.coordinator.apply(goal_id, amount)
    }

    /// Reverse the contribution (`goal_id`, `sequence_number`), returning
    /// the deleted contribution's snapshot.
    pub fn remove_contribution(
        &mut self,
        user_id: UserID,
        goal_id: GoalId,
        sequence_number: SequenceNumber,
    ) -> Result<Contribution, Error> {
        self.owned_goal(user_id, goal_id)?;

        self.coordinator.reverse(goal_id, sequence_number)
    }

    /// Summarize the contribution log of the goal `goal_id`.
    pub fn contributions_for_goal(
        &self,
        user_id: UserID,
        goal_id: GoalId,
    ) -> Result<ContributionSummary, Error> {
        self.owned_goal(user_id, goal_id)?;

        let contributions = self.ledger.get_by_goal(goal_id)?;
        let total = contributions
            .iter()
            .map(|contribution| contribution.amount)
            .sum();

        Ok(ContributionSummary {
            count: contributions.len(),
            total,
            contributions,
        })
    }

    fn owned_goal(&self, user_id: UserID, goal_id: GoalId) -> Result<Goal, Error> {
        let goal = self.goals.get(goal_id)?;

        if goal.user_id != user_id {
            return Err(Error::Forbidden);
        }

        Ok(goal)
    }
}

#[cfg(test)]
mod goal_service_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{Goal, UserID},
        stores::{
            ContributionLedger,
            sqlite::{SQLiteContributionLedger, SQLiteGoalStore, SQLiteLedgerCoordinator},
        },
    };

    use super::{CreateGoal, GoalService, UpdateGoal};

    type TestService =
        GoalService<SQLiteGoalStore, SQLiteContributionLedger, SQLiteLedgerCoordinator>;

    fn owner() -> UserID {
        UserID::new(1)
    }

    fn intruder() -> UserID {
        UserID::new(2)
    }

    fn get_test_service() -> TestService {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        GoalService::new(
            SQLiteGoalStore::new(connection.clone()),
            SQLiteContributionLedger::new(connection.clone()),
            SQLiteLedgerCoordinator::new(connection),
        )
    }

    fn create_test_goal(service: &mut TestService) -> Goal {
        service
            .create_goal(
                owner(),
                CreateGoal {
                    name: Some("Emergency fund".to_owned()),
                    description: None,
                    target_amount: Some(1_000.0),
                    target_date: Some("2027-06-30".to_owned()),
                },
            )
            .unwrap()
    }

    #[test]
    fn create_goal_rejects_missing_fields() {
        let mut service = get_test_service();

        let missing_name = service.create_goal(
            owner(),
            CreateGoal {
                target_amount: Some(100.0),
                target_date: Some("2027-06-30".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(missing_name, Err(Error::MissingField("name")));

        let blank_name = service.create_goal(
            owner(),
            CreateGoal {
                name: Some("   ".to_owned()),
                target_amount: Some(100.0),
                target_date: Some("2027-06-30".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(blank_name, Err(Error::MissingField("name")));

        let missing_amount = service.create_goal(
            owner(),
            CreateGoal {
                name: Some("Emergency fund".to_owned()),
                target_date: Some("2027-06-30".to_owned()),
                ..Default::default()
            },
        );
        assert_eq!(missing_amount, Err(Error::MissingField("target_amount")));

        assert_eq!(service.goals_for_user(owner()), Ok(vec![]));
    }

    #[test]
    fn create_goal_rejects_invalid_target_date() {
        let mut service = get_test_service();

        let result = service.create_goal(
            owner(),
            CreateGoal {
                name: Some("Emergency fund".to_owned()),
                target_amount: Some(100.0),
                target_date: Some("2027-02-30".to_owned()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(Error::InvalidDate(_))));
        assert_eq!(service.goals_for_user(owner()), Ok(vec![]));
    }

    #[test]
    fn non_owner_cannot_touch_goal() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);

        assert_eq!(service.get_goal(intruder(), goal.id), Err(Error::Forbidden));
        assert_eq!(
            service.add_contribution(intruder(), goal.id, 50.0),
            Err(Error::Forbidden)
        );
        assert_eq!(
            service.remove_contribution(intruder(), goal.id, 1),
            Err(Error::Forbidden)
        );
        assert_eq!(
            service.contributions_for_goal(intruder(), goal.id),
            Err(Error::Forbidden)
        );
        assert_eq!(service.delete_goal(intruder(), goal.id), Err(Error::Forbidden));
    }

    #[test]
    fn add_contribution_rejects_non_positive_amount_before_mutation() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);

        assert_eq!(
            service.add_contribution(owner(), goal.id, 0.0),
            Err(Error::InvalidAmount)
        );
        assert_eq!(
            service.add_contribution(owner(), goal.id, -5.0),
            Err(Error::InvalidAmount)
        );

        let summary = service.contributions_for_goal(owner(), goal.id).unwrap();
        assert_eq!(summary.count, 0);
        assert_eq!(service.get_goal(owner(), goal.id).unwrap().current_amount, 0.0);
    }

    #[test]
    fn contribution_summary_matches_the_aggregate() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);

        service.add_contribution(owner(), goal.id, 200.0).unwrap();
        service.add_contribution(owner(), goal.id, 300.0).unwrap();

        let summary = service.contributions_for_goal(owner(), goal.id).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 500.0);
        // The on-demand total must agree with the stored running amount.
        assert_eq!(
            summary.total,
            service.get_goal(owner(), goal.id).unwrap().current_amount
        );
    }

    #[test]
    fn update_goal_rejects_empty_patch_before_store_access() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);

        assert_eq!(
            service.update_goal(owner(), goal.id, UpdateGoal::default()),
            Err(Error::EmptyUpdate)
        );
        // Even for a goal that does not exist, validation comes first.
        assert_eq!(
            service.update_goal(owner(), goal.id + 1, UpdateGoal::default()),
            Err(Error::EmptyUpdate)
        );
    }

    #[test]
    fn update_goal_rejects_unknown_status() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);

        let result = service.update_goal(
            owner(),
            goal.id,
            UpdateGoal {
                status: Some("paused".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(result, Err(Error::InvalidStatus("paused".to_owned())));
    }

    #[test]
    fn update_goal_never_touches_current_amount() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);
        service.add_contribution(owner(), goal.id, 150.0).unwrap();

        let updated = service
            .update_goal(
                owner(),
                goal.id,
                UpdateGoal {
                    name: Some("Bigger fund".to_owned()),
                    target_amount: Some(5_000.0),
                    status: Some("completed".to_owned()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.current_amount, 150.0);
    }

    #[test]
    fn delete_goal_removes_its_contribution_log() {
        let mut service = get_test_service();
        let goal = create_test_goal(&mut service);
        service.add_contribution(owner(), goal.id, 100.0).unwrap();
        service.add_contribution(owner(), goal.id, 50.0).unwrap();

        service.delete_goal(owner(), goal.id).unwrap();

        assert_eq!(service.get_goal(owner(), goal.id), Err(Error::NotFound));
        assert_eq!(service.ledger.get_by_goal(goal.id), Ok(vec![]));
    }
}
