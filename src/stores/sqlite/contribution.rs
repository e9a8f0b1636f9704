//! Implements the SQLite backed contribution ledger and its
//! transaction-scoped write helpers.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{GoalId, SequenceNumber},
    db::{CreateTable, MapRow},
    models::Contribution,
    stores::ContributionLedger,
};

/// Looks up contribution events in a goal's append-only log.
#[derive(Debug, Clone)]
pub struct SQLiteContributionLedger {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteContributionLedger {
    /// Create a new ledger from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CreateTable for SQLiteContributionLedger {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS goal_contribution (
                goal_id INTEGER NOT NULL,
                sequence_number INTEGER NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (goal_id, sequence_number),
                FOREIGN KEY (goal_id) REFERENCES goal(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteContributionLedger {
    type ReturnType = Contribution;

    fn map_row_with_offset(
        row: &rusqlite::Row,
        offset: usize,
    ) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Contribution {
            goal_id: row.get(offset)?,
            sequence_number: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            date: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
        })
    }
}

impl ContributionLedger for SQLiteContributionLedger {
    fn get(
        &self,
        goal_id: GoalId,
        sequence_number: SequenceNumber,
    ) -> Result<Contribution, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        select_contribution(&connection, goal_id, sequence_number).map_err(|error| error.into())
    }

    fn get_by_goal(&self, goal_id: GoalId) -> Result<Vec<Contribution>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT goal_id, sequence_number, amount, date, created_at \
                    FROM goal_contribution WHERE goal_id = :goal_id \
                    ORDER BY sequence_number DESC",
            )?
            .query_map(&[(":goal_id", &goal_id)], SQLiteContributionLedger::map_row)?
            .map(|maybe_contribution| maybe_contribution.map_err(|error| error.into()))
            .collect()
    }
}

// The write half of the ledger. These helpers take a plain connection
// reference so the coordinator can run them inside its transaction; the
// sequence number lookup and the insert must never be split across two
// transactions.

pub(crate) fn next_sequence_number(
    connection: &Connection,
    goal_id: GoalId,
) -> Result<SequenceNumber, rusqlite::Error> {
    connection.query_row(
        "SELECT COALESCE(MAX(sequence_number), 0) + 1 FROM goal_contribution \
            WHERE goal_id = :goal_id",
        &[(":goal_id", &goal_id)],
        |row| row.get(0),
    )
}

pub(crate) fn insert_contribution(
    connection: &Connection,
    goal_id: GoalId,
    sequence_number: SequenceNumber,
    amount: f64,
) -> Result<Contribution, rusqlite::Error> {
    let created_at = OffsetDateTime::now_utc();
    let date = created_at.date();

    connection.execute(
        "INSERT INTO goal_contribution (goal_id, sequence_number, amount, date, created_at) \
            VALUES (?1, ?2, ?3, ?4, ?5)",
        (goal_id, sequence_number, amount, date, created_at),
    )?;

    // Read the row back so the caller sees the values exactly as stored.
    select_contribution(connection, goal_id, sequence_number)
}

pub(crate) fn select_contribution(
    connection: &Connection,
    goal_id: GoalId,
    sequence_number: SequenceNumber,
) -> Result<Contribution, rusqlite::Error> {
    connection
        .prepare(
            "SELECT goal_id, sequence_number, amount, date, created_at \
                FROM goal_contribution \
                WHERE goal_id = :goal_id AND sequence_number = :sequence_number",
        )?
        .query_row(
            &[(":goal_id", &goal_id), (":sequence_number", &sequence_number)],
            SQLiteContributionLedger::map_row,
        )
}

pub(crate) fn delete_contribution(
    connection: &Connection,
    goal_id: GoalId,
    sequence_number: SequenceNumber,
) -> Result<usize, rusqlite::Error> {
    connection.execute(
        "DELETE FROM goal_contribution \
            WHERE goal_id = :goal_id AND sequence_number = :sequence_number",
        &[(":goal_id", &goal_id), (":sequence_number", &sequence_number)],
    )
}

#[cfg(test)]
mod sqlite_contribution_ledger_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        models::{NewGoal, UserID},
        stores::{ContributionLedger, GoalStore},
        stores::sqlite::SQLiteGoalStore,
    };

    use super::{SQLiteContributionLedger, insert_contribution};

    fn get_test_ledger() -> (SQLiteContributionLedger, i64) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let goal = SQLiteGoalStore::new(connection.clone())
            .create(NewGoal {
                user_id: UserID::new(1),
                name: "Emergency fund".to_owned(),
                description: None,
                target_amount: 1_000.0,
                target_date: date!(2027 - 06 - 30),
            })
            .unwrap();

        (SQLiteContributionLedger::new(connection), goal.id)
    }

    #[test]
    fn get_returns_inserted_contribution() {
        let (ledger, goal_id) = get_test_ledger();
        let inserted = {
            let connection = ledger.connection.lock().unwrap();
            insert_contribution(&connection, goal_id, 1, 50.0).unwrap()
        };

        let selected = ledger.get(goal_id, 1).unwrap();

        assert_eq!(inserted, selected);
    }

    #[test]
    fn get_fails_on_unknown_sequence_number() {
        let (ledger, goal_id) = get_test_ledger();

        assert_eq!(ledger.get(goal_id, 1), Err(Error::NotFound));
    }

    #[test]
    fn get_by_goal_returns_newest_sequence_first() {
        let (ledger, goal_id) = get_test_ledger();
        {
            let connection = ledger.connection.lock().unwrap();
            for sequence_number in 1..=3 {
                insert_contribution(&connection, goal_id, sequence_number, 10.0).unwrap();
            }
        }

        let contributions = ledger.get_by_goal(goal_id).unwrap();

        let sequence_numbers: Vec<i64> = contributions
            .iter()
            .map(|contribution| contribution.sequence_number)
            .collect();
        assert_eq!(sequence_numbers, vec![3, 2, 1]);
    }

    #[test]
    fn get_by_goal_returns_empty_list_for_goal_without_contributions() {
        let (ledger, goal_id) = get_test_ledger();

        assert_eq!(ledger.get_by_goal(goal_id), Ok(vec![]));
    }
}
