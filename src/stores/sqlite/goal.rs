//! Implements a SQLite backed goal store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, types::ToSql};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::GoalId,
    db::{CreateTable, MapRow},
    models::{Goal, GoalPatch, GoalStatus, NewGoal, UserID},
    stores::GoalStore,
};

/// Create and retrieve savings goals.
#[derive(Debug, Clone)]
pub struct SQLiteGoalStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGoalStore {
    /// Create a new store from the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CreateTable for SQLiteGoalStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                target_amount REAL NOT NULL CHECK (target_amount > 0),
                current_amount REAL NOT NULL DEFAULT 0 CHECK (current_amount >= 0),
                status TEXT NOT NULL DEFAULT 'active',
                start_date TEXT NOT NULL,
                target_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteGoalStore {
    type ReturnType = Goal;

    fn map_row_with_offset(
        row: &rusqlite::Row,
        offset: usize,
    ) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_status: String = row.get(offset + 6)?;
        let status = GoalStatus::parse(&raw_status).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 6,
                rusqlite::types::Type::Text,
                format!("invalid goal status \"{raw_status}\"").into(),
            )
        })?;

        Ok(Goal {
            id: row.get(offset)?,
            user_id: UserID::new(row.get(offset + 1)?),
            name: row.get(offset + 2)?,
            description: row.get(offset + 3)?,
            target_amount: row.get(offset + 4)?,
            current_amount: row.get(offset + 5)?,
            status,
            start_date: row.get(offset + 7)?,
            target_date: row.get(offset + 8)?,
            created_at: row.get(offset + 9)?,
            updated_at: row.get(offset + 10)?,
        })
    }
}

const GOAL_COLUMNS: &str = "id, user_id, name, description, target_amount, current_amount, \
    status, start_date, target_date, created_at, updated_at";

fn select_goal(connection: &Connection, id: GoalId) -> Result<Goal, Error> {
    let goal = connection
        .prepare(&format!("SELECT {GOAL_COLUMNS} FROM goal WHERE id = :id"))?
        .query_row(&[(":id", &id)], SQLiteGoalStore::map_row)?;

    Ok(goal)
}

impl GoalStore for SQLiteGoalStore {
    fn create(&mut self, goal: NewGoal) -> Result<Goal, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let now = OffsetDateTime::now_utc();
        let start_date = now.date();

        connection.execute(
            "INSERT INTO goal (user_id, name, description, target_amount, current_amount, \
                status, start_date, target_date, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, 0, 'active', ?5, ?6, ?7, ?7)",
            (
                goal.user_id.as_i64(),
                &goal.name,
                goal.description.as_deref(),
                goal.target_amount,
                start_date,
                goal.target_date,
                now,
            ),
        )?;

        // Read the row back so the caller sees the values exactly as
        // stored.
        select_goal(&connection, connection.last_insert_rowid())
    }

    fn get(&self, id: GoalId) -> Result<Goal, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        select_goal(&connection, id)
    }

    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Goal>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(&format!(
                "SELECT {GOAL_COLUMNS} FROM goal WHERE user_id = :user_id ORDER BY start_date DESC"
            ))?
            .query_map(&[(":user_id", &user_id.as_i64())], SQLiteGoalStore::map_row)?
            .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
            .collect()
    }

    fn get_by_status(&self, user_id: UserID, status: GoalStatus) -> Result<Vec<Goal>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(&format!(
                "SELECT {GOAL_COLUMNS} FROM goal WHERE user_id = ?1 AND status = ?2"
            ))?
            .query_map(
                (user_id.as_i64(), status.as_str()),
                SQLiteGoalStore::map_row,
            )?
            .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
            .collect()
    }

    fn get_by_name(&self, user_id: UserID, fragment: &str) -> Result<Vec<Goal>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(&format!(
                "SELECT {GOAL_COLUMNS} FROM goal \
                    WHERE user_id = ?1 AND name LIKE '%' || ?2 || '%'"
            ))?
            .query_map((user_id.as_i64(), fragment), SQLiteGoalStore::map_row)?
            .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
            .collect()
    }

    fn update_fields(&mut self, id: GoalId, patch: GoalPatch) -> Result<Goal, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let mut clauses = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = patch.name {
            clauses.push("name = ?");
            values.push(Box::new(name));
        }

        if let Some(description) = patch.description {
            clauses.push("description = ?");
            values.push(Box::new(description));
        }

        if let Some(target_amount) = patch.target_amount {
            clauses.push("target_amount = ?");
            values.push(Box::new(target_amount));
        }

        if let Some(status) = patch.status {
            clauses.push("status = ?");
            values.push(Box::new(status.as_str()));
        }

        if let Some(target_date) = patch.target_date {
            clauses.push("target_date = ?");
            values.push(Box::new(target_date));
        }

        if clauses.is_empty() {
            return Err(Error::EmptyUpdate);
        }

        clauses.push("updated_at = ?");
        values.push(Box::new(OffsetDateTime::now_utc()));
        values.push(Box::new(id));

        let sql = format!("UPDATE goal SET {} WHERE id = ?", clauses.join(", "));
        let params: Vec<&dyn ToSql> = values.iter().map(|value| value.as_ref()).collect();

        let rows_updated = connection.execute(&sql, &params[..])?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        select_goal(&connection, id)
    }

    fn delete(&mut self, id: GoalId) -> Result<(), Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;

        let rows_deleted = connection.execute("DELETE FROM goal WHERE id = :id", &[(":id", &id)])?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
