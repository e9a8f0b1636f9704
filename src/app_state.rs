//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    service::GoalService,
    stores::sqlite::{SQLiteContributionLedger, SQLiteGoalStore, SQLiteLedgerCoordinator},
};

/// The goal service over the SQLite backed stores.
pub type SqliteGoalService =
    GoalService<SQLiteGoalStore, SQLiteContributionLedger, SQLiteLedgerCoordinator>;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The goal service facade used by the route handlers.
    pub service: SqliteGoalService,
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            service: GoalService::new(
                SQLiteGoalStore::new(connection.clone()),
                SQLiteContributionLedger::new(connection.clone()),
                SQLiteLedgerCoordinator::new(connection.clone()),
            ),
            db_connection: connection,
        })
    }
}
