use sqlx::SqlitePool;
use std::sync::Arc;

use crate::db::CountryStorage;
use crate::scenarios::CountryScenarios;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub scenarios: Arc<CountryScenarios<CountryStorage>>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let scenarios = CountryScenarios::new(CountryStorage::new(pool));
        Self {
            scenarios: Arc::new(scenarios),
        }
    }
}
