use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;

use crate::code::CodeKind;
use crate::error::CountryError;
use crate::models::Country;
use crate::repository::CountryRepository;

const COUNTRY_COLUMNS: &str =
    "short_name, full_name, iso_alpha2, iso_alpha3, iso_numeric, population, square";

/// Initialize database connection pool with recommended pragmas.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

    // Each pooled connection to an in-memory database is a separate private
    // database, so migrations would only reach one of them. A single
    // connection keeps every caller on the same database.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 10 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(include_str!("../migrations/001_create_countries.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

/// SQLite-backed implementation of the repository. Each operation acquires a
/// pooled connection for its own duration; check-then-write sequences run in
/// a single transaction, with the UNIQUE constraints on the three code
/// columns as the authoritative guard behind the pre-checks.
#[derive(Clone)]
pub struct CountryStorage {
    pool: SqlitePool,
}

impl CountryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn column_for(kind: CodeKind) -> &'static str {
    match kind {
        CodeKind::Alpha2 => "iso_alpha2",
        CodeKind::Alpha3 => "iso_alpha3",
        CodeKind::Numeric => "iso_numeric",
    }
}

async fn fetch_by_column(
    conn: &mut SqliteConnection,
    column: &'static str,
    code: &str,
) -> Result<Option<Country>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM countries WHERE {} = ? LIMIT 1",
        COUNTRY_COLUMNS, column
    );
    sqlx::query_as::<_, Country>(&query)
        .bind(code)
        .fetch_optional(conn)
        .await
}

async fn fetch_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Country>, sqlx::Error> {
    match CodeKind::classify(code) {
        Some(kind) => fetch_by_column(conn, column_for(kind), code).await,
        None => Ok(None),
    }
}

/// Translate a UNIQUE-constraint violation into `DuplicatedCode`, naming the
/// colliding code where the constraint message identifies the column.
fn map_unique_violation(err: sqlx::Error, country: &Country) -> CountryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = db_err.message().to_string();
            let code = if message.contains("iso_alpha2") {
                &country.iso_alpha2
            } else if message.contains("iso_alpha3") {
                &country.iso_alpha3
            } else {
                &country.iso_numeric
            };
            return CountryError::duplicated(code.clone());
        }
    }
    CountryError::Storage(err)
}

#[async_trait]
impl CountryRepository for CountryStorage {
    async fn select_all(&self) -> Result<Vec<Country>, CountryError> {
        let query = format!("SELECT {} FROM countries ORDER BY id", COUNTRY_COLUMNS);
        let countries = sqlx::query_as::<_, Country>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(countries)
    }

    async fn select_by_code(&self, code: &str) -> Result<Option<Country>, CountryError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_by_code(&mut conn, code).await?)
    }

    async fn select_by_alpha2(&self, code: &str) -> Result<Option<Country>, CountryError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_by_column(&mut conn, "iso_alpha2", code).await?)
    }

    async fn select_by_alpha3(&self, code: &str) -> Result<Option<Country>, CountryError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_by_column(&mut conn, "iso_alpha3", code).await?)
    }

    async fn select_by_numeric(&self, code: &str) -> Result<Option<Country>, CountryError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_by_column(&mut conn, "iso_numeric", code).await?)
    }

    async fn save(&self, country: &Country) -> Result<(), CountryError> {
        let mut tx = self.pool.begin().await?;

        if fetch_by_column(&mut tx, "iso_alpha2", &country.iso_alpha2)
            .await?
            .is_some()
        {
            return Err(CountryError::duplicated(country.iso_alpha2.clone()));
        }
        if fetch_by_column(&mut tx, "iso_alpha3", &country.iso_alpha3)
            .await?
            .is_some()
        {
            return Err(CountryError::duplicated(country.iso_alpha3.clone()));
        }
        if fetch_by_column(&mut tx, "iso_numeric", &country.iso_numeric)
            .await?
            .is_some()
        {
            return Err(CountryError::duplicated(country.iso_numeric.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO countries (short_name, full_name, iso_alpha2, iso_alpha3, iso_numeric, population, square)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&country.short_name)
        .bind(&country.full_name)
        .bind(&country.iso_alpha2)
        .bind(&country.iso_alpha3)
        .bind(&country.iso_numeric)
        .bind(country.population)
        .bind(country.square)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, country))?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_by_code(&self, code: &str, country: &Country) -> Result<(), CountryError> {
        let mut tx = self.pool.begin().await?;

        let existing = fetch_by_code(&mut tx, code)
            .await?
            .ok_or_else(|| CountryError::not_found(code))?;

        // Incoming codes may not collide with a different row. With the
        // service layer enforcing immutable codes these checks are vacuous,
        // but the storage contract guards against callers that bypass it.
        if let Some(other) = fetch_by_column(&mut tx, "iso_alpha2", &country.iso_alpha2).await? {
            if other.iso_alpha2 != existing.iso_alpha2 {
                return Err(CountryError::duplicated(country.iso_alpha2.clone()));
            }
        }
        if let Some(other) = fetch_by_column(&mut tx, "iso_alpha3", &country.iso_alpha3).await? {
            if other.iso_alpha3 != existing.iso_alpha3 {
                return Err(CountryError::duplicated(country.iso_alpha3.clone()));
            }
        }
        if let Some(other) = fetch_by_column(&mut tx, "iso_numeric", &country.iso_numeric).await? {
            if other.iso_numeric != existing.iso_numeric {
                return Err(CountryError::duplicated(country.iso_numeric.clone()));
            }
        }

        // The WHERE clause matches on the row's existing codes, never the
        // incoming ones, so codes cannot drift at the storage layer either.
        let result = sqlx::query(
            r#"
            UPDATE countries
            SET short_name = ?, full_name = ?, population = ?, square = ?
            WHERE iso_alpha2 = ? OR iso_alpha3 = ? OR iso_numeric = ?
            "#,
        )
        .bind(&country.short_name)
        .bind(&country.full_name)
        .bind(country.population)
        .bind(country.square)
        .bind(&existing.iso_alpha2)
        .bind(&existing.iso_alpha3)
        .bind(&existing.iso_numeric)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CountryError::not_found(code));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), CountryError> {
        let result = sqlx::query(
            "DELETE FROM countries WHERE iso_alpha2 = ?1 OR iso_alpha3 = ?1 OR iso_numeric = ?1",
        )
        .bind(code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CountryError::not_found(code));
        }
        Ok(())
    }
}
