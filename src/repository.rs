use async_trait::async_trait;

use crate::error::CountryError;
use crate::models::Country;

/// Storage boundary for country records, independent of the concrete
/// database technology. At most one row can match any given code since
/// all three code columns are unique.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries in row-creation order.
    async fn select_all(&self) -> Result<Vec<Country>, CountryError>;

    /// Look up by a heterogeneous code. The code is classified first and only
    /// the matching column is queried; an unrecognized shape yields `None`.
    async fn select_by_code(&self, code: &str) -> Result<Option<Country>, CountryError>;

    async fn select_by_alpha2(&self, code: &str) -> Result<Option<Country>, CountryError>;

    async fn select_by_alpha3(&self, code: &str) -> Result<Option<Country>, CountryError>;

    async fn select_by_numeric(&self, code: &str) -> Result<Option<Country>, CountryError>;

    /// Persist a new country. Fails with `DuplicatedCode` if any of its three
    /// codes already exists, checked in order alpha2, alpha3, numeric.
    async fn save(&self, country: &Country) -> Result<(), CountryError>;

    /// Overwrite name/population/square on the row matching `code`. The row is
    /// matched by its existing codes; incoming codes colliding with a
    /// different row fail with `DuplicatedCode`.
    async fn update_by_code(&self, code: &str, country: &Country) -> Result<(), CountryError>;

    /// Remove the row matched by any of the three code columns.
    async fn delete_by_code(&self, code: &str) -> Result<(), CountryError>;
}
