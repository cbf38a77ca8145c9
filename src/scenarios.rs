use crate::code::{is_valid_code, CodeKind};
use crate::error::CountryError;
use crate::models::Country;
use crate::repository::CountryRepository;

const BAD_CODE_FORMAT: &str =
    "Code format is invalid. Expected 2-letter, 3-letter, or numeric code.";

/// Use-case layer over the repository. Holds no state of its own; every call
/// round-trips to storage.
#[derive(Clone)]
pub struct CountryScenarios<R: CountryRepository> {
    repository: R,
}

impl<R: CountryRepository> CountryScenarios<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Country>, CountryError> {
        self.repository.select_all().await
    }

    pub async fn get(&self, code: &str) -> Result<Country, CountryError> {
        if !is_valid_code(code) {
            return Err(CountryError::invalid_code(code, BAD_CODE_FORMAT));
        }

        self.repository
            .select_by_code(code)
            .await?
            .ok_or_else(|| CountryError::not_found(code))
    }

    pub async fn store(&self, country: &Country) -> Result<(), CountryError> {
        Self::validate_codes(country)?;
        Self::validate_fields(country)?;
        self.repository.save(country).await
    }

    pub async fn edit(&self, code: &str, country: &Country) -> Result<(), CountryError> {
        if !is_valid_code(code) {
            return Err(CountryError::invalid_code(code, BAD_CODE_FORMAT));
        }

        let current = self
            .repository
            .select_by_code(code)
            .await?
            .ok_or_else(|| CountryError::not_found(code))?;

        // Codes are immutable post-creation. The HTTP layer copies the stored
        // codes forward, so this normally never fires; it stays as a
        // service-boundary invariant for callers that construct their own
        // Country values.
        if country.iso_alpha2 != current.iso_alpha2
            || country.iso_alpha3 != current.iso_alpha3
            || country.iso_numeric != current.iso_numeric
        {
            return Err(CountryError::invalid_code(
                code,
                "Country codes cannot be changed during update.",
            ));
        }

        Self::validate_fields(country)?;
        self.repository.update_by_code(code, country).await
    }

    pub async fn delete(&self, code: &str) -> Result<(), CountryError> {
        if !is_valid_code(code) {
            return Err(CountryError::invalid_code(code, BAD_CODE_FORMAT));
        }

        if self.repository.select_by_code(code).await?.is_none() {
            return Err(CountryError::not_found(code));
        }

        self.repository.delete_by_code(code).await
    }

    /// Each code field must match its own kind exactly; a well-formed code of
    /// the wrong kind (an alpha-3 in the alpha-2 field, letters in the
    /// numeric field) is as invalid as garbage.
    fn validate_codes(country: &Country) -> Result<(), CountryError> {
        if CodeKind::classify(&country.iso_alpha2) != Some(CodeKind::Alpha2) {
            return Err(CountryError::invalid_code(
                &country.iso_alpha2,
                "isoAlpha2 format is invalid.",
            ));
        }
        if CodeKind::classify(&country.iso_alpha3) != Some(CodeKind::Alpha3) {
            return Err(CountryError::invalid_code(
                &country.iso_alpha3,
                "isoAlpha3 format is invalid.",
            ));
        }
        if CodeKind::classify(&country.iso_numeric) != Some(CodeKind::Numeric) {
            return Err(CountryError::invalid_code(
                &country.iso_numeric,
                "isoNumeric format is invalid.",
            ));
        }
        Ok(())
    }

    /// Field checks shared by store and edit, fail-fast in a fixed order.
    fn validate_fields(country: &Country) -> Result<(), CountryError> {
        if country.short_name.is_empty() {
            return Err(CountryError::invalid_code(
                "shortName",
                "shortName cannot be empty.",
            ));
        }
        if country.full_name.is_empty() {
            return Err(CountryError::invalid_code(
                "fullName",
                "fullName cannot be empty.",
            ));
        }
        if country.population < 0 {
            return Err(CountryError::invalid_code(
                "population",
                "population cannot be negative.",
            ));
        }
        if country.square < 0.0 {
            return Err(CountryError::invalid_code(
                "square",
                "square cannot be negative.",
            ));
        }
        Ok(())
    }
}
