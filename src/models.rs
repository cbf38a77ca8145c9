use serde::{Deserialize, Serialize};

/// A country record. Codes are immutable once stored; only the name,
/// population and square fields may change through edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub short_name: String,
    pub full_name: String,
    pub iso_alpha2: String,
    pub iso_alpha3: String,
    pub iso_numeric: String,
    pub population: i64,
    pub square: f64,
}

/// Request body for creating a country. All fields required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCountryRequest {
    pub short_name: String,
    pub full_name: String,
    pub iso_alpha2: String,
    pub iso_alpha3: String,
    pub iso_numeric: String,
    pub population: i64,
    pub square: f64,
}

impl From<CreateCountryRequest> for Country {
    fn from(req: CreateCountryRequest) -> Self {
        Country {
            short_name: req.short_name,
            full_name: req.full_name,
            iso_alpha2: req.iso_alpha2,
            iso_alpha3: req.iso_alpha3,
            iso_numeric: req.iso_numeric,
            population: req.population,
            square: req.square,
        }
    }
}

/// Request body for PATCH. Absent fields keep their stored values; codes are
/// always copied forward from the stored row, never taken from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCountryRequest {
    pub short_name: Option<String>,
    pub full_name: Option<String>,
    pub population: Option<i64>,
    pub square: Option<f64>,
}

impl UpdateCountryRequest {
    /// Merge this partial update onto an existing record, keeping the
    /// existing codes.
    pub fn apply_to(self, current: &Country) -> Country {
        Country {
            short_name: self.short_name.unwrap_or_else(|| current.short_name.clone()),
            full_name: self.full_name.unwrap_or_else(|| current.full_name.clone()),
            iso_alpha2: current.iso_alpha2.clone(),
            iso_alpha3: current.iso_alpha3.clone(),
            iso_numeric: current.iso_numeric.clone(),
            population: self.population.unwrap_or(current.population),
            square: self.square.unwrap_or(current.square),
        }
    }
}

/// HTML form payload for the create/edit pages. Field names match the form
/// inputs and the JSON shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryForm {
    pub short_name: String,
    pub full_name: String,
    pub iso_alpha2: String,
    pub iso_alpha3: String,
    pub iso_numeric: String,
    pub population: i64,
    pub square: f64,
}

impl From<CountryForm> for Country {
    fn from(form: CountryForm) -> Self {
        Country {
            short_name: form.short_name,
            full_name: form.full_name,
            iso_alpha2: form.iso_alpha2,
            iso_alpha3: form.iso_alpha3,
            iso_numeric: form.iso_numeric,
            population: form.population,
            square: form.square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chile() -> Country {
        Country {
            short_name: "Chile".to_string(),
            full_name: "Republic of Chile".to_string(),
            iso_alpha2: "CL".to_string(),
            iso_alpha3: "CHL".to_string(),
            iso_numeric: "152".to_string(),
            population: 19_000_000,
            square: 756_102.0,
        }
    }

    #[test]
    fn test_country_json_shape() {
        let json = serde_json::to_value(chile()).unwrap();
        assert_eq!(json["shortName"], "Chile");
        assert_eq!(json["fullName"], "Republic of Chile");
        assert_eq!(json["isoAlpha2"], "CL");
        assert_eq!(json["isoAlpha3"], "CHL");
        assert_eq!(json["isoNumeric"], "152");
        assert_eq!(json["population"], 19_000_000);
        assert_eq!(json["square"], 756_102.0);
    }

    #[test]
    fn test_update_request_keeps_codes() {
        let update = UpdateCountryRequest {
            short_name: Some("Chili".to_string()),
            population: Some(20_000_000),
            ..Default::default()
        };
        let merged = update.apply_to(&chile());
        assert_eq!(merged.short_name, "Chili");
        assert_eq!(merged.full_name, "Republic of Chile");
        assert_eq!(merged.iso_alpha2, "CL");
        assert_eq!(merged.iso_alpha3, "CHL");
        assert_eq!(merged.iso_numeric, "152");
        assert_eq!(merged.population, 20_000_000);
        assert_eq!(merged.square, 756_102.0);
    }

    #[test]
    fn test_update_request_empty_is_identity() {
        let merged = UpdateCountryRequest::default().apply_to(&chile());
        assert_eq!(merged, chile());
    }
}
