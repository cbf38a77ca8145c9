use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::CountryError;
use crate::models::{Country, CreateCountryRequest, UpdateCountryRequest};
use crate::state::AppState;

/// GET /api - Server status.
pub async fn status(headers: HeaderMap) -> Json<serde_json::Value> {
    let host = headers
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");
    Json(serde_json::json!({
        "status": "server is running",
        "host": host,
        "protocol": "http",
    }))
}

/// GET /api/ping
pub async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "pong" }))
}

/// GET /api/country - List all countries in creation order.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Country>>, CountryError> {
    let countries = state.scenarios.get_all().await?;
    Ok(Json(countries))
}

/// GET /api/country/{code} - Get one country by any of its three codes.
pub async fn get_one(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Country>, CountryError> {
    let country = state.scenarios.get(&code).await?;
    Ok(Json(country))
}

/// POST /api/country - Store a new country. Responds 204 on success.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCountryRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, "Invalid JSON in request body").into_response()
        }
    };

    let country = Country::from(req);
    match state.scenarios.store(&country).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// PATCH /api/country/{code} - Update name/population/square. Absent fields
/// keep their stored values; codes are copied forward from the stored row.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<UpdateCountryRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, "Invalid JSON in request body").into_response()
        }
    };

    let current = match state.scenarios.get(&code).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    let updated = req.apply_to(&current);
    match state.scenarios.edit(&code, &updated).await {
        Ok(()) => Json(updated).into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /api/country/{code} - Remove a country. Responds 204 on success.
pub async fn remove(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, CountryError> {
    state.scenarios.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
