//! Endpoint handlers.
//!
//! Every handler is a single read over the preloaded tables, except
//! `download`, which also writes a file.

use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::http::download::{self, DownloadRequest, GeneratedFile};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::lookup::{self, CinemaInfo, CityInfo, DistrictInfo, OptionPair, DISTRICT_COLUMN};

/// Form with a `district` field.
#[derive(Debug, Deserialize)]
pub struct DistrictForm {
    pub district: String,
}

/// Form with a `city` field.
#[derive(Debug, Deserialize)]
pub struct CityForm {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    #[serde(rename = "Hello")]
    pub hello: String,
}

#[derive(Debug, Serialize)]
pub struct DateResponse {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct ProvincesResponse {
    pub provinces: String,
}

pub async fn root() -> Json<Greeting> {
    Json(Greeting {
        hello: "Veneto".to_string(),
    })
}

pub async fn select_districts(State(state): State<AppState>) -> Json<Vec<OptionPair>> {
    let districts = lookup::unique_values(&state.datasets.venues, DISTRICT_COLUMN);
    tracing::debug!(count = districts.len(), "Districts listed");
    Json(lookup::option_pairs(districts))
}

pub async fn get_district(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<DistrictInfo> {
    let info = lookup::district(&name, &state.datasets.venues);
    tracing::debug!(district = %name, rows = info.district_info.len(), "District lookup");
    Json(info)
}

pub async fn select_cities(
    State(state): State<AppState>,
    Form(form): Form<DistrictForm>,
) -> Json<Vec<OptionPair>> {
    let cities = lookup::cities_in_district(&form.district, &state.datasets.venues);
    tracing::debug!(district = %form.district, count = cities.len(), "Cities listed");
    Json(lookup::option_pairs(cities))
}

pub async fn get_city(State(state): State<AppState>, Path(name): Path<String>) -> Json<CityInfo> {
    let info = lookup::city(&name, &state.datasets.venues);
    tracing::debug!(city = %name, rows = info.city_info.len(), "City lookup");
    Json(info)
}

pub async fn select_theater(
    State(state): State<AppState>,
    Form(form): Form<CityForm>,
) -> Json<Vec<OptionPair>> {
    let venues = lookup::theaters(&form.city, &state.datasets.venues);
    tracing::debug!(city = %form.city, count = venues.len(), "Venues listed");
    Json(lookup::option_pairs(venues))
}

pub async fn get_cinema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<CinemaInfo> {
    let info = lookup::cinema(&name, &state.datasets.cinemas);
    tracing::debug!(city = %name, rows = info.cinema_info.len(), "Cinema lookup");
    Json(info)
}

pub async fn select_cinemas(
    State(state): State<AppState>,
    Form(form): Form<CityForm>,
) -> Json<Vec<OptionPair>> {
    let cinemas = lookup::cinemas_in_city(&form.city, &state.datasets.cinemas);
    Json(lookup::option_pairs(cinemas))
}

pub async fn get_provinces(State(state): State<AppState>) -> Json<ProvincesResponse> {
    Json(ProvincesResponse {
        provinces: lookup::province_names(&state.datasets.venues),
    })
}

pub async fn download(
    State(state): State<AppState>,
    Form(form): Form<DownloadRequest>,
) -> Result<GeneratedFile, ApiError> {
    let details = lookup::venue_rows(&form.selected_option, &form.city, &state.datasets.venues);
    let output_dir = FsPath::new(&state.downloads.output_dir);

    let file = download::write_file(output_dir, &form, &details)
        .await
        .map_err(|e| {
            tracing::error!(
                venue = %form.selected_option,
                output_dir = %output_dir.display(),
                error = %e,
                "Failed to generate download"
            );
            ApiError::internal(format!("Failed to generate file: {}", e))
        })?;

    tracing::info!(
        venue = %form.selected_option,
        district = %form.district,
        city = %form.city,
        path = %file.path.display(),
        bytes = file.contents.len(),
        "Download generated"
    );
    Ok(file)
}

/// Server local time, ISO-8601 without offset.
pub async fn get_date() -> Json<DateResponse> {
    Json(DateResponse {
        date: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
    })
}
