use serde::{Deserialize, Serialize};

use super::repo_types::LocationSample;

/// Fields are optional so a missing coordinate is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct SendLocationRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SendLocationResponse {
    pub message: String,
    pub location: LocationSample,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}
