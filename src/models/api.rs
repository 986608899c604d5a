use crate::models::flag::Flag;
use serde::Serialize;

/// Parameters for GET/POST /update, from the query string or a form body
#[derive(Debug, Clone, FromForm)]
pub struct UpdateParams {
    #[field(validate = len(1..))]
    pub hostname: String,

    #[field(validate = len(1..))]
    pub mountpoint: String,

    /// Whether the last backup of the mount succeeded
    pub backedup: Flag,

    /// Exclude the mount from bad/good classification
    pub ignore: Flag,

    /// Send the caller back to the overview page instead of acknowledging
    pub redirect: Flag,
}

/// Parameters for GET/POST /query
#[derive(Debug, Clone, FromForm)]
pub struct QueryParams {
    #[field(validate = len(1..))]
    pub hostname: String,

    #[field(validate = len(1..))]
    pub mountpoint: String,
}

/// Acknowledgment returned by /update
#[derive(Debug, Clone, Serialize)]
pub struct StatusAck {
    pub status: bool,
    pub status_code: u16,
}

impl StatusAck {
    pub fn ok() -> Self {
        Self {
            status: true,
            status_code: 200,
        }
    }
}

/// Response for /query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub status: bool,
    pub status_code: u16,
    pub backedup: Flag,
}

/// Response for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
}
