use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusError {
    #[error("Failed to create database connection pool for '{path}': {cause}")]
    DatabasePool { path: String, cause: r2d2::Error },

    #[error("Failed to get database connection from pool: {0}")]
    DatabaseConnection(#[from] r2d2::Error),

    #[error("Database query failed for '{operation}': {cause}")]
    DatabaseQuery {
        operation: String,
        cause: rusqlite::Error,
    },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

pub type Result<T> = std::result::Result<T, StatusError>;

impl From<StatusError> for rocket::http::Status {
    fn from(error: StatusError) -> Self {
        log::error!("Request failed: {}", error);
        rocket::http::Status::InternalServerError
    }
}
