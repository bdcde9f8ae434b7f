use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("channel name must not be empty")]
    EmptyName,
    #[error("no group named '{0}'")]
    UnknownGroup(String),
    #[error("record already exists")]
    Conflict,
    #[error("invalid attributes payload: {0}")]
    InvalidAttributes(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
            _ => StoreError::Database(e),
        }
    }
}
