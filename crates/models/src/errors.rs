use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Payload violates the account field constraints.
    #[error("invalid account: {0}")]
    DataValidation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::DataValidation(msg.into()) }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
