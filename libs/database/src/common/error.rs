/// Errors raised while establishing or probing a database connection
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The server could not be reached or did not answer the verification ping
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An established handle stopped answering
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = DatabaseError::ConnectionFailed("server selection timeout".into());
        assert_eq!(err.to_string(), "Connection failed: server selection timeout");
    }
}
