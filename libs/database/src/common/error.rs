/// Failure to reach the database at startup
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level MongoDB error (bad URL, auth failure, I/O)
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Server did not answer the initial ping
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let err = DatabaseError::ConnectionFailed("server selection timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: server selection timeout");
    }
}
