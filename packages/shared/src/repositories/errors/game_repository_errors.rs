#[derive(Debug, PartialEq, Eq)]
pub enum GameRepositoryError {
    Serialization(String),
    DynamoDb(String),
    /// The stored game changed since it was loaded.
    VersionConflict,
    Timeout,
}

impl std::fmt::Display for GameRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
            GameRepositoryError::VersionConflict => {
                write!(f, "Game was modified concurrently")
            }
            GameRepositoryError::Timeout => write!(f, "Game store did not respond in time"),
        }
    }
}

impl std::error::Error for GameRepositoryError {}
