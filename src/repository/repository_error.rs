use std::fmt;

#[derive(Debug)]
pub enum RepositoryError {
    /// No live connection to the document store
    Unavailable(String),
    /// The store rejected or failed the write
    Write(String),
    SerializationError(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::Unavailable(msg) => write!(f, "Store Unavailable: {}", msg),
            RepositoryError::Write(msg) => write!(f, "Write Error: {}", msg),
            RepositoryError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

// Convenient constructors
impl RepositoryError {
    pub fn unavailable<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Unavailable(msg.into())
    }

    pub fn write<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Write(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::SerializationError(msg.into())
    }
}

// MongoDB-specific conversions
impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::Authentication { .. } => RepositoryError::Unavailable(format!("{}", err)),
            ErrorKind::BsonSerialization(_) => RepositoryError::serialization(format!("BSON serialization error: {}", err)),
            _ => RepositoryError::Write(format!("{}", err)),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::serialization(format!("BSON serialization error: {}", err))
    }
}

// Result type alias for convenience
pub type RepositoryResult<T> = Result<T, RepositoryError>;
