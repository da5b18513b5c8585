use thiserror::Error;

/// User-input problems caught before any storage call.
///
/// The display strings are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Event title is required")]
    TitleRequired,

    #[error("Start date is required")]
    StartRequired,

    #[error("End date is required")]
    EndRequired,

    #[error("Start date is invalid")]
    StartInvalid,

    #[error("End date is invalid")]
    EndInvalid,

    #[error("End date must be after start date")]
    EndBeforeStart,
}

/// Backend failures from either storage implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Event not found")]
    NotFound { id: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage setup failed: {0}")]
    Setup(String),
}

impl StorageError {
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn setup<S: Into<String>>(msg: S) -> Self {
        Self::Setup(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Network(format!("invalid response body: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Invalid or missing remote backend settings.
///
/// Resolved by falling back to the local store; logged, never shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} still holds the placeholder value")]
    Placeholder(&'static str),

    #[error("remote URL must use https://")]
    InsecureUrl,

    #[error("remote URL is malformed: {0}")]
    InvalidUrl(String),

    #[error("access key is too short")]
    KeyTooShort,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A failure that crossed a message boundary as plain text.
    #[error("{0}")]
    OperationFailed(String),
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        Self::OperationFailed(msg)
    }
}

impl AppError {
    /// Whether the failure came from user input rather than the backend.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
