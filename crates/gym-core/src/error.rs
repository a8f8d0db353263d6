use thiserror::Error;

#[derive(Debug, Error)]
pub enum GymError {
    #[error("not initialized: run 'gym init'")]
    NotInitialized,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid trainer: {0}")]
    InvalidTrainer(String),

    #[error("first meeting not completed for client '{0}'")]
    MeetingNotCompleted(String),

    #[error("a first meeting date is required")]
    DateRequired,

    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("settings not found for tenant: {0}")]
    SettingsNotFound(String),

    #[error("client already exists: {0}")]
    ClientExists(String),

    #[error("user already exists: {0}")]
    UserExists(String),

    #[error("invalid id '{0}': must be lowercase alphanumeric with hyphens or underscores")]
    InvalidId(String),

    #[error("invalid purchase type '{0}': must be package, custom_plan, or none")]
    InvalidPurchaseType(String),

    #[error("invalid role '{0}': must be admin, operator, trainer, or member")]
    InvalidRole(String),

    #[error("invalid channel '{0}': must be in_app, email, or whatsapp")]
    InvalidChannel(String),

    #[error("client '{id}' was modified concurrently: expected version {expected}, found {found}")]
    Conflict { id: String, expected: u64, found: u64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("store failure: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GymError {
    /// Stable machine-readable code for callers that render their own messages.
    pub fn code(&self) -> &'static str {
        match self {
            GymError::Unauthorized(_) => "unauthorized",
            GymError::InvalidTrainer(_) => "invalid_trainer",
            GymError::MeetingNotCompleted(_) => "meeting_not_completed",
            GymError::DateRequired => "date_required",
            GymError::ClientNotFound(_)
            | GymError::UserNotFound(_)
            | GymError::SettingsNotFound(_) => "not_found",
            GymError::Conflict { .. } => "conflict",
            GymError::ClientExists(_) | GymError::UserExists(_) => "already_exists",
            GymError::InvalidId(_)
            | GymError::InvalidPurchaseType(_)
            | GymError::InvalidRole(_)
            | GymError::InvalidChannel(_) => "invalid_input",
            GymError::Config(_) => "invalid_config",
            GymError::NotInitialized
            | GymError::Store(_)
            | GymError::Io(_)
            | GymError::Yaml(_)
            | GymError::Json(_) => "store_failure",
        }
    }
}

pub type Result<T> = std::result::Result<T, GymError>;
