// Domain errors for target registry mutations

/// Why a registry mutation was refused. Every variant is a no-op for local state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("{0} is already monitored")]
    AlreadyMonitored(String),

    #[error("{0} is not monitored")]
    NotMonitored(String),

    #[error("invalid target address: {0:?}")]
    InvalidAddress(String),
}

impl TargetError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            TargetError::AlreadyMonitored(_) => "ALREADY_MONITORED",
            TargetError::NotMonitored(_) => "NOT_MONITORED",
            TargetError::InvalidAddress(_) => "INVALID_ADDRESS",
        }
    }
}
