// Error types for the dashboard layer

use omnicloud_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The platform context was read outside of [`crate::platform::provide`]
    #[error("platform context is not provided for this task")]
    MissingProvider,

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DashboardError::MissingProvider.to_string(),
            "platform context is not provided for this task"
        );

        let err: DashboardError = ClientError::Validation("no platform selected".to_string()).into();
        assert_eq!(err.to_string(), "validation error: no platform selected");
    }
}
