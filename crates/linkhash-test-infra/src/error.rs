use thiserror::Error;

pub type Result<T> = std::result::Result<T, TestInfraError>;

/// Failures while provisioning a disposable test server.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to start or query container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
}
