use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::payment::GatewayError;
use crate::repository::RepositoryError;

pub mod auth;
pub mod banners;
pub mod categories;
pub mod checkout;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;
pub mod shop;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy shared by all services. Routes map each variant onto an
/// HTTP response.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No authenticated session.
    #[error("authentication required")]
    Unauthorized,
    /// Authenticated but not allowed to perform the operation.
    #[error("operation not permitted")]
    Forbidden,
    /// The request contradicts the current state of the catalog.
    #[error("{0}")]
    InvalidRequest(String),
    #[error("not found")]
    NotFound,
    #[error("insufficient stock for {product}, available: {available}")]
    InsufficientStock { product: String, available: i32 },
    /// The payment gateway could not be reached or rejected the call.
    #[error("payment gateway error: {0}")]
    Gateway(String),
    /// Form input failed validation or sanitization.
    #[error("{0}")]
    Form(String),
    /// The storage layer failed; the unit of work was rolled back.
    #[error("operation failed")]
    Transaction,
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::InsufficientStock { product, available } => {
                ServiceError::InsufficientStock { product, available }
            }
            RepositoryError::Pool(e) => {
                log::error!("connection pool failure: {e}");
                ServiceError::Transaction
            }
            RepositoryError::Database(e) => {
                log::error!("database failure: {e}");
                ServiceError::Transaction
            }
        }
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        ServiceError::Gateway(err.to_string())
    }
}

/// Guard used at the top of every back-office operation.
pub(crate) fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}
