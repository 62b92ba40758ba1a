pub mod dberrors;
pub mod errors;

pub use dberrors::RepositoryError;
pub use errors::{ErrorResponse, ServiceError, ServiceResult};
