pub mod dberrors;
pub mod errors;

pub use dberrors::{StoreError, StoreResult};
pub use errors::{ErrorDetail, ErrorResponse, ServiceError, ServiceResult};
