pub mod logger;
pub mod report;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
