//! Process exit codes for command-line failures
//!
//! Values follow the BSD `sysexits.h` convention.

use shared::error::{AppError, ErrorCategory, ErrorCode};

/// Input data was incorrect (bad draft, rejected booking)
pub const EXIT_DATA_ERR: u8 = 65;
/// Internal error in the engine itself
pub const EXIT_SOFTWARE: u8 = 70;
/// Temporary failure; the same command may succeed later
pub const EXIT_TEMP_FAIL: u8 = 75;
/// Credentials missing or refused
pub const EXIT_NO_PERM: u8 = 77;
/// Configuration problem
pub const EXIT_CONFIG: u8 = 78;

/// Map a failure onto a process exit code
pub fn exit_code(err: &AppError) -> u8 {
    if err.code.is_transient() {
        return EXIT_TEMP_FAIL;
    }
    match err.code.category() {
        ErrorCategory::Auth | ErrorCategory::Permission => EXIT_NO_PERM,
        ErrorCategory::System if err.code == ErrorCode::ConfigError => EXIT_CONFIG,
        ErrorCategory::System => EXIT_SOFTWARE,
        ErrorCategory::General | ErrorCategory::Parcel | ErrorCategory::Payment => EXIT_DATA_ERR,
    }
}
