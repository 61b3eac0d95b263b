use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for unique index violations
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when the write failed on a unique index.
///
/// ```ignore
/// match collection.insert_one(&user).await {
///     Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail(user.email)),
///     other => other.map(|_| user).map_err(Into::into),
/// }
/// ```
pub fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
