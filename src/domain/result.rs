//! Result type alias for onexport

use super::errors::OnexportError;

/// Result type alias for onexport operations
///
/// # Examples
///
/// ```
/// use onexport::domain::result::Result;
/// use onexport::domain::errors::OnexportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(OnexportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, OnexportError>;
