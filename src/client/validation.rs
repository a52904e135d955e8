//! Field validation for client calls and settings.

use crate::error::ValidationError;

/// Trait for validating a value before it is used.
///
/// # Examples
///
/// ```rust
/// use centralconfig_client::client::Validate;
/// use centralconfig_client::error::ValidationError;
///
/// struct Endpoint {
///     url: String,
/// }
///
/// impl Validate for Endpoint {
///     fn validate(&self) -> Result<(), ValidationError> {
///         if self.url.is_empty() {
///             return Err(ValidationError::missing_field("url"));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(Endpoint { url: String::new() }.validate().is_err());
/// ```
pub trait Validate {
    /// Validate the value.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Fail with a missing-field error when `value` is empty.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::missing_field(field));
    }
    Ok(())
}

/// Collapse collected errors: none, one, or `Multiple`.
#[cfg_attr(not(feature = "settings"), allow(dead_code))]
pub(crate) fn combine(mut errors: Vec<ValidationError>) -> Result<(), ValidationError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
