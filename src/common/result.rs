use crate::common::error::HelperError;

/// Result alias used throughout the crate.
///
/// # Examples
///
/// ```
/// use git_helpers::common::result::HelperResult;
/// use git_helpers::common::error::HelperError;
///
/// fn release_label(tag: Option<&str>) -> HelperResult<String> {
///     match tag {
///         Some(tag) => Ok(tag.to_string()),
///         None => Err(HelperError::internal_error("no tag to release")),
///     }
/// }
///
/// assert!(release_label(None).is_err());
/// ```
pub type HelperResult<T> = Result<T, HelperError>;

/// Conversion helpers from `Option` into `HelperResult`.
pub trait OptionExt<T> {
    /// Converts `None` into the given error.
    fn ok_or_helper(self, error: HelperError) -> HelperResult<T>;

    /// Converts `None` into a validation error for `field`.
    ///
    /// ```
    /// use git_helpers::common::result::{HelperResult, OptionExt};
    ///
    /// let answer: Option<String> = None;
    /// let version: HelperResult<String> = answer.ok_or_validation_error("version", "required");
    /// assert!(version.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> HelperResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_helper(self, error: HelperError) -> HelperResult<T> {
        self.ok_or(error)
    }

    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> HelperResult<T> {
        self.ok_or_else(|| HelperError::validation_error(field, message, None))
    }
}
