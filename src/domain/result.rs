//! Result type alias for the exporter

use super::errors::IiqError;

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use iiq_export::domain::result::Result;
/// use iiq_export::domain::errors::IiqError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(IiqError::Lookup("unknown activity type 99".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, IiqError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::IiqError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(IiqError::Other("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
