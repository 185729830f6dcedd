/// Declare a `From` conversion between two error types at a module boundary.
///
/// Keeps the `?` operator usable when a lower layer (file I/O, TOML parsing)
/// reports errors in its own type.
///
/// # Syntax
///
/// ```ignore
/// error_boundary!(SourceError => TargetError, |err_var| {
///     // conversion logic returning TargetError
/// });
/// ```
///
/// # Example
///
/// ```
/// use lexi_core::error_boundary;
/// use std::io;
///
/// #[derive(Debug, thiserror::Error)]
/// enum HistoryError {
///     #[error("storage: {0}")]
///     Storage(String),
/// }
///
/// error_boundary!(io::Error => HistoryError, |e| {
///     HistoryError::Storage(e.to_string())
/// });
///
/// fn load_history() -> Result<String, HistoryError> {
///     let text = std::fs::read_to_string("/nonexistent/history.json")?;
///     Ok(text)
/// }
///
/// assert!(load_history().is_err());
/// ```
#[macro_export]
macro_rules! error_boundary {
    ($inner:ty => $outer:ty, |$err:ident| $body:expr) => {
        impl ::std::convert::From<$inner> for $outer {
            fn from($err: $inner) -> $outer {
                $body
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::io;

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum SessionError {
        #[error("storage: {0}")]
        Storage(String),
        #[error("parse: {0}")]
        Parse(String),
    }

    error_boundary!(io::Error => SessionError, |e| {
        SessionError::Storage(e.to_string())
    });

    error_boundary!(std::num::ParseIntError => SessionError, |e| {
        SessionError::Parse(e.to_string())
    });

    #[test]
    fn test_direct_conversion() {
        let err: SessionError = io::Error::new(io::ErrorKind::NotFound, "session missing").into();
        assert_eq!(err, SessionError::Storage("session missing".to_string()));
    }

    #[test]
    fn test_question_mark_uses_boundary() {
        fn score(s: &str) -> Result<u32, SessionError> {
            Ok(s.parse::<u32>()?)
        }

        assert_eq!(score("87"), Ok(87));
        assert!(matches!(score("eighty"), Err(SessionError::Parse(_))));
    }
}
