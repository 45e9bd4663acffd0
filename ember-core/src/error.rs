//! Common error types.

use std::{error, fmt};

/// The error type for when the OS cannot perform the requested operation.
///
/// Records where in the backend the failing call was made. Build it with the `os_error!` macro.
#[derive(Debug)]
pub struct OsError {
    line: u32,
    file: &'static str,
    error: Box<dyn error::Error + Send + Sync + 'static>,
}

impl OsError {
    pub fn new(
        line: u32,
        file: &'static str,
        error: impl Into<Box<dyn error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self { line, file, error: error.into() }
    }

    /// The underlying platform error.
    pub fn error(&self) -> &(dyn error::Error + Send + Sync + 'static) {
        &*self.error
    }
}

#[allow(unused_macros)]
macro_rules! os_error {
    ($error:expr) => {{
        $crate::error::OsError::new(line!(), file!(), $error)
    }};
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(&format!("os error at {}:{}: {}", self.file, self.line, self.error))
    }
}

impl error::Error for OsError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&*self.error)
    }
}

/// Logs `message` and aborts the process.
///
/// Reserved for failures the engine cannot continue from, such as a window that could not be
/// created at startup.
#[cold]
pub fn fatal(message: impl fmt::Display) -> ! {
    tracing::error!("fatal error: {message}");
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn ensure_fmt_does_not_panic() {
        let _ = format!("{:?}, {}", os_error!("boom"), os_error!("boom"));
    }

    #[test]
    fn os_error_records_location() {
        let err = os_error!(io::Error::from_raw_os_error(5));
        let text = err.to_string();
        assert!(text.starts_with("os error at "), "{text}");
        assert!(text.contains("error.rs:"), "{text}");

        let source = error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source, Some(err.error().to_string()));
    }
}
