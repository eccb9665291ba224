use std::path::PathBuf;

/// Failure kinds of a single invocation.
///
/// A frame pair with no relevant motion is not an error; it is reported as
/// [`MotionResult::NoMotion`](crate::MotionResult::NoMotion).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MotionError {
    /// A frame could not be read, decoded, or paired with the other frame.
    Load { path: PathBuf, reason: String },
    /// Malformed ROI or numeric arguments.
    Argument(String),
    /// The crop could not be persisted.
    Write { path: PathBuf, reason: String },
}

impl MotionError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        MotionError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        MotionError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            MotionError::Load { .. } => "load_error",
            MotionError::Argument(_) => "argument_error",
            MotionError::Write { .. } => "write_error",
        }
    }
}

impl std::fmt::Display for MotionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionError::Load { path, reason } => {
                write!(f, "failed to load frame {}: {}", path.display(), reason)
            }
            MotionError::Argument(message) => write!(f, "argument error: {}", message),
            MotionError::Write { path, reason } => {
                write!(f, "failed to write crop {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for MotionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let err = MotionError::load("/tmp/a.jpg", "unsupported format");
        assert_eq!(
            err.to_string(),
            "failed to load frame /tmp/a.jpg: unsupported format"
        );
        assert_eq!(err.code(), "load_error");

        let err = MotionError::write("/nope/crop.jpg", "permission denied");
        assert_eq!(err.code(), "write_error");
        assert!(err.to_string().contains("/nope/crop.jpg"));
    }
}
