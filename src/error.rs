use std::path::PathBuf;

use thiserror::Error;

/// Every failure the viewer can report. None of them are retried: the
/// process aborts with the diagnostic before drawing anything partial.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}:{line}: {message} (got {text:?})")]
    Parse {
        source_name: String,
        line: usize,
        text: String,
        message: String,
    },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("element {element} has unknown region tag {tag} (expected 0..=3)")]
    UnknownRegionTag { element: usize, tag: i64 },

    #[error("render: {0}")]
    Render(String),
}

impl VizError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(
        source_name: impl Into<String>,
        line: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            line,
            text: text.into(),
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::ShapeMismatch(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}

pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_line() {
        let err = VizError::parse("points.txt", 7, "1.0", "expected 2 fields, found 1");
        let text = err.to_string();
        assert!(text.starts_with("points.txt:7:"), "{}", text);
        assert!(text.contains("\"1.0\""));
    }

    #[test]
    fn test_unknown_tag_message() {
        let err = VizError::UnknownRegionTag { element: 3, tag: 9 };
        assert_eq!(
            err.to_string(),
            "element 3 has unknown region tag 9 (expected 0..=3)"
        );
    }
}
