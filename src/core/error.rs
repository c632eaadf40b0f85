use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    /// A constructor was called without its mandatory input.
    Argument,
    Parse,
    /// Input was understood but is not an acceptable envelope.
    Rejected,
    Io,
}

impl ErrorKind {
    /// Fallback text for errors raised without a message.
    pub fn describe(self) -> &'static str {
        match self {
            ErrorKind::Internal => "internal error",
            ErrorKind::Usage => "usage error",
            ErrorKind::Argument => "missing argument",
            ErrorKind::Parse => "invalid json",
            ErrorKind::Rejected => "rejected envelope",
            ErrorKind::Io => "i/o error",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The message, or the kind's fallback text when none was set.
    pub fn summary(&self) -> &str {
        self.message().unwrap_or(self.kind.describe())
    }

    /// Display text of every error in the source chain, outermost first.
    pub fn causes(&self) -> Vec<String> {
        std::iter::successors(self.source(), |&cause| cause.source())
            .map(ToString::to_string)
            .collect()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Argument => 2,
        ErrorKind::Parse => 3,
        ErrorKind::Rejected => 4,
        ErrorKind::Io => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::Argument, 2),
            (ErrorKind::Parse, 3),
            (ErrorKind::Rejected, 4),
            (ErrorKind::Io, 5),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_kind_message_and_path() {
        let err = Error::new(ErrorKind::Io)
            .with_message("failed to read config")
            .with_path("/tmp/japi.json");
        assert_eq!(
            err.to_string(),
            "Io: failed to read config (path: /tmp/japi.json)"
        );
    }

    #[test]
    fn source_chain_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::new(ErrorKind::Io).with_source(io);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "missing");
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn summary_falls_back_to_kind_text() {
        assert_eq!(Error::new(ErrorKind::Argument).summary(), "missing argument");
        assert_eq!(Error::new(ErrorKind::Parse).summary(), "invalid json");
        let err = Error::new(ErrorKind::Parse).with_message("invalid json for --data");
        assert_eq!(err.summary(), "invalid json for --data");
    }

    #[test]
    fn causes_walk_the_whole_chain() {
        let inner = Error::new(ErrorKind::Io)
            .with_message("disk gone")
            .with_source(std::io::Error::other("eio"));
        let err = Error::new(ErrorKind::Internal).with_source(inner);
        assert_eq!(err.causes(), vec!["Io: disk gone".to_string(), "eio".to_string()]);
        assert!(Error::new(ErrorKind::Usage).causes().is_empty());
    }
}
