use std::error;
use std::fmt;
use std::io;

/// A type alias for handling errors throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents any kind of error that can occur while building, decoding or
/// encoding a database.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
}

/// The kind of error that occurred.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error.
    Io(io::Error),
    /// The compiled form of a database is malformed.
    Format(String),
    /// The data given to a `DatabaseBuilder` could not be packed.
    Build(String),
}

impl Error {
    pub(crate) fn format(msg: String) -> Error {
        Error { kind: ErrorKind::Format(msg) }
    }

    pub(crate) fn build(msg: String) -> Error {
        Error { kind: ErrorKind::Build(msg) }
    }

    /// Return the specific kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Unwrap this error into its underlying kind.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Returns true if and only if this is an I/O error.
    pub fn is_io_error(&self) -> bool {
        match self.kind {
            ErrorKind::Io(_) => true,
            _ => false,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.kind {
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Io(ref err) => write!(f, "{}", err),
            ErrorKind::Format(ref msg) => {
                write!(f, "malformed database: {}", msg)
            }
            ErrorKind::Build(ref msg) => {
                write!(f, "failed to build database: {}", msg)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error { kind: ErrorKind::Io(err) }
    }
}
