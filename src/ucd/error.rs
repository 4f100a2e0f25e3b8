use std::error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An error that occurred while reading a UCD file.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) line: Option<u64>,
    pub(crate) path: Option<PathBuf>,
}

/// The kind of error that occurred while reading a UCD file.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error.
    Io(io::Error),
    /// A line that could not be parsed.
    Parse(String),
}

impl Error {
    pub(crate) fn parse(msg: String) -> Error {
        Error { kind: ErrorKind::Parse(msg), line: None, path: None }
    }

    pub(crate) fn io(err: io::Error, path: &Path) -> Error {
        Error {
            kind: ErrorKind::Io(err),
            line: None,
            path: Some(path.to_path_buf()),
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
        match (self.path.as_ref(), self.line) {
            (Some(path), Some(line)) => {
                write!(f, "{}:{}: ", path.display(), line)?
            }
            (Some(path), None) => write!(f, "{}: ", path.display())?,
            (None, Some(line)) => write!(f, "error on line {}: ", line)?,
            (None, None) => {}
        }
        match self.kind {
            ErrorKind::Io(ref err) => write!(f, "{}", err),
            ErrorKind::Parse(ref msg) => write!(f, "{}", msg),
        }
    }
}
