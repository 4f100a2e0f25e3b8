use std::error;
use std::fmt;
use std::io;
use std::result;

use crate::ucd;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(ucd::Error),
    Database(ucd_chardata::Error),
    Clap(clap::Error),
    Other(String),
}

impl Error {
    pub fn is_broken_pipe(&self) -> bool {
        let err = match *self {
            Error::Io(ref err) => err,
            Error::Database(ref err) => match *err.kind() {
                ucd_chardata::ErrorKind::Io(ref err) => err,
                _ => return false,
            },
            _ => return false,
        };
        err.kind() == io::ErrorKind::BrokenPipe
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Parse(ref err) => Some(err),
            Error::Database(ref err) => Some(err),
            Error::Clap(ref err) => Some(err),
            Error::Other(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Parse(ref err) => err.fmt(f),
            Error::Database(ref err) => err.fmt(f),
            Error::Clap(ref err) => err.fmt(f),
            Error::Other(ref msg) => write!(f, "{}", msg),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ucd::Error> for Error {
    fn from(err: ucd::Error) -> Error {
        Error::Parse(err)
    }
}

impl From<ucd_chardata::Error> for Error {
    fn from(err: ucd_chardata::Error) -> Error {
        Error::Database(err)
    }
}

impl From<clap::Error> for Error {
    fn from(err: clap::Error) -> Error {
        Error::Clap(err)
    }
}
