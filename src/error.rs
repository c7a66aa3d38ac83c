use std::fmt;
use std::io;

#[derive(Debug)]
pub enum BufferError {
    AllocFailed { requested: usize },
    CapacityExceeded { requested: usize, max: usize },
    Fmt,
    Io(io::Error),
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::AllocFailed { requested } =>
                write!(f, "allocation of {} bytes failed", requested),
            BufferError::CapacityExceeded { requested, max } =>
                write!(f, "capacity {} exceeds configured maximum {}", requested, max),
            BufferError::Fmt =>
                write!(f, "formatting error"),
            BufferError::Io(err) =>
                write!(f, "file error: {}", err),
        }
    }
}

impl std::error::Error for BufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for BufferError {
    fn from(err: io::Error) -> Self {
        BufferError::Io(err)
    }
}
