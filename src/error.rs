use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedLayout,
    FieldRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The token stream broke the layout grammar; the partially built tree is discarded.
    #[error("malformed layout: {message} at line {}, column {}", location.line, location.column)]
    MalformedLayout { message: String, location: Location },
    /// A strict field read could not produce the requested shape.
    #[error("field `{name}` cannot be read as {shape}")]
    FieldRead { shape: &'static str, name: String },
}

impl Error {
    pub fn malformed(message: impl Into<String>, location: Location) -> Self {
        Error::MalformedLayout {
            message: message.into(),
            location,
        }
    }

    pub fn field_read(shape: &'static str, name: impl Into<String>) -> Self {
        Error::FieldRead {
            shape,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedLayout { .. } => ErrorKind::MalformedLayout,
            Error::FieldRead { .. } => ErrorKind::FieldRead,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            Error::MalformedLayout { location, .. } => Some(*location),
            Error::FieldRead { .. } => None,
        }
    }
}
