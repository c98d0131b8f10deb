//! Plugin errors.

use std::error;
use std::fmt;
use std::io;

/// An error raised while running the plugin.
///
/// `Io`, `Decode`, `Encode` and `EmptyInput` mean the host and the plugin
/// could not exchange envelopes at all; the process exits without writing a
/// response. The remaining variants are reported back to the host through
/// `CodeGeneratorResponse.error`.
#[derive(Debug)]
pub enum Error {
    /// Reading standard input or writing standard output failed.
    Io(io::Error),
    /// The request envelope is not a valid `CodeGeneratorRequest`.
    Decode(prost::DecodeError),
    /// The response envelope could not be serialized.
    Encode(prost::EncodeError),
    /// Standard input was empty.
    EmptyInput,
    /// A known plugin option carried a value it does not accept.
    InvalidOption { key: String, value: String },
    /// The plugin parameter named an option that does not exist.
    UnknownOption(String),
    /// A field type has no Flow equivalent and the configuration asks for a hard failure.
    UnsupportedField {
        file: String,
        message: String,
        field: String,
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(error) => write!(f, "I/O error: {}", error),
            Error::Decode(error) => write!(f, "unable to parse CodeGeneratorRequest: {}", error),
            Error::Encode(error) => write!(f, "unable to encode CodeGeneratorResponse: {}", error),
            Error::EmptyInput => f.write_str("no request on stdin"),
            Error::InvalidOption { key, value } => {
                write!(f, "invalid value {:?} for option {:?}", value, key)
            }
            Error::UnknownOption(option) => write!(f, "unknown option {:?}", option),
            Error::UnsupportedField {
                file,
                message,
                field,
                reason,
            } => write!(f, "{}: {}.{}: {}", file, message, field, reason),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            Error::Decode(error) => Some(error),
            Error::Encode(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<prost::DecodeError> for Error {
    fn from(error: prost::DecodeError) -> Error {
        Error::Decode(error)
    }
}

impl From<prost::EncodeError> for Error {
    fn from(error: prost::EncodeError) -> Error {
        Error::Encode(error)
    }
}
