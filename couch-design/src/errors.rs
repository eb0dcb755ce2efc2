use backtrace::Backtrace;
use serde::{de, ser};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for descriptor operations
///
/// This enum represents every category of failure that can occur while reading, building
/// or writing design documents and index definitions.
///
/// # Examples
///
/// ```rust,ignore
/// use couch_design::errors::{DesignError, ErrorKind, DesignResult};
///
/// fn example() -> DesignResult<()> {
///     Err(DesignError::new("'geo' is not a known index type", ErrorKind::UnknownIndexType))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Wire format errors
    /// Input is not well-formed JSON or does not have the expected shape
    MalformedJson,
    /// The `type` of an index definition is not recognized
    UnknownIndexType,
    /// An index field entry does not match the shape required by the index type
    InvalidFieldShape,
    /// A name appears more than once within one mapping
    DuplicateName,

    // Validation errors
    /// Generic validation error
    ValidationError,
    /// A selector could not be built or parsed
    InvalidSelector,

    // IO errors, used by the loader
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,
    /// File content is not valid UTF-8
    EncodingError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl ErrorKind {
    /// Kinds raised from inside serde deserializers. Their label is written at the start of
    /// the message so the kind survives the trip through `serde_json::Error`.
    const LABELLED: [ErrorKind; 5] = [
        ErrorKind::UnknownIndexType,
        ErrorKind::InvalidFieldShape,
        ErrorKind::DuplicateName,
        ErrorKind::InvalidSelector,
        ErrorKind::ValidationError,
    ];

    fn from_labelled_message(message: &str) -> Option<ErrorKind> {
        ErrorKind::LABELLED
            .iter()
            .find(|kind| {
                message
                    .strip_prefix(&kind.to_string())
                    .is_some_and(|rest| rest.starts_with(':'))
            })
            .cloned()
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedJson => write!(f, "Malformed JSON"),
            ErrorKind::UnknownIndexType => write!(f, "Unknown index type"),
            ErrorKind::InvalidFieldShape => write!(f, "Invalid field shape"),
            ErrorKind::DuplicateName => write!(f, "Duplicate name"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidSelector => write!(f, "Invalid selector"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of the crate.
///
/// `DesignError` carries a message, a kind and an optional cause. It supports error
/// chaining and captures a backtrace where it is created.
///
/// # Examples
///
/// ```rust,ignore
/// use couch_design::errors::{DesignError, ErrorKind};
///
/// let cause = DesignError::new("IO failed", ErrorKind::IOError);
/// let err = DesignError::new_with_cause("Failed to load _design/app", ErrorKind::IOError, cause);
/// ```
#[derive(Clone)]
pub struct DesignError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DesignError>>,
    backtrace: Backtrace,
}

impl DesignError {
    /// Creates a new `DesignError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DesignError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `DesignError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DesignError) -> Self {
        DesignError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&DesignError> {
        self.cause.as_deref()
    }

    /// Returns the kind of the innermost error of the chain.
    pub fn root_kind(&self) -> &ErrorKind {
        match &self.cause {
            Some(cause) => cause.root_kind(),
            None => &self.error_kind,
        }
    }
}

impl Display for DesignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DesignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for DesignError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// `DesignResult<T>` is shorthand for `Result<T, DesignError>`.
pub type DesignResult<T> = Result<T, DesignError>;

/// Builds a serde error whose message starts with the label of `kind`.
pub(crate) fn data_error<E: de::Error>(kind: ErrorKind, message: impl Display) -> E {
    E::custom(format!("{}: {}", kind, message))
}

fn kind_of_custom(message: &str) -> ErrorKind {
    ErrorKind::from_labelled_message(message).unwrap_or(ErrorKind::MalformedJson)
}

impl de::Error for DesignError {
    fn custom<T: Display>(msg: T) -> Self {
        let message = msg.to_string();
        let kind = kind_of_custom(&message);
        DesignError::new(&message, kind)
    }
}

impl ser::Error for DesignError {
    fn custom<T: Display>(msg: T) -> Self {
        DesignError::new(&msg.to_string(), ErrorKind::InternalError)
    }
}

impl From<serde_json::Error> for DesignError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let message = err.to_string();
        let error_kind = match err.classify() {
            Category::Io => ErrorKind::IOError,
            Category::Syntax | Category::Eof => ErrorKind::MalformedJson,
            Category::Data => kind_of_custom(&message),
        };
        DesignError::new(&message, error_kind)
    }
}

fn kind_of_io(kind: std::io::ErrorKind) -> ErrorKind {
    match kind {
        std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
        std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        std::io::ErrorKind::InvalidData => ErrorKind::EncodingError,
        _ => ErrorKind::IOError,
    }
}

impl From<std::io::Error> for DesignError {
    fn from(err: std::io::Error) -> Self {
        DesignError::new(&format!("IO error: {}", err), kind_of_io(err.kind()))
    }
}

impl From<walkdir::Error> for DesignError {
    fn from(err: walkdir::Error) -> Self {
        let error_kind = err
            .io_error()
            .map(|io| kind_of_io(io.kind()))
            .unwrap_or(ErrorKind::IOError);
        DesignError::new(&format!("Directory walk error: {}", err), error_kind)
    }
}

impl From<std::string::FromUtf8Error> for DesignError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DesignError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<String> for DesignError {
    fn from(msg: String) -> Self {
        DesignError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for DesignError {
    fn from(msg: &str) -> Self {
        DesignError::new(msg, ErrorKind::InternalError)
    }
}
