use thiserror::Error;

/// Errors raised while reading a `<source>` fragment back into a typed source.
///
/// Encoding never fails: missing sources and invalid trust ordinals are
/// reported through `tracing` warnings and the offending element is omitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("element <{element}> holds {value:?}, which is not an unsigned integer")]
    InvalidNumber { element: String, value: String },

    #[error("element <{element}> holds {value:?}, which is not a boolean")]
    InvalidBool { element: String, value: String },

    #[error("unknown SCM source class {0:?}")]
    UnknownSourceClass(String),

    #[error("malformed XML fragment: {0}")]
    Xml(String),

    #[error("XML fragment has no root element")]
    MissingRoot,
}
