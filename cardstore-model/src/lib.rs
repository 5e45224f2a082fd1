//! Card store data representations.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use derive_more::Error;

pub mod card;
pub mod request;
pub mod response;

/// Values that are "present" in the loose sense the card API uses.
///
/// Absent values, empty strings and zero numbers are falsy. Falsy values
/// never satisfy a required field and never overwrite an existing one.
pub trait Truthy {
    /// Checks if the value counts as present.
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

/// API error.
#[derive(Clone, Debug, Deserialize, Serialize, Error)]
pub struct Error {
    /// The response status.
    pub status: Status,
    /// A user-friendly message of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Error {
    /// Creates a new error with no message.
    pub fn new(status: Status) -> Error {
        Error {
            status,
            message: None,
        }
    }

    /// Attaches a message to the error.
    pub fn with_message(self, message: impl Into<String>) -> Error {
        Error {
            message: Some(message.into()),
            ..self
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.message.as_ref() {
            Some(message) => message.fmt(f),
            None => self.status.fmt(f),
        }
    }
}

/// The `status` string every API body carries.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// The request succeeded.
    Ok,
    /// A resource was created.
    Created,
    /// A resource was deleted.
    Deleted,
    /// The request was missing data or was malformed.
    BadRequest,
    /// The resource was not found.
    NotFound,
    /// An internal server error occured.
    ///
    /// Usually the data file could not be written.
    InternalServerError,
    /// Any other status.
    Other(String),
}

impl Status {
    /// The string representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::Created => "Created",
            Status::Deleted => "Deleted",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
            Status::Other(other) => other,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => Status::Ok,
            "Created" => Status::Created,
            "Deleted" => Status::Deleted,
            "Bad Request" => Status::BadRequest,
            "Not Found" => Status::NotFound,
            "Internal Server Error" => Status::InternalServerError,
            _ => Status::Other(value),
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Other(other) => other,
            status => status.as_str().to_owned(),
        }
    }
}
