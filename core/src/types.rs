//! Argument types for the Designer News API.
//!
//! # Design
//! Responses are returned as untyped `serde_json::Value`, so the only domain
//! types are the two kinds of input the client has to validate or encode:
//! story/comment identifiers and comment bodies.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// A positive integer naming a story or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(u64);

impl Identifier {
    pub fn new(id: u64) -> Result<Self, ApiError> {
        if id == 0 {
            return Err(ApiError::InvalidArgument(
                "id must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::InvalidArgument(format!(
                "id must be numeric, got {s:?}"
            )));
        }
        let id = s
            .parse::<u64>()
            .map_err(|e| ApiError::InvalidArgument(format!("id {s:?} is out of range: {e}")))?;
        Self::new(id)
    }
}

/// Conversion into a validated `Identifier`.
///
/// Implemented for unsigned and signed integers and for strings, so callers
/// can pass ids straight from JSON or user input and get `InvalidArgument`
/// back instead of a panic or a malformed URL.
pub trait IntoIdentifier {
    fn into_identifier(self) -> Result<Identifier, ApiError>;
}

impl IntoIdentifier for Identifier {
    fn into_identifier(self) -> Result<Identifier, ApiError> {
        Ok(self)
    }
}

macro_rules! unsigned_into_identifier {
    ($($t:ty),*) => {$(
        impl IntoIdentifier for $t {
            fn into_identifier(self) -> Result<Identifier, ApiError> {
                Identifier::new(u64::from(self))
            }
        }
    )*};
}

macro_rules! signed_into_identifier {
    ($($t:ty),*) => {$(
        impl IntoIdentifier for $t {
            fn into_identifier(self) -> Result<Identifier, ApiError> {
                let id = u64::try_from(self).map_err(|_| {
                    ApiError::InvalidArgument(format!("id must be a positive integer, got {self}"))
                })?;
                Identifier::new(id)
            }
        }
    )*};
}

unsigned_into_identifier!(u8, u16, u32, u64);
signed_into_identifier!(i8, i16, i32, i64);

impl IntoIdentifier for usize {
    fn into_identifier(self) -> Result<Identifier, ApiError> {
        let id = u64::try_from(self)
            .map_err(|_| ApiError::InvalidArgument(format!("id {self} is out of range")))?;
        Identifier::new(id)
    }
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> Result<Identifier, ApiError> {
        self.parse()
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> Result<Identifier, ApiError> {
        self.parse()
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> Result<Identifier, ApiError> {
        self.parse()
    }
}

/// Free text posted as a story comment or comment reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    /// Form field the remote API reads the comment text from.
    pub const FIELD: &'static str = "comment[body]";

    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode as `comment[body]=<urlencoded text>`.
    ///
    /// The field name goes out verbatim; only the text is form-urlencoded
    /// (space becomes `+`).
    pub fn to_form(&self) -> String {
        let value: String = url::form_urlencoded::byte_serialize(self.0.as_bytes()).collect();
        format!("{}={value}", Self::FIELD)
    }
}

impl From<&str> for CommentBody {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for CommentBody {
    fn from(text: String) -> Self {
        Self(text)
    }
}
