//! Error types for lawg API operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during lawg API operations.
#[derive(Debug, Error)]
pub enum LawgError {
    /// Configuration is missing or incomplete.
    #[error("lawg configuration required: {0}")]
    ConfigMissing(String),

    /// A request or response field failed its constraint.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A partial update had nothing left to send.
    #[error("The request body is empty.")]
    EmptyBody,

    /// A mutating call was issued against a deleted entity.
    #[error("The {0} has already been deleted.")]
    AlreadyDeleted(&'static str),

    /// A named event template was referenced but never registered.
    #[error("Event '{0}' is not defined.")]
    EventUndefined(String),

    /// The API answered with an error.
    #[error("lawg API error ({status}, {kind}): {message}")]
    Http {
        kind: HttpErrorKind,
        status: u16,
        message: String,
    },

    /// A success reply carried no payload where one was expected.
    #[error("The API returned no payload (status {0}).")]
    EmptyResponse(u16),

    /// HTTP transport error.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl LawgError {
    /// HTTP status code carried by API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The API error kind, if this is an API error.
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::Http { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true for "not found" API errors.
    pub fn is_not_found(&self) -> bool {
        self.http_kind() == Some(HttpErrorKind::NotFound)
    }
}

/// Result type alias for lawg operations.
pub type Result<T> = core::result::Result<T, LawgError>;

/// Error codes the API puts in its error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    Conflict,
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServerError,
    Forbidden,
    /// Unrecognized code, or no parseable error envelope at all.
    Other,
}

impl HttpErrorKind {
    /// Map an envelope `code` to its kind.
    pub fn from_code(code: &str) -> Self {
        match code {
            "conflict" => Self::Conflict,
            "bad_request" => Self::BadRequest,
            "unauthorized" => Self::Unauthorized,
            "not_found" => Self::NotFound,
            "internal_server_error" => Self::InternalServerError,
            "forbidden" => Self::Forbidden,
            _ => Self::Other,
        }
    }

    /// The wire code for this kind.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::InternalServerError => "internal_server_error",
            Self::Forbidden => "forbidden",
            Self::Other => "http_error",
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Missing data for required field.")]
    Missing,

    #[error("Field may not be null.")]
    Null,

    #[error("Field may not be blank.")]
    Blank,

    #[error("Not a valid {expected}.")]
    InvalidType { expected: &'static str },

    #[error("Not a valid id: expected prefix '{prefix}_'.")]
    InvalidId { prefix: &'static str },

    #[error("Length must be between {min} and {max}.")]
    Length { min: usize, max: usize },

    #[error("String does not match expected pattern {pattern}.")]
    Pattern { pattern: &'static str },

    #[error("Must be between {min} and {}.", upper_bound(.max))]
    Range { min: i64, max: Option<i64> },

    #[error("Unknown field.")]
    Unknown,

    #[error("Exactly one of {} must be given.", .fields.join(", "))]
    Exclusive { fields: &'static [&'static str] },
}

fn upper_bound(max: &Option<i64>) -> String {
    max.map_or_else(|| "infinity".to_string(), |m| m.to_string())
}

/// A rejected field and the path leading to it (e.g. `feeds[0].id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub error: FieldError,
}

/// All field issues found while validating data against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub schema: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub(crate) fn single(
        schema: &'static str,
        field: impl Into<String>,
        error: FieldError,
    ) -> Self {
        Self {
            schema,
            issues: vec![FieldIssue {
                field: field.into(),
                error,
            }],
        }
    }

    /// The first issue reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| &issue.error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed for {}", self.schema)?;
        for (i, issue) in self.issues.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{}: {}", issue.field, issue.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
