use reqwest::StatusCode;
use thiserror::Error;

/// Classification of a failed request, derived from the HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// No status available, or the status was not an error
    Unspecified,
    NotFound,
    Conflict,
    BadRequest,
    Forbidden,
    /// Any other 4xx
    ClientError,
    /// Any 5xx
    ServerError,
}

impl ErrorReason {
    /// Maps an HTTP status code to a reason. Specific codes win over ranges.
    pub fn from_status(code: u16) -> Self {
        match code {
            404 => ErrorReason::NotFound,
            409 => ErrorReason::Conflict,
            400 => ErrorReason::BadRequest,
            403 => ErrorReason::Forbidden,
            500.. => ErrorReason::ServerError,
            400.. => ErrorReason::ClientError,
            _ => ErrorReason::Unspecified,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorReason::Unspecified => "UNSPECIFIED",
            ErrorReason::NotFound => "NOT_FOUND",
            ErrorReason::Conflict => "CONFLICT",
            ErrorReason::BadRequest => "BAD_REQUEST",
            ErrorReason::Forbidden => "FORBIDDEN",
            ErrorReason::ClientError => "CLIENT_ERROR",
            ErrorReason::ServerError => "SERVER_ERROR",
        }
    }
}

impl From<StatusCode> for ErrorReason {
    fn from(status: StatusCode) -> Self {
        ErrorReason::from_status(status.as_u16())
    }
}

impl std::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.error_code())
    }
}

/// The single error type returned by every client operation
#[derive(Error, Debug)]
pub enum NextcloudError {
    /// `source` is reqwest's status error, which only exists for 4xx and 5xx.
    /// Other non-2xx answers (an unfollowed 3xx) are described by `status` alone.
    #[error("{message} (HTTP {status}, {reason})")]
    Http {
        reason: ErrorReason,
        status: StatusCode,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Server reported an error: {exception}\n{message}\nDetails:\n\tAddress: {}\n\tRequest ID: {}",
        .remote_address.as_deref().unwrap_or("-"),
        .request_id.as_deref().unwrap_or("-"))]
    Fault {
        exception: String,
        message: String,
        remote_address: Option<String>,
        request_id: Option<String>,
    },

    /// `source` is set when the XML reader itself failed; a body with no root
    /// element or stray text around it carries none
    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: Option<quick_xml::Error>,
    },

    #[error("Depth must not be negative, got {depth}")]
    InvalidDepth { depth: i32 },

    #[error("Invalid client configuration: {details}")]
    InvalidConfiguration { details: String },

    #[error("{context}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl NextcloudError {
    /// The HTTP classification, `Unspecified` for anything that is not a status failure
    pub fn reason(&self) -> ErrorReason {
        match self {
            NextcloudError::Http { reason, .. } => *reason,
            _ => ErrorReason::Unspecified,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NextcloudError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn invalid_configuration<S: Into<String>>(details: S) -> Self {
        Self::InvalidConfiguration { details: details.into() }
    }

    pub fn transport<S: Into<String>>(context: S, source: reqwest::Error) -> Self {
        Self::Transport { context: context.into(), source }
    }

    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, NextcloudError>;
