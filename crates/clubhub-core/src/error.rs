//! Unified application error types for ClubHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every domain rule violation carries
//! a stable [`ErrorCode`] so the transport layer can map errors without
//! parsing messages.

use std::fmt;
use thiserror::Error;

use crate::types::response::ApiErrorResponse;

/// Top-level error class used across the entire application.
///
/// The class determines the HTTP-status-equivalent treatment by the
/// (external) transport layer; the [`ErrorCode`] identifies the exact
/// domain rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// A conflict occurred (duplicate entry, capacity reached, etc.).
    Conflict,
    /// The caller does not have permission to perform the action.
    Forbidden,
    /// The target entity is in a state that does not permit the operation.
    InvalidState,
    /// Input validation failed.
    Validation,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::InvalidState => write!(f, "INVALID_STATE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Stable machine-readable codes for every domain rule the engine enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No club exists with the given ID.
    ClubNotFound,
    /// The user directory does not know the given user ID.
    UserNotFound,
    /// The user holds no membership in the club.
    MemberNotFound,
    /// No join request exists with the given ID.
    RequestNotFound,
    /// A club with the same (case-insensitive) name already exists.
    ClubAlreadyExists,
    /// The user already holds a membership in the club.
    MemberAlreadyExists,
    /// A pending join request already exists for the pair.
    DuplicateRequest,
    /// The club has reached its member cap.
    ClubFull,
    /// The actor's role is insufficient for the operation.
    Forbidden,
    /// The owner cannot be removed; ownership must be transferred first.
    CannotRemoveOwner,
    /// Ownership cannot be transferred to the current owner.
    CannotTransferToSelf,
    /// The user is banned from the club.
    UserBanned,
    /// The join request has already been resolved.
    RequestNotPending,
    /// The invite code does not resolve to a live club code.
    InvalidCode,
    /// The club is archived and rejects membership mutations.
    ClubArchived,
}

impl ErrorCode {
    /// Return the error class this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClubNotFound | Self::UserNotFound | Self::MemberNotFound
            | Self::RequestNotFound => ErrorKind::NotFound,
            Self::ClubAlreadyExists | Self::MemberAlreadyExists | Self::DuplicateRequest
            | Self::ClubFull => ErrorKind::Conflict,
            Self::Forbidden | Self::CannotRemoveOwner | Self::CannotTransferToSelf
            | Self::UserBanned => ErrorKind::Forbidden,
            Self::RequestNotPending | Self::InvalidCode | Self::ClubArchived => {
                ErrorKind::InvalidState
            }
        }
    }

    /// Return the stable wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClubNotFound => "CLUB_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MemberNotFound => "MEMBER_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::ClubAlreadyExists => "CLUB_ALREADY_EXISTS",
            Self::MemberAlreadyExists => "MEMBER_ALREADY_EXISTS",
            Self::DuplicateRequest => "DUPLICATE_REQUEST",
            Self::ClubFull => "CLUB_FULL",
            Self::Forbidden => "FORBIDDEN",
            Self::CannotRemoveOwner => "CANNOT_REMOVE_OWNER",
            Self::CannotTransferToSelf => "CANNOT_TRANSFER_TO_SELF",
            Self::UserBanned => "USER_BANNED",
            Self::RequestNotPending => "REQUEST_NOT_PENDING",
            Self::InvalidCode => "INVALID_CODE",
            Self::ClubArchived => "CLUB_ARCHIVED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The unified application error used throughout ClubHub.
///
/// Domain rule violations carry an [`ErrorCode`]; infrastructure failures
/// (database, configuration, serialization) carry only the [`ErrorKind`]
/// class and an underlying cause.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The error class.
    pub kind: ErrorKind,
    /// The stable domain code, when a domain rule was violated.
    pub code: Option<ErrorCode>,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error without a domain code.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Create a domain error; the class is derived from the code.
    pub fn domain(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            kind: code.kind(),
            code: Some(code),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Return whether this error carries the given domain code.
    pub fn is_code(&self, code: ErrorCode) -> bool {
        self.code == Some(code)
    }

    /// Serialize this error into the transport-facing response body.
    pub fn to_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            error: self
                .code
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| self.kind.to_string()),
            message: self.message.clone(),
            details: None,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a `CLUB_NOT_FOUND` error.
    pub fn club_not_found(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::ClubNotFound, message)
    }

    /// Create a `USER_NOT_FOUND` error.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::UserNotFound, message)
    }

    /// Create a `MEMBER_NOT_FOUND` error.
    pub fn member_not_found(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::MemberNotFound, message)
    }

    /// Create a `REQUEST_NOT_FOUND` error.
    pub fn request_not_found(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::RequestNotFound, message)
    }

    /// Create a `CLUB_ALREADY_EXISTS` error.
    pub fn club_already_exists(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::ClubAlreadyExists, message)
    }

    /// Create a `MEMBER_ALREADY_EXISTS` error.
    pub fn member_already_exists(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::MemberAlreadyExists, message)
    }

    /// Create a `DUPLICATE_REQUEST` error.
    pub fn duplicate_request(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::DuplicateRequest, message)
    }

    /// Create a `CLUB_FULL` error.
    pub fn club_full(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::ClubFull, message)
    }

    /// Create a `FORBIDDEN` error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::Forbidden, message)
    }

    /// Create a `CANNOT_REMOVE_OWNER` error.
    pub fn cannot_remove_owner(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::CannotRemoveOwner, message)
    }

    /// Create a `CANNOT_TRANSFER_TO_SELF` error.
    pub fn cannot_transfer_to_self(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::CannotTransferToSelf, message)
    }

    /// Create a `USER_BANNED` error.
    pub fn user_banned(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::UserBanned, message)
    }

    /// Create a `REQUEST_NOT_PENDING` error.
    pub fn request_not_pending(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::RequestNotPending, message)
    }

    /// Create an `INVALID_CODE` error.
    pub fn invalid_code(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::InvalidCode, message)
    }

    /// Create a `CLUB_ARCHIVED` error.
    pub fn club_archived(message: impl Into<String>) -> Self {
        Self::domain(ErrorCode::ClubArchived, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
