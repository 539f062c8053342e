#![allow(missing_docs)]

use std::fmt::Display;

pub type RedirectResult<T> = core::result::Result<T, RedirectError>;
pub type Result<T> = core::result::Result<T, RedirectError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RedirectErrorKind {
    Config,
    MalformedEvent,
    UnsupportedMethod,
    CredentialsDenied,
    SigningFailed,
}

impl Display for RedirectErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "CONFIG"),
            Self::MalformedEvent => write!(f, "MALFORMED_EVENT"),
            Self::UnsupportedMethod => write!(f, "UNSUPPORTED_METHOD"),
            Self::CredentialsDenied => write!(f, "CREDENTIALS_DENIED"),
            Self::SigningFailed => write!(f, "SIGNING_FAILED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectError {
    kind: RedirectErrorKind,
    message: String,
}

impl RedirectError {
    pub fn new(kind: RedirectErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> RedirectErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(RedirectErrorKind::Config, message.into())
    }

    pub fn malformed_event(message: impl Into<String>) -> Self {
        Self::new(RedirectErrorKind::MalformedEvent, message.into())
    }

    pub fn unsupported_method(message: impl Into<String>) -> Self {
        Self::new(RedirectErrorKind::UnsupportedMethod, message.into())
    }

    pub fn credentials_denied(message: impl Into<String>) -> Self {
        Self::new(RedirectErrorKind::CredentialsDenied, message.into())
    }

    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(RedirectErrorKind::SigningFailed, message.into())
    }
}

impl Display for RedirectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for RedirectError {}
