//! All error types for the l10ngen crate.
//!
//! Every fallible operation (importing, generating, writing, loading the
//! configuration) returns [`Error`]. Nothing in the library terminates the
//! process; the caller decides what a failure means.

use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("authentication failed ({kind}): {message}\n{}", .kind.hint())]
    Authentication {
        kind: AuthErrorKind,
        message: String,
    },

    #[error("source unavailable: {message}")]
    SourceUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("unknown output kind `{0}` (expected dart, typescript or both)")]
    UnknownOutputKind(String),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new source-unavailable error with an optional source error.
    pub fn source_unavailable(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::SourceUnavailable {
            message: message.into(),
            source,
        }
    }

    /// Creates a new authentication error of the given kind.
    pub fn authentication(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Error::Authentication {
            kind,
            message: message.into(),
        }
    }
}

/// Why a provider refused (or could not be asked for) access.
///
/// Each kind maps to a remediation hint that is printed with the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// No usable credential was configured.
    MissingCredentials,
    /// The API key or private key was rejected or could not be read.
    InvalidKey,
    /// The caller is authenticated but not allowed to read the document.
    Permission,
    /// The document does not exist (or is invisible to the caller).
    NotFound,
    /// The token was revoked or has expired.
    ExpiredToken,
    /// The OAuth2 client id / secret pair was rejected.
    InvalidClient,
    /// The provider refused the request for a reason we do not classify.
    Other,
}

impl AuthErrorKind {
    /// Classifies a provider error using the HTTP status and its diagnostic text.
    pub fn classify(status: u16, message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("api key not valid") || lower.contains("api_key_invalid") {
            AuthErrorKind::InvalidKey
        } else if lower.contains("invalid_client") || lower.contains("unauthorized_client") {
            AuthErrorKind::InvalidClient
        } else if lower.contains("invalid_grant") || lower.contains("expired") {
            AuthErrorKind::ExpiredToken
        } else if lower.contains("permission") || status == 403 {
            AuthErrorKind::Permission
        } else if lower.contains("not found") || status == 404 {
            AuthErrorKind::NotFound
        } else if status == 401 {
            AuthErrorKind::ExpiredToken
        } else {
            AuthErrorKind::Other
        }
    }

    /// A short remediation hint for this kind of failure.
    pub fn hint(&self) -> &'static str {
        match self {
            AuthErrorKind::MissingCredentials => {
                "hint: add the credentials required by `credentialType` to the configuration file"
            }
            AuthErrorKind::InvalidKey => {
                "hint: check that the key was copied correctly from the Google Cloud Console \
                 (https://console.cloud.google.com/apis/credentials) and that the Google Sheets API \
                 is enabled for the project"
            }
            AuthErrorKind::Permission => {
                "hint: open the spreadsheet, click \"Share\" and give \"Anyone with the link\" \
                 viewer access (or share it with the service account), then check the API key \
                 restrictions and that the Google Sheets API is enabled"
            }
            AuthErrorKind::NotFound => {
                "hint: check the spreadsheet id; it is the part of the URL between `/d/` and `/edit`"
            }
            AuthErrorKind::ExpiredToken => {
                "hint: the token was revoked or expired; obtain a new refresh token through the \
                 consent flow and update the configuration"
            }
            AuthErrorKind::InvalidClient => {
                "hint: check `clientId` and `clientSecret` against the OAuth 2.0 client in the \
                 Google Cloud Console"
            }
            AuthErrorKind::Other => "hint: run `l10ngen diagnose` for a step-by-step connection check",
        }
    }
}

impl Display for AuthErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthErrorKind::MissingCredentials => "missing credentials",
            AuthErrorKind::InvalidKey => "invalid key",
            AuthErrorKind::Permission => "permission denied",
            AuthErrorKind::NotFound => "not found",
            AuthErrorKind::ExpiredToken => "expired token",
            AuthErrorKind::InvalidClient => "invalid client",
            AuthErrorKind::Other => "rejected",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unknown_output_kind_error() {
        let error = Error::UnknownOutputKind("invalid".to_string());
        assert_eq!(
            error.to_string(),
            "unknown output kind `invalid` (expected dart, typescript or both)"
        );
    }

    #[test]
    fn test_authentication_error_carries_hint() {
        let error = Error::authentication(AuthErrorKind::NotFound, "Requested entity was not found.");
        let display = error.to_string();
        assert!(display.starts_with("authentication failed (not found): Requested entity"));
        assert!(display.contains("between `/d/` and `/edit`"));
    }

    #[test]
    fn test_write_error_names_path() {
        let error = Error::Write {
            path: PathBuf::from("out/app_en.arb"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let display = error.to_string();
        assert!(display.contains("out/app_en.arb"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_source_unavailable_keeps_source() {
        let source = Box::new(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let error = Error::source_unavailable("cannot open data.csv", Some(source));
        assert_eq!(error.to_string(), "source unavailable: cannot open data.csv");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_classify_provider_messages() {
        assert_eq!(
            AuthErrorKind::classify(400, "API key not valid. Please pass a valid API key."),
            AuthErrorKind::InvalidKey
        );
        assert_eq!(
            AuthErrorKind::classify(403, "The caller does not have permission"),
            AuthErrorKind::Permission
        );
        assert_eq!(
            AuthErrorKind::classify(404, "Requested entity was not found."),
            AuthErrorKind::NotFound
        );
        assert_eq!(
            AuthErrorKind::classify(400, "invalid_grant: Token has been expired or revoked."),
            AuthErrorKind::ExpiredToken
        );
        assert_eq!(
            AuthErrorKind::classify(401, "invalid_client: The OAuth client was not found."),
            AuthErrorKind::InvalidClient
        );
        assert_eq!(AuthErrorKind::classify(401, ""), AuthErrorKind::ExpiredToken);
        assert_eq!(AuthErrorKind::classify(400, "Bad range"), AuthErrorKind::Other);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InsufficientData("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InsufficientData"));
        assert!(debug.contains("test"));
    }
}
