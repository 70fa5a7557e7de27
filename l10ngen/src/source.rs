//! Source descriptors and credential normalization.
//!
//! Configuration may spell the same credential in several shapes (OAuth2
//! tokens nested or flat, service accounts inline or as a key file). The raw
//! shapes below are deserialized as-is and normalized exactly once into
//! [`Credential`], so the fetch strategies only ever see one canonical form.

use std::{
    fmt::{Debug, Formatter},
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::Error;

/// Read-only access to spreadsheets; the default service-account scope.
pub const SPREADSHEETS_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";
/// Token endpoint used when a key file does not name one.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
/// Redirect URI used for the consent URL when none is configured.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/oauth2callback";

/// Selects and parameterizes one import strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    /// A delimited text file on disk.
    Csv { path: PathBuf },
    /// A Google spreadsheet, given as a bare id or a full URL.
    Sheet {
        document: String,
        credential: Credential,
    },
}

impl SourceDescriptor {
    /// Short name of the strategy this descriptor selects, for logs.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            SourceDescriptor::Csv { .. } => "csv",
            SourceDescriptor::Sheet { credential, .. } => match credential {
                Credential::None => "sheet",
                Credential::ApiKey(_) => "sheet+apiKey",
                Credential::OAuth2(_) => "sheet+oauth2",
                Credential::Jwt(_) => "sheet+jwt",
            },
        }
    }
}

/// A secret string whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Canonical credential for the spreadsheet strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    None,
    ApiKey(Secret),
    OAuth2(OAuth2Credentials),
    Jwt(ServiceAccount),
}

/// Normalized OAuth2 client credentials.
///
/// Whether at least one token is present is checked by the OAuth2 strategy,
/// which answers a missing token with a consent URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth2Credentials {
    pub client_id: String,
    pub client_secret: Secret,
    pub redirect_uri: String,
    pub refresh_token: Option<Secret>,
    pub access_token: Option<Secret>,
}

/// Normalized service-account credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: Secret,
    pub private_key_id: Option<String>,
    pub scopes: Vec<String>,
    pub subject: Option<String>,
    pub token_uri: String,
}

/// OAuth2 settings as they appear in the configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOAuth2 {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub credentials: Option<RawTokens>,
}

/// Tokens nested under `credentials`, in either snake or camel case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokens {
    #[serde(alias = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(alias = "accessToken")]
    pub access_token: Option<String>,
}

/// Service-account settings: a key file path or an inline structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawJwt {
    KeyFile(PathBuf),
    Inline(RawServiceAccount),
}

/// Inline service-account settings. `keyFile` may still point at a key file
/// whose values fill in whatever is not given inline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceAccount {
    pub email: Option<String>,
    pub key: Option<String>,
    pub key_id: Option<String>,
    pub key_file: Option<PathBuf>,
    pub scopes: Option<ScopeList>,
    pub subject: Option<String>,
}

/// Scopes given either as one space-separated string or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScopeList {
    One(String),
    Many(Vec<String>),
}

impl ScopeList {
    fn into_vec(self) -> Vec<String> {
        match self {
            ScopeList::One(s) => s.split_whitespace().map(str::to_string).collect(),
            ScopeList::Many(v) => v,
        }
    }
}

/// The provider-issued JSON key file of a service account.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKeyFile {
    client_email: Option<String>,
    private_key: Option<String>,
    private_key_id: Option<String>,
    token_uri: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawOAuth2 {
    /// Collapses nested and flat token fields into one [`OAuth2Credentials`].
    ///
    /// Flat fields win over nested ones when both are present.
    pub fn normalize(self) -> OAuth2Credentials {
        let nested = self.credentials.unwrap_or_default();
        OAuth2Credentials {
            client_id: non_empty(self.client_id).unwrap_or_default(),
            client_secret: Secret::new(non_empty(self.client_secret).unwrap_or_default()),
            redirect_uri: non_empty(self.redirect_uri)
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            refresh_token: non_empty(self.refresh_token)
                .or_else(|| non_empty(nested.refresh_token))
                .map(Secret::new),
            access_token: non_empty(self.access_token)
                .or_else(|| non_empty(nested.access_token))
                .map(Secret::new),
        }
    }
}

impl RawJwt {
    /// Resolves key files (relative to `base_dir`) and produces a [`ServiceAccount`].
    pub fn normalize(self, base_dir: &Path) -> Result<ServiceAccount, Error> {
        let inline = match self {
            RawJwt::KeyFile(path) => RawServiceAccount {
                key_file: Some(path),
                ..RawServiceAccount::default()
            },
            RawJwt::Inline(inline) => inline,
        };

        let key_file = match &inline.key_file {
            Some(path) => Some(read_key_file(&base_dir.join(path))?),
            None => None,
        };
        let (file_email, file_key, file_key_id, file_token_uri) = match key_file {
            Some(k) => (k.client_email, k.private_key, k.private_key_id, k.token_uri),
            None => (None, None, None, None),
        };

        let client_email = non_empty(inline.email).or(non_empty(file_email)).ok_or_else(|| {
            Error::authentication(
                crate::error::AuthErrorKind::MissingCredentials,
                "service account credentials need `email` (or `client_email` in the key file)",
            )
        })?;
        let private_key = non_empty(inline.key).or(non_empty(file_key)).ok_or_else(|| {
            Error::authentication(
                crate::error::AuthErrorKind::MissingCredentials,
                "service account credentials need `key` (or `private_key` in the key file)",
            )
        })?;

        let mut scopes = inline.scopes.map(ScopeList::into_vec).unwrap_or_default();
        if scopes.is_empty() {
            scopes.push(SPREADSHEETS_READONLY_SCOPE.to_string());
        }

        Ok(ServiceAccount {
            client_email,
            // Keys pasted into YAML often carry literal `\n` sequences.
            private_key: Secret::new(private_key.replace("\\n", "\n")),
            private_key_id: non_empty(inline.key_id).or(non_empty(file_key_id)),
            scopes,
            subject: non_empty(inline.subject),
            token_uri: non_empty(file_token_uri).unwrap_or_else(|| GOOGLE_TOKEN_URI.to_string()),
        })
    }
}

fn read_key_file(path: &Path) -> Result<ServiceAccountKeyFile, Error> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read service account key file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("invalid service account key file {}: {}", path.display(), e))
    })
}
