//! Turning a [`Credential`] into something the Sheets API accepts.
//!
//! API keys travel as a query parameter; OAuth2 and service-account
//! credentials are exchanged for a bearer token first. Provider error bodies
//! are classified here so every strategy reports the same remediation hints.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{AuthErrorKind, Error},
    importer::transport::{HttpResponse, Transport},
    source::{
        Credential, GOOGLE_TOKEN_URI, OAuth2Credentials, SPREADSHEETS_READONLY_SCOPE, Secret,
        ServiceAccount,
    },
};

const CONSENT_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// How requests to the Sheets API are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuth {
    Anonymous,
    ApiKey(Secret),
    Bearer(Secret),
}

/// Resolves a credential into request authorization, exchanging tokens where needed.
pub fn authorize(transport: &dyn Transport, credential: &Credential) -> Result<ApiAuth, Error> {
    match credential {
        Credential::None => Ok(ApiAuth::Anonymous),
        Credential::ApiKey(key) => {
            if key.expose().trim().is_empty() {
                return Err(Error::authentication(
                    AuthErrorKind::MissingCredentials,
                    "an API key is required for credentialType `apiKey`",
                ));
            }
            Ok(ApiAuth::ApiKey(key.clone()))
        }
        Credential::OAuth2(creds) => oauth2_access_token(transport, creds).map(ApiAuth::Bearer),
        Credential::Jwt(account) => {
            service_account_access_token(transport, account).map(ApiAuth::Bearer)
        }
    }
}

/// Builds the URL a user visits to grant offline, read-only spreadsheet access.
pub fn consent_url(creds: &OAuth2Credentials) -> Result<String, Error> {
    let url = Url::parse_with_params(
        CONSENT_ENDPOINT,
        &[
            ("access_type", "offline"),
            ("scope", SPREADSHEETS_READONLY_SCOPE),
            ("response_type", "code"),
            ("prompt", "consent"),
            ("client_id", creds.client_id.as_str()),
            ("redirect_uri", creds.redirect_uri.as_str()),
        ],
    )
    .map_err(|e| Error::InvalidSource(format!("cannot build consent URL: {}", e)))?;
    Ok(url.into())
}

/// Obtains an access token for OAuth2 client credentials.
///
/// A refresh token is always exchanged for a fresh access token; a lone
/// access token is used as-is. Without either, the error carries the consent
/// URL to visit.
pub fn oauth2_access_token(
    transport: &dyn Transport,
    creds: &OAuth2Credentials,
) -> Result<Secret, Error> {
    if creds.client_id.is_empty() || creds.client_secret.expose().is_empty() {
        return Err(Error::authentication(
            AuthErrorKind::MissingCredentials,
            "OAuth2 requires `clientId` and `clientSecret`",
        ));
    }

    match (&creds.refresh_token, &creds.access_token) {
        (Some(refresh_token), _) => {
            tracing::debug!(event = "oauth2_refresh", client_id = %creds.client_id);
            let response = transport.post_form(
                GOOGLE_TOKEN_URI,
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token.expose()),
                    ("client_id", creds.client_id.as_str()),
                    ("client_secret", creds.client_secret.expose()),
                ],
            )?;
            parse_token_response(&response, "OAuth2 token refresh")
        }
        (None, Some(access_token)) => Ok(access_token.clone()),
        (None, None) => Err(Error::authentication(
            AuthErrorKind::MissingCredentials,
            format!(
                "OAuth2 authentication required. Please visit: {}",
                consent_url(creds)?
            ),
        )),
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<&'a str>,
}

/// Signs a service-account assertion and exchanges it for an access token.
pub fn service_account_access_token(
    transport: &dyn Transport,
    account: &ServiceAccount,
) -> Result<Secret, Error> {
    let assertion = sign_assertion(account, now_secs())?;
    tracing::debug!(event = "jwt_authorize", client_email = %account.client_email, token_uri = %account.token_uri);
    let response = transport.post_form(
        &account.token_uri,
        &[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())],
    )?;
    parse_token_response(&response, "service account authorization")
}

/// Builds the RS256-signed JWT assertion for `account`, issued at `issued_at`.
pub fn sign_assertion(account: &ServiceAccount, issued_at: u64) -> Result<String, Error> {
    let key = EncodingKey::from_rsa_pem(account.private_key.expose().as_bytes()).map_err(|e| {
        Error::authentication(
            AuthErrorKind::InvalidKey,
            format!("cannot read the service account private key: {}", e),
        )
    })?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = account.private_key_id.clone();

    let claims = AssertionClaims {
        iss: &account.client_email,
        scope: account.scopes.join(" "),
        aud: &account.token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
        sub: account.subject.as_deref(),
    };

    jsonwebtoken::encode(&header, &claims, &key).map_err(|e| {
        Error::authentication(
            AuthErrorKind::InvalidKey,
            format!("cannot sign the service account assertion: {}", e),
        )
    })
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn parse_token_response(response: &HttpResponse, context: &str) -> Result<Secret, Error> {
    if !response.is_success() {
        return Err(provider_error(context, response));
    }
    let token: TokenResponse = serde_json::from_str(&response.body).map_err(|e| {
        Error::source_unavailable(
            format!("{}: unexpected token response", context),
            Some(Box::new(e)),
        )
    })?;
    Ok(Secret::new(token.access_token))
}

/// Maps an unsuccessful provider response to a typed error.
///
/// Understands both the Google API shape (`{"error": {"message", "status"}}`)
/// and the OAuth2 token endpoint shape (`{"error", "error_description"}`).
pub(crate) fn provider_error(context: &str, response: &HttpResponse) -> Error {
    let message = provider_message(&response.body);
    tracing::debug!(event = "provider_error", context = %context, status = response.status, message = ?message);

    if response.status >= 500 || !(400..500).contains(&response.status) {
        return Error::source_unavailable(
            format!(
                "{}: HTTP {}{}",
                context,
                response.status,
                message.map(|m| format!(" ({})", m)).unwrap_or_default()
            ),
            None,
        );
    }

    let message = message.unwrap_or_else(|| format!("HTTP {}", response.status));
    Error::authentication(
        AuthErrorKind::classify(response.status, &message),
        format!("{}: {}", context, message),
    )
}

fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::Object(error) => {
            let message = error.get("message").and_then(|m| m.as_str()).unwrap_or_default();
            let status = error.get("status").and_then(|s| s.as_str()).unwrap_or_default();
            let text = match (message.is_empty(), status.is_empty()) {
                (false, false) => format!("{} [{}]", message, status),
                (false, true) => message.to_string(),
                (true, false) => status.to_string(),
                (true, true) => return None,
            };
            Some(text)
        }
        serde_json::Value::String(code) => {
            let description = value
                .get("error_description")
                .and_then(|d| d.as_str())
                .unwrap_or_default();
            if description.is_empty() {
                Some(code.clone())
            } else {
                Some(format!("{}: {}", code, description))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DEFAULT_REDIRECT_URI;

    fn oauth2(refresh: Option<&str>, access: Option<&str>) -> OAuth2Credentials {
        OAuth2Credentials {
            client_id: "client-id.apps.googleusercontent.com".to_string(),
            client_secret: Secret::new("shh"),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            refresh_token: refresh.map(Secret::new),
            access_token: access.map(Secret::new),
        }
    }

    #[test]
    fn test_consent_url_contains_client_and_scope() {
        let url = consent_url(&oauth2(None, None)).unwrap();
        assert!(url.starts_with(CONSENT_ENDPOINT));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("client_id=client-id.apps.googleusercontent.com"));
        assert!(url.contains("spreadsheets.readonly"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Foauth2callback"));
    }

    #[test]
    fn test_provider_message_google_shape() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            provider_message(body).unwrap(),
            "The caller does not have permission [PERMISSION_DENIED]"
        );
    }

    #[test]
    fn test_provider_message_token_shape() {
        let body = r#"{"error": "invalid_grant", "error_description": "Token has been expired or revoked."}"#;
        assert_eq!(
            provider_message(body).unwrap(),
            "invalid_grant: Token has been expired or revoked."
        );
        assert!(provider_message("<html>oops</html>").is_none());
    }

    #[test]
    fn test_provider_error_mapping() {
        let not_found = provider_error(
            "metadata",
            &HttpResponse::new(404, r#"{"error": {"message": "Requested entity was not found.", "status": "NOT_FOUND"}}"#),
        );
        assert!(matches!(
            not_found,
            Error::Authentication {
                kind: AuthErrorKind::NotFound,
                ..
            }
        ));

        let server = provider_error("metadata", &HttpResponse::new(503, "unavailable"));
        assert!(matches!(server, Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_sign_assertion_rejects_garbage_key() {
        let account = ServiceAccount {
            client_email: "bot@example.com".to_string(),
            private_key: Secret::new("not a pem"),
            private_key_id: None,
            scopes: vec![SPREADSHEETS_READONLY_SCOPE.to_string()],
            subject: None,
            token_uri: GOOGLE_TOKEN_URI.to_string(),
        };
        let err = sign_assertion(&account, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication {
                kind: AuthErrorKind::InvalidKey,
                ..
            }
        ));
    }
}
