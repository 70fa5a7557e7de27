//! YAML configuration (`l10n-generator.config.yaml`).
//!
//! ```yaml
//! fileType: sheet
//! path: https://docs.google.com/spreadsheets/d/<id>/edit#gid=0
//! credentialType: apiKey
//! apiKey: AIza...
//! localizePath: ./lib/l10n/
//! outputType: both
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{AuthErrorKind, Error},
    formats::OutputKind,
    source::{Credential, RawJwt, RawOAuth2, Secret, SourceDescriptor},
};

pub const DEFAULT_CONFIG_FILE: &str = "l10n-generator.config.yaml";
pub const DEFAULT_DIAGNOSE_CONFIG_FILE: &str = "test.config.yaml";
const DEFAULT_OUTPUT_TYPE: &str = "dart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Sheet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum CredentialType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "apiKey", alias = "apikey")]
    ApiKey,
    #[serde(rename = "oauth2")]
    OAuth2,
    #[serde(rename = "jwt")]
    Jwt,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    file_type: Option<FileType>,
    path: Option<String>,
    #[serde(default)]
    credential_type: CredentialType,
    api_key: Option<String>,
    oauth2: Option<RawOAuth2>,
    jwt: Option<RawJwt>,
    localize_path: Option<PathBuf>,
    output_type: Option<String>,
}

/// Validated configuration.
#[derive(Clone)]
pub struct Config {
    pub file_type: FileType,
    /// CSV path, spreadsheet id or spreadsheet URL.
    pub path: String,
    pub credential_type: CredentialType,
    api_key: Option<String>,
    oauth2: Option<RawOAuth2>,
    jwt: Option<RawJwt>,
    /// Output directory for generated artifacts.
    pub localize_path: PathBuf,
    /// Raw `outputType`; parsed lazily so it can fail before import.
    pub output_type: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("file_type", &self.file_type)
            .field("path", &self.path)
            .field("credential_type", &self.credential_type)
            .field("localize_path", &self.localize_path)
            .field("output_type", &self.output_type)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads and validates the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        tracing::debug!(event = "config_load", path = %path.display());
        Self::from_yaml_str(&content)
    }

    /// Parses configuration from YAML text. Relative paths resolve against
    /// the current directory.
    pub fn from_yaml_str(content: &str) -> Result<Self, Error> {
        let raw: RawConfig = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid configuration: {}", e)))?;

        let path = raw
            .path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        let localize_path = raw.localize_path.filter(|p| !p.as_os_str().is_empty());

        let missing: Vec<&str> = [
            ("fileType", raw.file_type.is_none()),
            ("path", path.is_none()),
            ("localizePath", localize_path.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(file_type), Some(path), Some(localize_path)) =
            (raw.file_type, path, localize_path)
        else {
            return Err(Error::Config(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        };

        Ok(Config {
            file_type,
            path,
            credential_type: raw.credential_type,
            api_key: raw.api_key,
            oauth2: raw.oauth2,
            jwt: raw.jwt,
            localize_path,
            output_type: raw
                .output_type
                .unwrap_or_else(|| DEFAULT_OUTPUT_TYPE.to_string()),
        })
    }

    /// Parses `outputType`.
    pub fn output_kind(&self) -> Result<OutputKind, Error> {
        self.output_type.parse()
    }

    /// Builds the source descriptor, normalizing credentials (and reading a
    /// service-account key file if one is configured).
    pub fn source_descriptor(&self) -> Result<SourceDescriptor, Error> {
        match self.file_type {
            FileType::Csv => Ok(SourceDescriptor::Csv {
                path: PathBuf::from(&self.path),
            }),
            FileType::Sheet => Ok(SourceDescriptor::Sheet {
                document: self.path.clone(),
                credential: self.credential()?,
            }),
        }
    }

    fn credential(&self) -> Result<Credential, Error> {
        match self.credential_type {
            CredentialType::None => Ok(Credential::None),
            CredentialType::ApiKey => {
                let key = self
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        Error::authentication(
                            AuthErrorKind::MissingCredentials,
                            "credentialType `apiKey` requires `apiKey`",
                        )
                    })?;
                Ok(Credential::ApiKey(Secret::new(key)))
            }
            CredentialType::OAuth2 => {
                let raw = self.oauth2.clone().ok_or_else(|| {
                    Error::authentication(
                        AuthErrorKind::MissingCredentials,
                        "credentialType `oauth2` requires an `oauth2` section",
                    )
                })?;
                Ok(Credential::OAuth2(raw.normalize()))
            }
            CredentialType::Jwt => {
                let raw = self.jwt.clone().ok_or_else(|| {
                    Error::authentication(
                        AuthErrorKind::MissingCredentials,
                        "credentialType `jwt` requires a `jwt` section",
                    )
                })?;
                Ok(Credential::Jwt(raw.normalize(Path::new("."))?))
            }
        }
    }
}
