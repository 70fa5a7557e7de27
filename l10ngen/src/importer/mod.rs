//! Importing rows from a [`SourceDescriptor`].
//!
//! [`Importer::fetch`] is the single place where the descriptor is matched
//! and a strategy chosen.

pub mod auth;
pub mod delimited;
pub mod sheets;
pub mod transport;

use crate::{
    error::Error,
    source::{Credential, SourceDescriptor},
    types::Table,
};

pub use transport::{HttpResponse, HttpTransport, Transport};

/// Runs the import strategy a descriptor selects.
pub struct Importer {
    transport: Box<dyn Transport>,
}

impl Importer {
    /// An importer that talks HTTP through `reqwest`.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }

    /// An importer that sends every request through `transport`.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Produces the rows described by `descriptor`, header first.
    pub fn fetch(&self, descriptor: &SourceDescriptor) -> Result<Table, Error> {
        tracing::info!(event = "import_start", strategy = descriptor.strategy_name());
        let transport = self.transport();
        match descriptor {
            SourceDescriptor::Csv { path } => delimited::import(path),
            SourceDescriptor::Sheet {
                document,
                credential,
            } => match credential {
                Credential::None => sheets::import_public(transport, document),
                Credential::ApiKey(key) => sheets::import_with_api_key(transport, document, key),
                Credential::OAuth2(creds) => sheets::import_with_oauth2(transport, document, creds),
                Credential::Jwt(account) => {
                    sheets::import_with_service_account(transport, document, account)
                }
            },
        }
    }
}
