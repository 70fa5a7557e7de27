#![forbid(unsafe_code)]
//! Localization file generator.
//!
//! Reads a table of `key, description, <locale>...` rows from a CSV file or a
//! Google spreadsheet and renders it as Dart ARB bundles and/or TypeScript
//! modules.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use l10ngen::{ArtifactGenerator, Config, FsSink, Importer};
//!
//! let config = Config::load("l10n-generator.config.yaml")?;
//! let kind = config.output_kind()?;
//! let table = Importer::new()?.fetch(&config.source_descriptor()?)?;
//! let mut sink = FsSink::new(&config.localize_path);
//! ArtifactGenerator::new(kind).emit(&table, &mut sink)?;
//! # Ok::<(), l10ngen::Error>(())
//! ```
//!
//! # Sources
//!
//! - **CSV**: UTF-8 or UTF-16 (with BOM), RFC 4180 quoting
//! - **Google Sheets**: public, API key, OAuth2 or service account (JWT)
//!
//! # Outputs
//!
//! - **Dart**: `app_<locale>.arb`
//! - **TypeScript**: `translation.ts`, `translateFunction.ts`, `<locale>.ts`

pub mod config;
pub mod error;
pub mod formats;
pub mod generator;
pub mod importer;
pub mod placeholder;
pub mod sink;
pub mod source;
pub mod traits;
pub mod types;

pub use crate::{
    config::Config,
    error::{AuthErrorKind, Error},
    formats::OutputKind,
    generator::ArtifactGenerator,
    importer::{Importer, Transport},
    sink::{FsSink, MemorySink},
    source::{Credential, SourceDescriptor},
    traits::Sink,
    types::{Artifact, Row, Table},
};
