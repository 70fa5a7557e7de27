//! Turning a [`Table`] into artifacts and handing them to a [`Sink`].

use crate::{
    error::Error,
    formats::{OutputKind, arb, typescript},
    traits::Sink,
    types::{Artifact, Table},
};

/// Generates the artifacts of one [`OutputKind`].
///
/// # Example
///
/// ```rust
/// use l10ngen::{ArtifactGenerator, MemorySink, OutputKind, Table};
///
/// let table = Table::new(vec![
///     vec!["key".into(), "description".into(), "en".into()],
///     vec!["hello".into(), "Greeting".into(), "Hello".into()],
/// ]);
/// let mut sink = MemorySink::new();
/// ArtifactGenerator::new(OutputKind::Dart).emit(&table, &mut sink)?;
/// assert!(sink.get("app_en.arb").is_some());
/// # Ok::<(), l10ngen::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArtifactGenerator {
    kind: OutputKind,
}

impl ArtifactGenerator {
    pub fn new(kind: OutputKind) -> Self {
        Self { kind }
    }

    /// Renders every artifact in memory: ARB bundles first, then TypeScript.
    pub fn generate(&self, table: &Table) -> Result<Vec<Artifact>, Error> {
        let locales = table.locales()?;
        tracing::info!(event = "generate", kind = %self.kind, locales = locales.len(), keys = table.data_rows().len());

        let mut artifacts = Vec::new();
        if self.kind.includes_dart() {
            artifacts.extend(arb::render(table)?);
        }
        if self.kind.includes_typescript() {
            artifacts.extend(typescript::render(table)?);
        }
        Ok(artifacts)
    }

    /// Generates and writes every artifact, returning the names written.
    ///
    /// Nothing reaches the sink unless all artifacts rendered successfully.
    pub fn emit(&self, table: &Table, sink: &mut dyn Sink) -> Result<Vec<String>, Error> {
        let artifacts = self.generate(table)?;
        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            sink.write_text(&artifact.name, &artifact.content)?;
            written.push(artifact.name);
        }
        Ok(written)
    }
}
