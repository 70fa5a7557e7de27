//! Dart ARB bundles (`app_<locale>.arb`).
//!
//! One bundle per locale: `"@@locale"` first, then for every data row the
//! translation under its key and an `"@<key>"` metadata object carrying the
//! description and, when the text has placeholders, their declarations.
//! Output is compact JSON in row order.

use serde_json::{Map, Value, json};

use crate::{
    error::Error,
    placeholder::extract_placeholders,
    types::{Artifact, FIRST_LOCALE_COLUMN, Row, RowView, Table},
};

/// File name of the bundle for `locale`.
pub fn file_name(locale: &str) -> String {
    format!("app_{}.arb", locale)
}

/// Placeholder declarations for `text`, or `None` when it has none.
pub fn placeholder_metadata(text: &str) -> Option<Map<String, Value>> {
    let names = extract_placeholders(text);
    if names.is_empty() {
        return None;
    }
    let mut placeholders = Map::new();
    for name in names {
        let declaration = json!({ "type": "String", "example": name });
        placeholders.insert(name, declaration);
    }
    Some(placeholders)
}

/// Renders the bundle for one locale from raw rows (header first).
///
/// Returns `Ok(None)` for empty input. A header without data rows is
/// [`Error::InsufficientData`]; a locale the header does not name is
/// [`Error::DataMismatch`].
pub fn render_locale(rows: &[Row], locale: &str) -> Result<Option<Artifact>, Error> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(None);
    };
    let offset = header
        .iter()
        .skip(FIRST_LOCALE_COLUMN)
        .position(|label| label == locale)
        .ok_or_else(|| {
            Error::DataMismatch(format!("locale `{}` is not a column of the header", locale))
        })?;
    if data.is_empty() {
        return Err(Error::InsufficientData(format!(
            "no data rows to render for locale `{}`",
            locale
        )));
    }

    let mut bundle = Map::new();
    bundle.insert("@@locale".to_string(), Value::String(locale.to_string()));
    for cells in data {
        let row = RowView::new(cells);
        let text = row.translation(offset);

        let mut metadata = Map::new();
        metadata.insert(
            "description".to_string(),
            Value::String(row.description().to_string()),
        );
        if let Some(placeholders) = placeholder_metadata(text) {
            metadata.insert("placeholders".to_string(), Value::Object(placeholders));
        }

        bundle.insert(row.key().to_string(), Value::String(text.to_string()));
        bundle.insert(format!("@{}", row.key()), Value::Object(metadata));
    }

    let content = serde_json::to_string(&Value::Object(bundle))?;
    tracing::debug!(event = "arb_rendered", locale = %locale, entries = data.len());
    Ok(Some(Artifact::new(file_name(locale), content)))
}

/// Renders one bundle per locale named in the table header, in header order.
pub fn render(table: &Table) -> Result<Vec<Artifact>, Error> {
    let locales = table.locales()?;
    let mut artifacts = Vec::with_capacity(locales.len());
    for locale in &locales {
        if let Some(artifact) = render_locale(table.rows(), locale)? {
            artifacts.push(artifact);
        }
    }
    Ok(artifacts)
}
