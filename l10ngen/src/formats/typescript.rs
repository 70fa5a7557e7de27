//! TypeScript modules: `translation.ts`, `translateFunction.ts` and one
//! `<locale>.ts` per locale.
//!
//! The interface and the accessors are documented with the first locale's
//! text, which is also where accessor parameters are read from.

use serde_json::{Map, Value};

use crate::{
    error::Error,
    placeholder::{accessor_name, extract_placeholders, strip_whitespace},
    types::{Artifact, RowView, Table},
};

pub const INTERFACE_FILE: &str = "translation.ts";
pub const ACCESSORS_FILE: &str = "translateFunction.ts";

const IMPORT_LINE: &str = "import { Translation } from \"./translation\";\n";

/// File name of the module for `locale`.
pub fn file_name(locale: &str) -> String {
    format!("{}.ts", locale)
}

/// Renders the interface member for one row.
fn interface_member(row: &RowView<'_>) -> String {
    format!(
        "\n  /**\n   * {}: {}\n   */\n  {}: string;",
        strip_whitespace(row.translation(0)),
        row.description(),
        row.key()
    )
}

/// Renders the accessor for one row, or `None` if its base text has no placeholder.
pub fn accessor(key: &str, base_text: &str, description: &str) -> Option<String> {
    let params = extract_placeholders(base_text);
    if params.is_empty() {
        return None;
    }
    let fields: Vec<String> = params.iter().map(|p| format!("{}: string;", p)).collect();
    let substitutions: String = params
        .iter()
        .map(|p| format!(".replaceAll(\"{{{p}}}\", params.{p})"))
        .collect();
    Some(format!(
        "\n/**\n * {}: {}\n */\nexport const {} = (t: Translation, params: {{ {} }}) => t.{}{};",
        strip_whitespace(base_text),
        description,
        accessor_name(key),
        fields.join(" "),
        key,
        substitutions
    ))
}

/// `translation.ts`: the `Translation` interface with one member per key.
pub fn render_interface(table: &Table) -> Artifact {
    let members: Vec<String> = table
        .data_rows()
        .iter()
        .map(|cells| interface_member(&RowView::new(cells)))
        .collect();
    Artifact::new(
        INTERFACE_FILE,
        format!("export interface Translation {{{}\n}}", members.join("\n")),
    )
}

/// `translateFunction.ts`: one accessor per key whose base text has placeholders.
pub fn render_accessors(table: &Table) -> Artifact {
    let accessors: Vec<String> = table
        .data_rows()
        .iter()
        .filter_map(|cells| {
            let row = RowView::new(cells);
            accessor(row.key(), row.translation(0), row.description())
        })
        .collect();
    Artifact::new(
        ACCESSORS_FILE,
        format!("{}{}\n", IMPORT_LINE, accessors.join("\n")),
    )
}

/// `<locale>.ts`: the locale's key to text object, pretty-printed.
pub fn render_locale_module(table: &Table, locale: &str, offset: usize) -> Result<Artifact, Error> {
    let mut object = Map::new();
    for cells in table.data_rows() {
        let row = RowView::new(cells);
        object.insert(
            row.key().to_string(),
            Value::String(row.translation(offset).to_string()),
        );
    }
    let body = serde_json::to_string_pretty(&Value::Object(object))?;
    Ok(Artifact::new(
        file_name(locale),
        format!(
            "{}\nexport const translation: Translation = {};",
            IMPORT_LINE, body
        ),
    ))
}

/// Renders every TypeScript artifact: interface, accessors, then one module per locale.
pub fn render(table: &Table) -> Result<Vec<Artifact>, Error> {
    let locales = table.locales()?;
    let mut artifacts = vec![render_interface(table), render_accessors(table)];
    for (offset, locale) in locales.iter().enumerate() {
        artifacts.push(render_locale_module(table, locale, offset)?);
    }
    tracing::debug!(event = "typescript_rendered", locales = locales.len(), keys = table.data_rows().len());
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn table(data: &[&[&str]]) -> Table {
        Table::new(
            data.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn sample() -> Table {
        table(&[
            &["key", "description", "ja", "en"],
            &["hello", "Greeting", "こんにちは", "Hello"],
            &["welcome", "Welcome message", "ようこそ、{name}さん", "Welcome, {name}"],
        ])
    }

    #[test]
    fn test_interface() {
        let artifact = render_interface(&sample());
        assert_eq!(artifact.name, "translation.ts");
        assert_eq!(
            artifact.content,
            indoc! {"
                export interface Translation {
                  /**
                   * こんにちは: Greeting
                   */
                  hello: string;

                  /**
                   * ようこそ、{name}さん: Welcome message
                   */
                  welcome: string;
                }"}
        );
    }

    #[test]
    fn test_accessors() {
        let artifact = render_accessors(&sample());
        assert_eq!(artifact.name, "translateFunction.ts");
        assert_eq!(
            artifact.content,
            concat!(
                "import { Translation } from \"./translation\";\n",
                "\n/**\n * ようこそ、{name}さん: Welcome message\n */\n",
                "export const welcome = (t: Translation, params: { name: string; }) => ",
                "t.welcome.replaceAll(\"{name}\", params.name);\n",
            )
        );
    }

    #[test]
    fn test_accessor_multiple_params_and_camel_case() {
        let rendered = accessor("error_count", "{count} errors in {file} ({count})", "Errors").unwrap();
        assert!(rendered.contains("export const errorCount = (t: Translation, params: { count: string; file: string; })"));
        assert!(rendered.ends_with(
            "t.error_count.replaceAll(\"{count}\", params.count).replaceAll(\"{file}\", params.file);"
        ));
        assert!(accessor("hello", "Hello", "Greeting").is_none());
    }

    #[test]
    fn test_accessors_without_placeholders() {
        let artifact = render_accessors(&table(&[&["key", "description", "en"], &["a", "b", "plain"]]));
        assert_eq!(artifact.content, "import { Translation } from \"./translation\";\n\n");
    }

    #[test]
    fn test_locale_module() {
        let artifact = render_locale_module(&sample(), "en", 1).unwrap();
        assert_eq!(artifact.name, "en.ts");
        assert_eq!(
            artifact.content,
            indoc! {r#"
                import { Translation } from "./translation";

                export const translation: Translation = {
                  "hello": "Hello",
                  "welcome": "Welcome, {name}"
                };"#}
        );
    }

    #[test]
    fn test_render_names_in_order() {
        let names: Vec<String> = render(&sample()).unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["translation.ts", "translateFunction.ts", "ja.ts", "en.ts"]);
    }

    #[test]
    fn test_render_requires_data_rows() {
        assert!(matches!(
            render(&table(&[&["key", "description", "en"]])),
            Err(Error::InsufficientData(_))
        ));
    }
}
