use l10ngen::{
    Config, Credential, Error, SourceDescriptor,
    importer::{
        HttpTransport,
        auth::authorize,
        sheets::{SheetsClient, parse_document},
    },
    types::FIRST_LOCALE_COLUMN,
};

/// Walks through the sheet connection one step at a time, stopping at the
/// first failure.
pub fn run(config_path: &str) -> Result<(), Error> {
    println!("[1/5] Configuration: {}", config_path);
    let config = Config::load(config_path)?;
    let descriptor = config.source_descriptor()?;
    let (document, credential) = match &descriptor {
        SourceDescriptor::Csv { path } => {
            println!("  source is a CSV file ({}); diagnostics apply to Google Sheets only", path.display());
            return Ok(());
        }
        SourceDescriptor::Sheet {
            document,
            credential,
        } => (document, credential),
    };
    println!("  strategy: {}", descriptor.strategy_name());

    println!("[2/5] Spreadsheet reference");
    let reference = parse_document(document)?;
    println!("  id: {}", reference.id);
    if let Some(gid) = &reference.gid {
        println!("  gid: {}", gid);
    }

    println!("[3/5] Authorization");
    let transport = HttpTransport::new()?;
    let auth = authorize(&transport, credential)?;
    println!("  ✓ credentials accepted");

    println!("[4/5] Metadata");
    let client = SheetsClient::new(&transport, auth);
    let metadata = client.metadata(&reference.id)?;
    println!("  title: {}", metadata.title().unwrap_or("(untitled)"));
    println!("  sheets: {}", metadata.sheets.len());
    if let Some(first) = metadata.first_sheet() {
        println!("  first sheet: {}", first.title.as_deref().unwrap_or("(untitled)"));
        if let Some(grid) = first.grid_properties {
            println!(
                "  grid: {} rows x {} columns",
                grid.row_count.unwrap_or_default(),
                grid.column_count.unwrap_or_default()
            );
        }
    }

    println!("[5/5] Values");
    let honors_gid = matches!(credential, Credential::OAuth2(_) | Credential::Jwt(_));
    let gid = reference.gid.as_deref().filter(|_| honors_gid);
    let sheet = metadata.resolve_sheet_title(gid);
    let table = client.values(&reference.id, &sheet)?;
    println!("  sheet `{}`: {} rows", sheet, table.len());

    let locales = table.locales()?;
    let columns = table.header().map(Vec::len).unwrap_or_default();
    if columns <= FIRST_LOCALE_COLUMN {
        return Err(Error::DataMismatch(format!(
            "the header has {} column(s); expected key, description and at least one locale",
            columns
        )));
    }
    println!("  locales: {}", locales.join(", "));
    println!("  keys: {}", table.data_rows().len());
    println!("✓ The spreadsheet is ready for generation");
    Ok(())
}
