use l10ngen::{ArtifactGenerator, Config, Error, FsSink, Importer};

/// Runs the full import and generation pipeline for the config at `config_path`.
pub fn run(config_path: &str) -> Result<(), Error> {
    let config = Config::load(config_path)?;
    println!("Configuration: {}", config_path);
    println!("  source: {:?} {}", config.file_type, config.path);
    println!("  output: {} -> {}", config.output_type, config.localize_path.display());

    // An unknown output kind must fail before anything is fetched or written.
    let kind = config.output_kind()?;
    let descriptor = config.source_descriptor()?;

    println!("Importing ({})...", descriptor.strategy_name());
    let table = Importer::new()?.fetch(&descriptor)?;
    println!("  {} rows imported", table.len());

    let mut sink = FsSink::new(&config.localize_path);
    let written = ArtifactGenerator::new(kind).emit(&table, &mut sink)?;
    for name in &written {
        println!("✓ {}", config.localize_path.join(name).display());
    }
    println!("Generated {} file(s)", written.len());
    Ok(())
}
