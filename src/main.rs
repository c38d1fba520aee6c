/// Mechaway Catalog: built-in system workflow templates
///
/// Entry point for the catalog CLI. Builds the system workflow registry (aborting if any
/// built-in template is malformed) and prints the catalog to stdout.
/// Configuration comes from the environment:
/// - MECHAWAY_CATALOG_OUTPUT: summary | json
/// - MECHAWAY_CATALOG_SLUG: print a single template
/// - MECHAWAY_LOG: log level (logs go to stderr)

use mechaway_catalog::{build_catalog, config::Config, render};

fn main() -> anyhow::Result<()> {
    let config = Config::default();

    let level = config.logging.max_level();
    tracing_subscriber::fmt()
        .with_max_level(level.unwrap_or(tracing::Level::INFO))
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    if level.is_none() {
        tracing::warn!(
            "⚠️ Invalid MECHAWAY_LOG level '{}', falling back to info",
            config.logging.level
        );
    }

    let catalog = build_catalog(&config)?;
    let output = render(&catalog.load(), &config.catalog)?;
    print!("{}", output);

    Ok(())
}
