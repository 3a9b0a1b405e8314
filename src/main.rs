use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use lava_query::{Config, PrefixRegistry, QueryParser};

fn main() -> Result<()> {
    // Inicializar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lava_query=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🎵 query-inspect v{}", env!("CARGO_PKG_VERSION"));

    // Cargar configuración
    let config = Config::load()?;
    info!("{}", config.summary());

    let registry = Arc::new(PrefixRegistry::new());
    config.apply(&registry)?;

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--prefixes") {
        let mut prefixes = registry.list_prefixes();
        prefixes.sort();
        for prefix in prefixes {
            println!("{}", prefix);
        }
        return Ok(());
    }

    if args.is_empty() {
        anyhow::bail!("Uso: query-inspect [--prefixes] <QUERY>...");
    }

    let parser = QueryParser::new(registry, config.default_search_mode.clone());
    for query in &args {
        let parsed = parser.parse(query);
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    }

    Ok(())
}
