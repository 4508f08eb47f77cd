use std::{env, fs};

use anyhow::{bail, Context};
use dom_slides::{export_document, ExportConfig, NoopRasterizer, SlideDeck, StyledDocument};

// Usage: export_deck <styled_tree.json> [config.json] [out.json]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(input_path) = args.first() else {
        bail!("usage: export_deck <styled_tree.json> [config.json] [out.json]");
    };
    let config_path = args.get(1).filter(|path| path.as_str() != "-");
    let output_path = args.get(2).map(String::as_str).unwrap_or("deck.json");

    log::info!("Loading styled tree from {}...", input_path);
    let json = fs::read_to_string(input_path)
        .with_context(|| format!("Unable to read styled tree {}", input_path))?;
    let document = StyledDocument::from_json_str(&json).context("Invalid styled tree JSON")?;

    let config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Unable to read config {}", path))?;
            ExportConfig::from_json_str(&json)?
        }
        None => ExportConfig::default(),
    };

    let mut deck = SlideDeck::new();
    let report = export_document(&document, &config, &NoopRasterizer, &mut deck).await?;
    for diagnostic in &report.diagnostics {
        log::warn!("{}", serde_json::to_string(diagnostic)?);
    }

    fs::write(output_path, deck.to_json()?)
        .with_context(|| format!("Unable to write deck {}", output_path))?;
    log::info!(
        "Wrote {} slides ({} primitives) to {}",
        report.slides_written,
        report.primitives_written,
        output_path
    );
    Ok(())
}
