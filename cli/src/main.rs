use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pantry_core::render::{render_selection, render_title_list};
use pantry_core::{
    run_review_loop, AllowedNameSet, CatalogEntry, OpenAiClient, Pipeline, PipelineConfig,
    PreferenceStatement,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry", version)]
#[command(
    about = "Suggest recipes made only from what the store catalog carries",
    long_about = None
)]
struct Cli {
    /// JSON array of catalog products; only each product's "name" is used
    #[arg(long, env = "PANTRY_CATALOG", default_value = "amazon_fresh_mock.json")]
    catalog: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let allowed = load_catalog(&cli.catalog)?;
    let ai_client = OpenAiClient::from_env().context("Failed to configure AI client")?;
    let config = PipelineConfig::from_env()?;
    let pipeline = Pipeline::new(&ai_client, config);

    let mut input = io::stdin().lock();
    let mut output = io::stdout();

    writeln!(output, "\n=== PANTRY: CATALOG-GROUNDED RECIPES ===\n")?;

    let Some(preference) = read_preference(&mut input, &mut output)? else {
        return Ok(());
    };

    let selection = pipeline.select(&preference, &allowed).await?;
    write!(output, "\n{}", render_selection(&selection))?;

    let batch = pipeline.generate(&selection).await?;
    write!(output, "\n{}", render_title_list(&batch))?;

    run_review_loop(&batch, input, &mut output)?;

    Ok(())
}

fn load_catalog(path: &Path) -> Result<AllowedNameSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let records: Vec<CatalogEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Catalog {} is not a JSON array of products", path.display()))?;

    AllowedNameSet::load(&records).with_context(|| format!("Unusable catalog {}", path.display()))
}

/// Ask until the user types something. `None` at end of input.
fn read_preference<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<PreferenceStatement>> {
    let mut line = String::new();

    loop {
        write!(output, "Describe the food you like and your health goals:\n> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if let Some(preference) = PreferenceStatement::new(line.as_str()) {
            return Ok(Some(preference));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_preference_skips_blank_lines() {
        let mut input = "\n   \nlow carb, lots of fish\n".as_bytes();
        let mut output = Vec::new();

        let preference = read_preference(&mut input, &mut output).unwrap().unwrap();
        assert_eq!(preference.as_str(), "low carb, lots of fish");
        assert_eq!(
            String::from_utf8(output).unwrap().matches("health goals").count(),
            3
        );
    }

    #[test]
    fn test_read_preference_end_of_input() {
        let mut input = "".as_bytes();
        let mut output = Vec::new();
        assert!(read_preference(&mut input, &mut output).unwrap().is_none());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Kale", "price": 2.99}}, {{"name": " kale "}}, {{"name": "Quinoa"}}]"#
        )
        .unwrap();

        let allowed = load_catalog(file.path()).unwrap();
        assert_eq!(allowed.iter().collect::<Vec<_>>(), vec!["kale", "quinoa"]);
    }

    #[test]
    fn test_load_catalog_rejects_empty_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Unusable catalog"));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }
}
