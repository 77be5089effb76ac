use anyhow::Context;

use dispo_client::TranslatorConfig;
use dispo_client::fixture::Fixture;

fn main() -> anyhow::Result<()> {
    dispo_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: dispo-available-stock <fixture.json>")?;

    let fixture = Fixture::load(&path).with_context(|| format!("loading {path}"))?;

    tracing::info!(fixture = %path, "retrieving available stock");
    let result = fixture.retrieve(TranslatorConfig::from_env())?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
