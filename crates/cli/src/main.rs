fn main() -> anyhow::Result<()> {
    stocktwin_cli::telemetry::init();

    let settings = stocktwin_cli::load_settings()?;
    let result = stocktwin_cli::run_to_completion(&settings)?;

    println!("{}", serde_json::to_string_pretty(result.summary())?);
    Ok(())
}
