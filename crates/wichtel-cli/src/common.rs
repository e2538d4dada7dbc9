use wichtel_core::{data_dir, Config, DrawEngine, Event, JsonStateFile, StateStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the persisted store with the configured draw policy.
pub fn open_store() -> Result<(StateStore<JsonStateFile>, Config), Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    let config = Config::load(&dir)?;
    let engine = DrawEngine::with_policy(config.draw);
    let store = StateStore::open(JsonStateFile::new(&dir), engine)?;
    Ok((store, config))
}

/// Print transition events as pretty JSON, one document per event.
pub fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string_pretty(event)?);
    }
    Ok(())
}
