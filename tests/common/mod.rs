use orderdesk::application::engine::OrderEngine;
use orderdesk::config::Config;
use orderdesk::infrastructure::in_memory::{
    InMemoryFeedbackStore, InMemoryOrderStore, InMemorySessionStore,
};
use orderdesk::infrastructure::notify::RecordingNotifier;
use std::fs::File;
use std::io::Error;
use std::path::Path;

#[allow(dead_code)]
pub const ADMIN: u64 = 7;
#[allow(dead_code)]
pub const USER: u64 = 101;

#[allow(dead_code)]
pub fn engine() -> (OrderEngine, RecordingNotifier) {
    let mut config = Config::default();
    config.admin_ids.insert(ADMIN);
    let notifier = RecordingNotifier::new();
    let engine = OrderEngine::new(
        config,
        Box::new(InMemoryOrderStore::new()),
        Box::new(InMemoryFeedbackStore::new()),
        Box::new(InMemorySessionStore::new()),
        Box::new(notifier.clone()),
    );
    (engine, notifier)
}

#[allow(dead_code)]
pub fn write_event_script(path: &Path, rows: &[(&str, u64, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["kind", "actor", "data"])?;
    for (kind, actor, data) in rows {
        wtr.write_record([*kind, &actor.to_string(), *data])?;
    }
    wtr.flush()?;
    Ok(())
}
