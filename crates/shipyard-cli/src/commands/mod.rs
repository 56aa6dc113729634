// Subcommand handlers.
//
// main.rs parses arguments and dispatches here; each module owns one group of
// commands and reports through `shipyard_cli::output`.

pub mod catalog;
pub mod design;
pub mod edit;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use shipyard_lib::{resolve_data_dir, JsonFileStore};

/// Open the design store under `--data-dir`, `SHIPYARD_DATA_DIR`, or the
/// platform data directory.
pub fn open_store(data_dir: Option<&Path>) -> Result<JsonFileStore> {
    let dir = resolve_data_dir(data_dir).context("failed to locate the design directory")?;
    let store = JsonFileStore::open(&dir);
    debug!(path = %store.path().display(), "using design store");
    Ok(store)
}
