//! Saved-design persistence.
//!
//! The calculation core never touches storage. Front ends hold a
//! [`DesignStore`] and pass designs in and out of it; names are the identity
//! key and are compared case-insensitively after trimming.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::design::ShipDesign;
use crate::error::{Error, Result};

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "SHIPYARD_DATA_DIR";

/// File holding every saved design inside the data directory.
pub const DESIGNS_FILENAME: &str = "designs.json";

/// Similarity threshold for "did you mean" suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Result of saving a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Another design already uses this name; nothing was written.
    Conflict,
}

/// Storage collaborator for named designs.
pub trait DesignStore {
    fn load_all_designs(&self) -> Result<Vec<ShipDesign>>;

    /// Save a new design. Refuses to overwrite an existing name.
    fn save_design(&mut self, design: &ShipDesign) -> Result<SaveOutcome>;

    fn find_by_name(&self, name: &str) -> Result<Option<ShipDesign>>;

    /// Delete a design, returning whether one was removed.
    fn delete_by_name(&mut self, name: &str) -> Result<bool>;

    /// Look a design up, failing with close-match suggestions when absent.
    fn require(&self, name: &str) -> Result<ShipDesign> {
        if let Some(design) = self.find_by_name(name)? {
            return Ok(design);
        }
        let names: Vec<String> = self
            .load_all_designs()?
            .into_iter()
            .map(|design| design.name)
            .collect();
        Err(Error::DesignNotFound {
            name: name.trim().to_string(),
            suggestions: suggest_names(&names, name, 3),
        })
    }

    /// Overwrite the saved design with the same name.
    fn replace_design(&mut self, design: &ShipDesign) -> Result<()> {
        design.validate_fields()?;
        self.delete_by_name(&design.name)?;
        match self.save_design(design)? {
            SaveOutcome::Saved => Ok(()),
            SaveOutcome::Conflict => Err(Error::DesignNameConflict {
                name: design.name.clone(),
            }),
        }
    }
}

/// Normalize a design name for case-insensitive lookup.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Names from `candidates` that closely resemble `query`, best first.
pub fn suggest_names(candidates: &[String], query: &str, limit: usize) -> Vec<String> {
    let query = normalize_name(query);
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|name| (strsim::jaro_winkler(&normalize_name(name), &query), name))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.clone())
        .collect()
}

/// Resolve where designs are stored.
///
/// Order: the explicit path, then `SHIPYARD_DATA_DIR`, then the platform data
/// directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(env_path));
    }
    default_data_dir()
}

/// Platform-specific data directory for saved designs.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "shipyard", "shipyard").ok_or(Error::DataDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    designs: HashMap<String, ShipDesign>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DesignStore for MemoryStore {
    fn load_all_designs(&self) -> Result<Vec<ShipDesign>> {
        let mut designs: Vec<ShipDesign> = self.designs.values().cloned().collect();
        designs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(designs)
    }

    fn save_design(&mut self, design: &ShipDesign) -> Result<SaveOutcome> {
        design.validate_fields()?;
        let key = normalize_name(&design.name);
        if self.designs.contains_key(&key) {
            return Ok(SaveOutcome::Conflict);
        }
        self.designs.insert(key, design.clone());
        Ok(SaveOutcome::Saved)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<ShipDesign>> {
        Ok(self.designs.get(&normalize_name(name)).cloned())
    }

    fn delete_by_name(&mut self, name: &str) -> Result<bool> {
        Ok(self.designs.remove(&normalize_name(name)).is_some())
    }
}

/// Store backed by a single pretty-printed JSON file.
///
/// Writes go to a temporary file in the same directory which then replaces
/// the target, so a crash never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store designs in `designs.json` inside `data_dir`.
    pub fn open(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DESIGNS_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<ShipDesign>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "design file missing; starting empty");
            return Ok(Vec::new());
        }
        let contents = fs::read(&self.path)?;
        let designs: Vec<ShipDesign> =
            serde_json::from_slice(&contents).map_err(|source| Error::DesignFile {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = designs.len(), "loaded designs");
        Ok(designs)
    }

    fn write(&self, designs: &[ShipDesign]) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, designs)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl DesignStore for JsonFileStore {
    fn load_all_designs(&self) -> Result<Vec<ShipDesign>> {
        self.read()
    }

    fn save_design(&mut self, design: &ShipDesign) -> Result<SaveOutcome> {
        design.validate_fields()?;
        let mut designs = self.read()?;
        let key = normalize_name(&design.name);
        if designs.iter().any(|d| normalize_name(&d.name) == key) {
            return Ok(SaveOutcome::Conflict);
        }
        designs.push(design.clone());
        designs.sort_by(|a, b| a.name.cmp(&b.name));
        self.write(&designs)?;
        info!(name = %design.name, path = %self.path.display(), "saved design");
        Ok(SaveOutcome::Saved)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<ShipDesign>> {
        let key = normalize_name(name);
        Ok(self
            .read()?
            .into_iter()
            .find(|design| normalize_name(&design.name) == key))
    }

    fn delete_by_name(&mut self, name: &str) -> Result<bool> {
        let key = normalize_name(name);
        let mut designs = self.read()?;
        let before = designs.len();
        designs.retain(|design| normalize_name(&design.name) != key);
        if designs.len() == before {
            return Ok(false);
        }
        self.write(&designs)?;
        info!(name = %name.trim(), "deleted design");
        Ok(true)
    }

    /// Swap the saved entry in place and persist once, so a failed write
    /// leaves the previous file untouched.
    fn replace_design(&mut self, design: &ShipDesign) -> Result<()> {
        design.validate_fields()?;
        let key = normalize_name(&design.name);
        let mut designs = self.read()?;
        designs.retain(|existing| normalize_name(&existing.name) != key);
        designs.push(design.clone());
        designs.sort_by(|a, b| a.name.cmp(&b.name));
        self.write(&designs)?;
        info!(name = %design.name, path = %self.path.display(), "replaced design");
        Ok(())
    }
}
