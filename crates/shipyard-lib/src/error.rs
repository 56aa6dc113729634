use std::path::PathBuf;

use thiserror::Error;

use crate::reference::{EngineId, EngineType, TechLevel, Vehicle};

/// Convenient result alias for the shipyard library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Soft design problems (overweight hulls, missing bridges, over-allocated
/// mounts) are not errors; see [`crate::validate::Violation`].
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a tonnage or hull code does not name one of the legal hull sizes.
    #[error("unknown hull size: {value}")]
    UnknownHull { value: String },

    /// Raised when an engine identifier is outside `A`..`Z` or is `I`/`O`.
    #[error("unknown engine id: {value}")]
    UnknownEngineId { value: String },

    /// Raised when an engine type name is not recognized.
    #[error("unknown engine type: {value}")]
    UnknownEngineType { value: String },

    /// Raised when a tech level letter or rank is out of range.
    #[error("unknown tech level: {value}")]
    UnknownTechLevel { value: String },

    /// Raised when a catalog lookup by name fails.
    #[error("unknown {category} entry: {value}")]
    UnknownCatalogEntry { category: String, value: String },

    /// Raised when an engine id has no performance rating at the design's hull size.
    #[error("engine {id} is not available for a {tonnage}-ton hull")]
    EngineUnavailable { id: EngineId, tonnage: u32 },

    /// Raised when a vehicle needs a higher tech level than the design has.
    #[error("{vehicle} requires a higher tech level than {tech_level}")]
    VehicleUnavailable {
        vehicle: Vehicle,
        tech_level: TechLevel,
    },

    /// Raised when an edit would leave the design without a power plant or jump drive.
    #[error("cannot remove the last {engine_type}")]
    LastRequiredEngine { engine_type: EngineType },

    /// Raised when an engine index does not address an installed engine.
    #[error("engine index {index} is out of range (design has {len} engines)")]
    EngineIndexOutOfRange { index: usize, len: usize },

    /// Raised when a fitting index does not address an installed fitting.
    #[error("fitting index {index} is out of range (design has {len} fittings)")]
    FittingIndexOutOfRange { index: usize, len: usize },

    /// Raised when a design's identifying fields fail validation.
    #[error("invalid design: {message}")]
    InvalidDesign { message: String },

    /// Raised when no saved design matches a name.
    #[error("design not found: {name}{}", format_suggestions(.suggestions))]
    DesignNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when saving a design whose name is already taken.
    #[error("a design named '{name}' already exists")]
    DesignNameConflict { name: String },

    /// No suitable data directory could be resolved for this platform.
    #[error("failed to resolve a data directory for saved designs")]
    DataDirUnavailable,

    /// Raised when the design file cannot be parsed.
    #[error("failed to read designs from {path}: {source}")]
    DesignFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_suggestions() {
        let err = Error::DesignNotFound {
            name: "Scout".to_string(),
            suggestions: vec!["Scout Mk2".to_string(), "Scoutship".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "design not found: Scout. Did you mean one of: 'Scout Mk2', 'Scoutship'?"
        );
    }

    #[test]
    fn last_engine_message_names_the_type() {
        let err = Error::LastRequiredEngine {
            engine_type: EngineType::PowerPlant,
        };
        assert_eq!(err.to_string(), "cannot remove the last Power Plant");
    }
}
