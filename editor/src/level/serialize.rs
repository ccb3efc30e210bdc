//! Level file format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "metadata": { "colours": [[255, 255, 255, 255]] },
//!   "floors": [
//!     { "floor": 0, "objects": { "walls": [[[0, 0, 5, 0], [[0, 0], [0, 0], 0, 2]]] } }
//!   ]
//! }
//! ```
//!
//! Floors are written bottom to top; objects are grouped by kind tag and
//! read back in [`ObjectKind::ALL`] order. Malformed objects, unknown kinds
//! and floors further from the ground than the number of listed floors are
//! logged and skipped, the rest of the file still loads.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::LEVEL_FORMAT_VERSION;
use super::editor_level::EditorLevel;
use super::object::{LevelObject, ObjectKind};
use super::texture::{Colour, ColourTable};

#[derive(Error, Debug)]
pub enum LevelFileError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("level file is missing '{0}'")]
    MissingField(&'static str),
    #[error("level format version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },
}

/// Outcome of loading a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub version: u32,
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Metadata {
    #[serde(default)]
    colours: Vec<Colour>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FloorEntry {
    floor: i32,
    #[serde(default)]
    objects: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LevelFile {
    version: u32,
    #[serde(default)]
    metadata: Metadata,
    floors: Vec<FloorEntry>,
}

impl EditorLevel {
    /// Serialises every floor and clears the unsaved-changes flag.
    pub fn serialise(&mut self) -> Value {
        let mut colours = ColourTable::new();
        let mut floors = Vec::with_capacity(self.floors.len());

        for floor in self.floors.floors() {
            let mut objects = Map::new();
            for kind in ObjectKind::ALL {
                let entries: Vec<Value> = floor
                    .objects
                    .iter()
                    .filter(|o| o.kind() == kind)
                    .map(|o| {
                        let (params, props, _) = o.serialize(&mut colours);
                        Value::Array(vec![params, props])
                    })
                    .collect();
                if !entries.is_empty() {
                    objects.insert(kind.tag().to_string(), Value::Array(entries));
                }
            }
            floors.push(FloorEntry {
                floor: floor.real_floor,
                objects,
            });
        }

        let file = LevelFile {
            version: LEVEL_FORMAT_VERSION,
            metadata: Metadata {
                colours: colours.colours().to_vec(),
            },
            floors,
        };
        self.changes_made_since_last_save = false;
        // A struct of plain maps and vectors always converts.
        serde_json::to_value(file).unwrap_or(Value::Null)
    }

    /// Replaces the level with the contents of `json`.
    ///
    /// Fails without touching the level if the document is not a level
    /// file or comes from a newer format version. Individual malformed
    /// objects are logged and skipped.
    pub fn deserialise(&mut self, json: &Value) -> Result<LoadSummary, LevelFileError> {
        let version = json
            .get("version")
            .ok_or(LevelFileError::MissingField("version"))?
            .as_u64()
            .ok_or(LevelFileError::MissingField("version"))?;
        if version > u64::from(LEVEL_FORMAT_VERSION) {
            return Err(LevelFileError::UnsupportedVersion {
                found: version,
                supported: LEVEL_FORMAT_VERSION,
            });
        }
        if json.get("floors").is_none() {
            return Err(LevelFileError::MissingField("floors"));
        }
        let file = LevelFile::deserialize(json)?;
        if file.version < LEVEL_FORMAT_VERSION {
            log::info!(
                "Migrating level from format version {} to {}",
                file.version,
                LEVEL_FORMAT_VERSION
            );
        }

        let colours = ColourTable::from_colours(file.metadata.colours);
        let mut level = EditorLevel::new().with_select_distance(self.select_distance);
        let mut summary = LoadSummary {
            version: file.version,
            ..Default::default()
        };

        // A saved level lists every floor between its lowest and highest,
        // so no real floor lies further from the ground than the entry count
        for entry in &file.floors {
            if entry.floor.unsigned_abs() as usize > file.floors.len() {
                let dropped: usize = entry
                    .objects
                    .values()
                    .filter_map(Value::as_array)
                    .map(Vec::len)
                    .sum();
                log::warn!(
                    "Floor {} is outside the {} floors the file lists, skipping {dropped} objects",
                    entry.floor,
                    file.floors.len()
                );
                summary.skipped += dropped;
                continue;
            }
            level.ensure_floors_up_to(entry.floor);

            for (tag, objects) in &entry.objects {
                if ObjectKind::from_tag(tag).is_none() {
                    let count = objects.as_array().map_or(1, Vec::len);
                    log::warn!("Floor {}: unknown object kind '{tag}', skipping {count}", entry.floor);
                    summary.skipped += count;
                }
            }
            for kind in ObjectKind::ALL {
                let tag = kind.tag();
                let Some(objects) = entry.objects.get(tag) else {
                    continue;
                };
                let Some(objects) = objects.as_array() else {
                    log::warn!("Floor {}: '{tag}' is not a list, skipped", entry.floor);
                    continue;
                };
                for json in objects {
                    match LevelObject::deserialize(tag, json, &colours) {
                        Ok(object) => {
                            level.add_object(object, entry.floor);
                            summary.loaded += 1;
                        }
                        Err(e) => {
                            log::warn!("Floor {}: skipping object: {e}", entry.floor);
                            summary.skipped += 1;
                        }
                    }
                }
            }
        }

        level.changes_made_since_last_save = false;
        *self = level;
        Ok(summary)
    }

    /// Writes the level as pretty-printed JSON.
    pub fn save_to_file(&mut self, path: &Path) -> Result<(), LevelFileError> {
        let json = self.serialise();
        std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
        log::info!("Saved level to {}", path.display());
        Ok(())
    }

    /// Reads a level file into this level.
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadSummary, LevelFileError> {
        let content = std::fs::read_to_string(path)?;
        let json: Value = serde_json::from_str(&content)?;
        let summary = self.deserialise(&json)?;
        log::info!(
            "Loaded level {} ({} objects, {} skipped)",
            path.display(),
            summary.loaded,
            summary.skipped
        );
        Ok(summary)
    }
}
