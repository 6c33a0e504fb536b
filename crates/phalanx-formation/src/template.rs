//! Formation definitions.
//!
//! A definition is a grid of single characters, one row per line:
//!
//! ```text
//! RRRRR
//! XFFFX
//! ```
//!
//! `A`, `F` and `R` (any case) place a slot of type [`SlotType::Any`], [`SlotType::Melee`] and
//! [`SlotType::Ranged`]; `X`, `.` and space leave the cell empty. Every cell is
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`] and slot offsets point at cell centers, measured from the
//! center of the grid's bounding box. Ragged rows are allowed; the longest row sets the width.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use phalanx_core::Vec2;

use crate::error::FormationError;
use crate::slot::SlotType;

pub const CELL_WIDTH: f32 = 20.0;
pub const CELL_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSpec {
    pub slot_type: SlotType,
    pub offset: Vec2,
}

/// A parsed formation definition. Formations are stamped out of templates with
/// [`Formation::from_template`](crate::Formation::from_template).
#[derive(Debug, Clone, PartialEq)]
pub struct FormationTemplate {
    name: String,
    width: usize,
    height: usize,
    slots: Vec<SlotSpec>,
}

impl FormationTemplate {
    pub fn parse(name: &str, text: &str) -> Result<Self, FormationError> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {
            rows.pop();
        }

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let half = Vec2::new(
            width as f32 * CELL_WIDTH / 2.0,
            height as f32 * CELL_HEIGHT / 2.0,
        );

        let mut slots = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            for (column, found) in line.chars().enumerate() {
                if is_filler(found) {
                    continue;
                }
                let Some(slot_type) = SlotType::from_code(found) else {
                    return Err(FormationError::InvalidSlot {
                        name: name.to_string(),
                        path: PathBuf::from(format!("<inline>/{name}")),
                        row,
                        column,
                        found,
                    });
                };
                let center = Vec2::new(
                    (column as f32 + 0.5) * CELL_WIDTH,
                    (row as f32 + 0.5) * CELL_HEIGHT,
                );
                slots.push(SlotSpec {
                    slot_type,
                    offset: center - half,
                });
            }
        }

        if slots.is_empty() {
            return Err(FormationError::Empty {
                name: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            width,
            height,
            slots,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid columns (longest row).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Slots in reading order (row by row, left to right).
    pub fn slots(&self) -> &[SlotSpec] {
        &self.slots
    }

    pub fn count(&self, slot_type: SlotType) -> usize {
        self.slots
            .iter()
            .filter(|s| s.slot_type == slot_type)
            .count()
    }

    /// The grid back in definition form, one line per row, with `X` for empty cells.
    pub fn render(&self) -> String {
        let mut grid = vec![vec!['X'; self.width]; self.height];
        for spec in &self.slots {
            let column = ((spec.offset.x + self.width as f32 * CELL_WIDTH / 2.0) / CELL_WIDTH) as usize;
            let row = ((spec.offset.y + self.height as f32 * CELL_HEIGHT / 2.0) / CELL_HEIGHT) as usize;
            grid[row][column] = spec.slot_type.code();
        }
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn is_filler(c: char) -> bool {
    matches!(c, 'X' | 'x' | '.' | ' ')
}

/// Reads `<dir>/<name>.txt` definitions and caches the parsed templates.
#[derive(Debug)]
pub struct FormationLoader {
    dir: PathBuf,
    templates: BTreeMap<String, Arc<FormationTemplate>>,
}

impl FormationLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            templates: BTreeMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }

    pub fn load(&mut self, name: &str) -> Result<Arc<FormationTemplate>, FormationError> {
        if let Some(template) = self.templates.get(name) {
            return Ok(Arc::clone(template));
        }

        let path = self.path_for(name);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(FormationError::NotFound {
                    name: name.to_string(),
                    path,
                })
            }
            Err(source) => {
                return Err(FormationError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        let template = Arc::new(
            FormationTemplate::parse(name, &text).map_err(|err| err.in_file(&path))?,
        );
        tracing::debug!(
            formation = name,
            slots = template.slots().len(),
            width = template.width(),
            height = template.height(),
            "loaded formation template"
        );
        self.templates.insert(name.to_string(), Arc::clone(&template));
        Ok(template)
    }
}
