use quilt_color::Srgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a palette color.
///
/// Ids start at 1, increase monotonically and are never reused, even after
/// the color is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u32);

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fabric color and how many hexagons of it are available.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteColor {
    pub id: ColorId,
    pub color: Srgb,
    pub quantity: u32,
}

/// Palette entries in insertion order.
///
/// Insertion order matters: it breaks ties when two colors are equally close
/// to a gradient's ideal color.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<PaletteColor>,
    next_id: u32,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a palette from stored entries.
    ///
    /// `next_id` is raised past the largest stored id so ids stay unique.
    pub fn from_parts(colors: Vec<PaletteColor>, next_id: u32) -> Self {
        let floor = colors
            .iter()
            .map(|c| c.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            colors,
            next_id: next_id.max(floor),
        }
    }

    /// Append a color. `None` once every id has been handed out.
    pub fn add(&mut self, color: Srgb, quantity: u32) -> Option<ColorId> {
        let id = ColorId(self.next_id);
        self.next_id = self.next_id.checked_add(1)?;
        self.colors.push(PaletteColor {
            id,
            color,
            quantity,
        });
        Some(id)
    }

    /// Remove an entry. Callers are responsible for clearing references.
    pub(crate) fn remove(&mut self, id: ColorId) -> Option<PaletteColor> {
        let pos = self.colors.iter().position(|c| c.id == id)?;
        Some(self.colors.remove(pos))
    }

    /// Change the quantity limit. Returns false for unknown ids.
    pub fn set_quantity(&mut self, id: ColorId, quantity: u32) -> bool {
        match self.colors.iter_mut().find(|c| c.id == id) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ColorId) -> Option<&PaletteColor> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ColorId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteColor> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Id the next added color will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Sum of all quantity limits.
    pub fn total_quantity(&self) -> u64 {
        self.colors.iter().map(|c| c.quantity as u64).sum()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Usage of one palette color, for display next to its swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteUsage {
    pub id: ColorId,
    pub color: Srgb,
    pub quantity: u32,
    pub used: usize,
    /// Negative when the limit was lowered below what is already placed.
    pub remaining: i64,
}
