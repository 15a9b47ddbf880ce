//! Manual editing tools: paint, erase, swap, anchor and lock.
//!
//! Every call that changes the grid records one history snapshot of the
//! state before the change. Inside a drag gesture, paint and erase share the
//! one snapshot taken at [`Quilt::begin_gesture`]; swap, anchor and lock
//! still record their own.
//!
//! Paint and erase ignore the lock flag; only gradient generation honors it.

use crate::error::EditError;
use crate::geometry::hexes_in_radius;
use crate::models::{Anchor, ColorId};
use crate::quilt::Quilt;

/// The active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Paint,
    Swap,
    Anchor,
    Lock,
    Erase,
}

/// Two-click swap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapState {
    #[default]
    Idle,
    AwaitingSecondCell { row: usize, col: usize },
}

/// Result of one swap click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// First click recorded the source cell.
    SourceSelected,
    /// Second click on the source cell cancelled the swap.
    Cancelled,
    /// Colors of the two cells were exchanged.
    Swapped,
    /// Click outside the grid.
    NoSuchCell,
}

/// What an anchor toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorChange {
    Added,
    Removed,
    Recolored { previous: ColorId },
}

/// Tool selection and transient interaction state.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub tool: Tool,
    pub selected_color: Option<ColorId>,
    /// Brush radius in hex steps; 0 paints a single cell.
    pub brush_radius: u32,
    pub(crate) swap: SwapState,
    gesture: bool,
}

impl Editor {
    pub fn swap_state(&self) -> SwapState {
        self.swap
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture
    }

    pub(crate) fn reset_pending(&mut self) {
        self.swap = SwapState::Idle;
    }
}

impl Quilt {
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Switch tools. Abandons a half-finished swap.
    pub fn set_tool(&mut self, tool: Tool) {
        self.editor.tool = tool;
        self.editor.reset_pending();
    }

    pub fn select_color(&mut self, id: Option<ColorId>) -> Result<(), EditError> {
        if let Some(id) = id {
            if !self.palette.contains(id) {
                return Err(EditError::UnknownColor(id));
            }
        }
        self.editor.selected_color = id;
        Ok(())
    }

    pub fn set_brush_radius(&mut self, radius: u32) {
        self.editor.brush_radius = radius;
    }

    /// Start a drag gesture (mouse down). Records one snapshot for every
    /// paint and erase until [`Quilt::end_gesture`].
    pub fn begin_gesture(&mut self) {
        if !self.editor.gesture {
            self.history.push(self.grid.snapshot());
            self.editor.gesture = true;
        }
    }

    /// End a drag gesture (mouse up).
    pub fn end_gesture(&mut self) {
        self.editor.gesture = false;
    }

    /// Apply the active tool at a cell with the selected color and brush.
    ///
    /// Returns whether the grid changed.
    pub fn click(&mut self, row: usize, col: usize) -> Result<bool, EditError> {
        match self.editor.tool {
            Tool::Paint => {
                let color = self
                    .editor
                    .selected_color
                    .ok_or(EditError::NoColorSelected)?;
                self.paint(row, col, self.editor.brush_radius, color)
            }
            Tool::Erase => Ok(self.erase(row, col, self.editor.brush_radius)),
            Tool::Swap => Ok(self.swap(row, col) == SwapOutcome::Swapped),
            Tool::Anchor => {
                let color = self
                    .editor
                    .selected_color
                    .ok_or(EditError::NoColorSelected)?;
                Ok(self.toggle_anchor(row, col, color)?.is_some())
            }
            Tool::Lock => Ok(self.toggle_lock(row, col).is_some()),
        }
    }

    /// Paint every cell within `radius` of (row, col).
    ///
    /// Cells are visited in row-major order. When the color's quantity limit
    /// is reached the stroke stops: cells already painted stay painted and
    /// [`EditError::CapacityExceeded`] is returned.
    pub fn paint(
        &mut self,
        row: usize,
        col: usize,
        radius: u32,
        color_id: ColorId,
    ) -> Result<bool, EditError> {
        let limit = self
            .palette
            .get(color_id)
            .ok_or(EditError::UnknownColor(color_id))?
            .quantity as usize;
        if self.grid.index(row, col).is_none() {
            return Ok(false);
        }

        let targets = hexes_in_radius(row, col, radius, self.grid.cols(), self.grid.rows());
        // A drag gesture recorded the grid once when it began
        let before = (!self.editor.gesture).then(|| self.grid.snapshot());
        let mut used = self.grid.usage_count(color_id);
        let mut painted = 0;
        let mut exhausted = false;

        for (r, c) in targets {
            let Some(cell) = self.grid.cell_mut(r, c) else {
                continue;
            };
            if cell.color_id == Some(color_id) {
                continue;
            }
            if used >= limit {
                exhausted = true;
                break;
            }
            cell.color_id = Some(color_id);
            used += 1;
            painted += 1;
        }

        if let Some(before) = before.filter(|_| painted > 0) {
            self.history.push(before);
        }
        tracing::debug!(row, col, radius, %color_id, painted, exhausted, "Paint");

        if exhausted {
            Err(EditError::CapacityExceeded { color_id, painted })
        } else {
            Ok(painted > 0)
        }
    }

    /// Clear color and anchors within `radius` of (row, col). Locks stay.
    pub fn erase(&mut self, row: usize, col: usize, radius: u32) -> bool {
        if self.grid.index(row, col).is_none() {
            return false;
        }

        let targets = hexes_in_radius(row, col, radius, self.grid.cols(), self.grid.rows());
        let dirty = targets.iter().any(|&(r, c)| {
            self.grid.cell(r, c).is_some_and(|cell| cell.color_id.is_some())
                || self.grid.anchor_at(r, c).is_some()
        });
        if !dirty {
            return false;
        }

        self.checkpoint();
        for (r, c) in targets {
            if let Some(cell) = self.grid.cell_mut(r, c) {
                cell.color_id = None;
            }
            self.grid.remove_anchor_at(r, c);
        }
        tracing::debug!(row, col, radius, "Erase");
        true
    }

    /// One click of the two-click swap.
    pub fn swap(&mut self, row: usize, col: usize) -> SwapOutcome {
        if self.grid.index(row, col).is_none() {
            return SwapOutcome::NoSuchCell;
        }

        match self.editor.swap {
            SwapState::Idle => {
                self.editor.swap = SwapState::AwaitingSecondCell { row, col };
                SwapOutcome::SourceSelected
            }
            SwapState::AwaitingSecondCell {
                row: src_row,
                col: src_col,
            } => {
                self.editor.swap = SwapState::Idle;
                if (src_row, src_col) == (row, col) {
                    return SwapOutcome::Cancelled;
                }

                let (Some(a), Some(b)) =
                    (self.grid.index(src_row, src_col), self.grid.index(row, col))
                else {
                    return SwapOutcome::NoSuchCell;
                };
                self.record();
                let cells = self.grid.cells_mut();
                let source = cells[a].color_id;
                cells[a].color_id = cells[b].color_id;
                cells[b].color_id = source;

                tracing::debug!(src_row, src_col, row, col, "Swap");
                SwapOutcome::Swapped
            }
        }
    }

    /// Add, remove or recolor the anchor at a cell.
    ///
    /// Returns `Ok(None)` outside the grid.
    pub fn toggle_anchor(
        &mut self,
        row: usize,
        col: usize,
        color_id: ColorId,
    ) -> Result<Option<AnchorChange>, EditError> {
        if !self.palette.contains(color_id) {
            return Err(EditError::UnknownColor(color_id));
        }
        if self.grid.index(row, col).is_none() {
            return Ok(None);
        }

        let existing = self.grid.anchor_at(row, col).map(|a| a.color_id);
        self.record();
        let change = match existing {
            None => {
                self.grid.push_anchor(Anchor {
                    row,
                    col,
                    color_id,
                });
                AnchorChange::Added
            }
            Some(current) if current == color_id => {
                self.grid.remove_anchor_at(row, col);
                AnchorChange::Removed
            }
            Some(previous) => {
                if let Some(anchor) = self.grid.anchor_at_mut(row, col) {
                    anchor.color_id = color_id;
                }
                AnchorChange::Recolored { previous }
            }
        };

        tracing::debug!(row, col, %color_id, ?change, "Anchor");
        Ok(Some(change))
    }

    /// Toggle a cell's lock. Returns the new lock state, or `None` outside
    /// the grid.
    pub fn toggle_lock(&mut self, row: usize, col: usize) -> Option<bool> {
        self.grid.index(row, col)?;

        self.record();
        let cell = self.grid.cell_mut(row, col)?;
        cell.locked = !cell.locked;
        Some(cell.locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;
    use quilt_color::Srgb;

    /// 3 x 2 grid (hex 2, quilt 5 x 3)
    fn small_quilt() -> Quilt {
        let quilt = Quilt::new(2.0, 5.0, 3.0, Unit::Inches);
        assert_eq!((quilt.cols(), quilt.rows()), (3, 2));
        quilt
    }

    fn painted(quilt: &Quilt, id: ColorId) -> Vec<(usize, usize)> {
        (0..quilt.grid().len())
            .filter(|&i| quilt.grid().cells()[i].color_id == Some(id))
            .map(|i| quilt.grid().position(i))
            .collect()
    }

    #[test]
    fn test_paint_single_cell() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 3).unwrap();

        assert!(quilt.paint(0, 0, 0, red).unwrap());
        assert_eq!(painted(&quilt, red), vec![(0, 0)]);

        // repainting the same color changes nothing and records nothing
        let history_len = quilt.history().len();
        assert!(!quilt.paint(0, 0, 0, red).unwrap());
        assert_eq!(quilt.history().len(), history_len);
    }

    #[test]
    fn test_paint_stops_at_capacity() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 2).unwrap();

        let err = quilt.paint(0, 0, 1, red).unwrap_err();
        assert!(matches!(
            err,
            EditError::CapacityExceeded { painted: 2, .. }
        ));
        // row-major footprint is (0,0), (0,1), (1,0): the last is skipped
        assert_eq!(painted(&quilt, red), vec![(0, 0), (0, 1)]);
        assert_eq!(quilt.remaining(red), Some(0));
    }

    #[test]
    fn test_paint_already_full_records_no_history() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 0).unwrap();

        assert!(quilt.paint(0, 0, 0, red).is_err());
        assert!(!quilt.history().can_undo());
    }

    #[test]
    fn test_paint_replaces_other_color_and_ignores_lock() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        let blue = quilt.add_color(Srgb::from_u8(0, 0, 255), 5).unwrap();

        quilt.paint(1, 1, 0, red).unwrap();
        quilt.toggle_lock(1, 1);
        quilt.paint(1, 1, 0, blue).unwrap();

        assert_eq!(quilt.cell(1, 1).unwrap().color_id, Some(blue));
        assert!(quilt.cell(1, 1).unwrap().locked);
        assert_eq!(quilt.usage_count(red), 0);
    }

    #[test]
    fn test_paint_unknown_color() {
        let mut quilt = small_quilt();
        assert!(matches!(
            quilt.paint(0, 0, 0, ColorId(9)),
            Err(EditError::UnknownColor(ColorId(9)))
        ));
    }

    #[test]
    fn test_paint_out_of_range_is_noop() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        assert!(!quilt.paint(7, 7, 3, red).unwrap());
        assert_eq!(quilt.usage_count(red), 0);
    }

    #[test]
    fn test_erase_clears_color_and_anchor_keeps_lock() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        quilt.paint(0, 1, 0, red).unwrap();
        quilt.toggle_anchor(0, 1, red).unwrap();
        quilt.toggle_lock(0, 1);

        assert!(quilt.erase(0, 1, 0));
        let cell = quilt.cell(0, 1).unwrap();
        assert_eq!(cell.color_id, None);
        assert!(cell.locked);
        assert!(quilt.grid().anchor_at(0, 1).is_none());

        // nothing left to erase
        assert!(!quilt.erase(0, 1, 0));
    }

    #[test]
    fn test_swap_protocol() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        let blue = quilt.add_color(Srgb::from_u8(0, 0, 255), 5).unwrap();
        quilt.paint(0, 0, 0, red).unwrap();
        quilt.paint(1, 2, 0, blue).unwrap();

        assert_eq!(quilt.swap(0, 0), SwapOutcome::SourceSelected);
        assert_eq!(
            quilt.editor().swap_state(),
            SwapState::AwaitingSecondCell { row: 0, col: 0 }
        );
        assert_eq!(quilt.swap(1, 2), SwapOutcome::Swapped);
        assert_eq!(quilt.editor().swap_state(), SwapState::Idle);

        assert_eq!(quilt.cell(0, 0).unwrap().color_id, Some(blue));
        assert_eq!(quilt.cell(1, 2).unwrap().color_id, Some(red));
    }

    #[test]
    fn test_swap_same_cell_cancels() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        quilt.paint(0, 0, 0, red).unwrap();
        let history_len = quilt.history().len();

        quilt.swap(0, 0);
        assert_eq!(quilt.swap(0, 0), SwapOutcome::Cancelled);
        assert_eq!(quilt.editor().swap_state(), SwapState::Idle);
        assert_eq!(quilt.cell(0, 0).unwrap().color_id, Some(red));
        assert_eq!(quilt.history().len(), history_len);
    }

    #[test]
    fn test_swap_with_empty_cell_moves_color() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        quilt.paint(0, 0, 0, red).unwrap();

        quilt.swap(0, 0);
        quilt.swap(0, 2);
        assert_eq!(painted(&quilt, red), vec![(0, 2)]);
    }

    #[test]
    fn test_anchor_toggle_cycle() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        let blue = quilt.add_color(Srgb::from_u8(0, 0, 255), 5).unwrap();

        assert_eq!(
            quilt.toggle_anchor(1, 0, red).unwrap(),
            Some(AnchorChange::Added)
        );
        assert_eq!(
            quilt.toggle_anchor(1, 0, blue).unwrap(),
            Some(AnchorChange::Recolored { previous: red })
        );
        assert_eq!(quilt.grid().anchors().len(), 1);
        assert_eq!(quilt.grid().anchor_at(1, 0).unwrap().color_id, blue);

        assert_eq!(
            quilt.toggle_anchor(1, 0, blue).unwrap(),
            Some(AnchorChange::Removed)
        );
        assert!(quilt.grid().anchors().is_empty());
        assert_eq!(quilt.toggle_anchor(9, 9, blue).unwrap(), None);
    }

    #[test]
    fn test_lock_toggle() {
        let mut quilt = small_quilt();
        assert_eq!(quilt.toggle_lock(0, 0), Some(true));
        assert_eq!(quilt.toggle_lock(0, 0), Some(false));
        assert_eq!(quilt.toggle_lock(5, 0), None);
    }

    #[test]
    fn test_click_dispatch() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();

        assert!(matches!(quilt.click(0, 0), Err(EditError::NoColorSelected)));

        quilt.select_color(Some(red)).unwrap();
        assert!(quilt.click(0, 0).unwrap());
        assert_eq!(quilt.usage_count(red), 1);

        quilt.set_tool(Tool::Anchor);
        assert!(quilt.click(0, 0).unwrap());
        assert!(quilt.grid().anchor_at(0, 0).is_some());

        quilt.set_tool(Tool::Lock);
        assert!(quilt.click(0, 0).unwrap());
        assert!(quilt.cell(0, 0).unwrap().locked);

        quilt.set_tool(Tool::Swap);
        assert!(!quilt.click(0, 0).unwrap());
        assert!(quilt.click(0, 1).unwrap());
        assert_eq!(quilt.cell(0, 1).unwrap().color_id, Some(red));

        quilt.set_tool(Tool::Erase);
        assert!(quilt.click(0, 1).unwrap());
        assert_eq!(quilt.usage_count(red), 0);
    }

    #[test]
    fn test_select_unknown_color() {
        let mut quilt = small_quilt();
        assert!(quilt.select_color(Some(ColorId(3))).is_err());
        assert!(quilt.select_color(None).is_ok());
    }

    #[test]
    fn test_set_tool_abandons_swap() {
        let mut quilt = small_quilt();
        quilt.set_tool(Tool::Swap);
        quilt.click(0, 0).unwrap();
        quilt.set_tool(Tool::Swap);
        assert_eq!(quilt.editor().swap_state(), SwapState::Idle);
    }

    #[test]
    fn test_gesture_records_one_snapshot() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 6).unwrap();

        quilt.begin_gesture();
        quilt.paint(0, 0, 0, red).unwrap();
        quilt.paint(0, 1, 0, red).unwrap();
        quilt.erase(0, 0, 0);
        quilt.paint(1, 1, 0, red).unwrap();
        quilt.end_gesture();
        assert_eq!(quilt.history().len(), 1);

        assert!(quilt.undo());
        assert_eq!(quilt.usage_count(red), 0);
        assert!(!quilt.undo());
    }

    #[test]
    fn test_lock_inside_gesture_is_its_own_step() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 6).unwrap();

        quilt.begin_gesture();
        quilt.paint(0, 0, 0, red).unwrap();
        quilt.toggle_lock(1, 1);
        quilt.paint(0, 1, 0, red).unwrap();
        quilt.end_gesture();
        assert_eq!(quilt.history().len(), 2);

        // Steps back over the lock only
        assert!(quilt.undo());
        assert!(!quilt.cell(1, 1).unwrap().locked);
        assert_eq!(quilt.usage_count(red), 1);

        assert!(quilt.undo());
        assert_eq!(quilt.usage_count(red), 0);
        assert!(!quilt.undo());
    }

    #[test]
    fn test_undo_restores_anchors_and_clears_pending_swap() {
        let mut quilt = small_quilt();
        let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 5).unwrap();
        quilt.toggle_anchor(0, 0, red).unwrap();
        quilt.swap(1, 1);

        assert!(quilt.undo());
        assert!(quilt.grid().anchors().is_empty());
        assert_eq!(quilt.editor().swap_state(), SwapState::Idle);

        assert!(quilt.redo());
        assert_eq!(quilt.grid().anchor_at(0, 0).unwrap().color_id, red);
    }
}
