//! Curve-editing session: a path plus the selection mask that tracks it.
//!
//! The mask exists only while editing. Whenever the number of control points
//! changes the mask is recreated, so mask rows and point indices always line up.

use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::mask::SelectionMask;
use crate::model::{ControlPoint, NearestSegment, PathStyle, Slot, Vec2};
use crate::path::Path;

#[derive(Clone, Debug, Default)]
pub struct CurveEditor {
    path: Path,
    mask: Option<SelectionMask>,
}

impl CurveEditor {
    pub fn new(path: Path) -> Self {
        CurveEditor { path, mask: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    pub fn is_editing(&self) -> bool {
        self.mask.is_some()
    }

    pub fn enter_editing(&mut self) {
        self.mask = Some(SelectionMask::for_points(self.path.len()));
    }

    pub fn exit_editing(&mut self) {
        self.mask = None;
    }

    pub fn mask(&self) -> Option<&SelectionMask> {
        self.mask.as_ref()
    }

    pub fn set_control_points(&mut self, points: Vec<ControlPoint>) {
        let resized = points.len() != self.path.len();
        self.path.set_control_points(points);
        if resized {
            self.reset_mask();
        }
    }

    /// Swap in a whole new path (import, snapshot restore).
    pub fn replace_path(&mut self, path: Path) {
        self.path = path;
        self.reset_mask();
    }

    pub fn set_translation(&mut self, translation: Vec2) {
        self.path.set_translation(translation);
    }

    pub fn set_style(&mut self, style: PathStyle) -> Result<()> {
        if !limits::in_width_bounds(style.stroke_width) {
            return Err(Error::ParameterOutOfRange { name: "stroke_width", value: style.stroke_width });
        }
        self.path.set_style(style);
        Ok(())
    }

    pub fn move_point(&mut self, index: usize, slot: Slot, to: Vec2) -> Result<()> {
        self.path.move_point(index, slot, to)
    }

    /// Mark or unmark one slot; a no-op outside editing mode.
    pub fn select(&mut self, index: usize, slot: Slot, selected: bool) -> Result<()> {
        match self.mask.as_mut() {
            Some(mask) => mask.set(selected, &[index, slot.index()]),
            None => Ok(()),
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.fill(false);
        }
    }

    /// Per-point "anything selected" flags; empty outside editing mode.
    pub fn selected_rows(&self) -> Vec<bool> {
        self.mask.as_ref().map(|m| m.row_flags()).unwrap_or_default()
    }

    pub fn hover(&self, point: Vec2, threshold: f64) -> Option<NearestSegment> {
        self.path.closest_segment(point, threshold)
    }

    pub fn preview(&self, hit: &NearestSegment) -> Result<Vec2> {
        self.path.point_for_nearest_segment(hit)
    }

    /// Split the hovered segment. The selection is cleared since indices shift.
    pub fn insert_at(&mut self, hit: &NearestSegment) -> Result<()> {
        self.path.add_nearest_segment(hit)?;
        self.reset_mask();
        Ok(())
    }

    /// Drag every selected anchor/handle by (dx, dy); moves nothing outside editing mode.
    pub fn move_selection(&mut self, dx: f64, dy: f64) -> Result<usize> {
        match self.mask.as_ref() {
            Some(mask) => self.path.translate_selected(mask, dx, dy),
            None => Ok(0),
        }
    }

    fn reset_mask(&mut self) {
        if self.mask.is_some() {
            self.enter_editing();
        }
    }
}
