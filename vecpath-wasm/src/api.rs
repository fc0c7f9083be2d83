use crate::PathEditor;
use js_sys::{Float64Array, Uint8Array};
use vecpath::geometry::limits;
use vecpath::{element, svg, NearestSegment, Path, PathStyle, Slot, Vec2};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Import every `<path>` of an SVG document as JSON snapshots.
#[wasm_bindgen]
pub fn import_svg_document(xml: &str) -> JsValue {
    match element::from_svg_document(xml) {
        Ok(doc) => {
            interop::forward_warnings(&doc.warnings);
            let snapshots: Vec<serde_json::Value> = doc.paths.iter().map(|p| p.to_json_value()).collect();
            to_js(&snapshots).map_or_else(|e| e, error::ok)
        }
        Err(e) => error::from_core(&e),
    }
}

fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(v).map_err(|e| error::err("serialize", e.to_string(), None))
}

fn check_finite(params: &[(&str, f64)]) -> Result<(), JsValue> {
    match params.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(error::non_finite(name)),
        None => Ok(()),
    }
}

fn parse_slot(s: u8) -> Result<Slot, JsValue> {
    Slot::from_index(s as usize).ok_or_else(|| error::invalid_slot(s))
}

fn segment_hit(index: u32, t: f64) -> Result<NearestSegment, JsValue> {
    check_finite(&[("t", t)])?;
    if !(0.0..=1.0).contains(&t) {
        return Err(error::out_of_range("t", 0.0, 1.0, t));
    }
    Ok(NearestSegment::new(index as usize, t))
}

#[wasm_bindgen]
impl PathEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PathEditor {
        crate::PathEditor::rs_new()
    }

    // Path data
    pub fn path_data(&self) -> String {
        self.rs_path().to_path_data()
    }
    pub fn set_path_data_res(&mut self, d: &str) -> JsValue {
        match svg::parse(d) {
            Ok(parsed) => {
                interop::forward_warnings(&parsed.warnings);
                let n = parsed.points.len();
                self.inner.set_control_points(parsed.points);
                error::ok(JsValue::from_f64(n as f64))
            }
            Err(e) => error::from_core(&e),
        }
    }
    pub fn point_count(&self) -> u32 {
        self.rs_path().len() as u32
    }

    // Placement and style
    pub fn translation(&self) -> Float64Array {
        let t = self.rs_path().translation();
        interop::arr_f64(&[t.x, t.y])
    }
    pub fn set_translation(&mut self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        self.inner.set_translation(Vec2::new(x, y));
        true
    }
    pub fn set_translation_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Err(e) = check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        self.inner.set_translation(Vec2::new(x, y));
        error::ok(JsValue::TRUE)
    }
    pub fn set_style_res(&mut self, fill: Option<String>, stroke: Option<String>, stroke_width: f64) -> JsValue {
        if let Err(e) = check_finite(&[("stroke_width", stroke_width)]) {
            return e;
        }
        if !limits::in_width_bounds(stroke_width) {
            return error::out_of_range("stroke_width", 0.0, limits::WIDTH_MAX, stroke_width);
        }
        error::result(self.inner.set_style(PathStyle { fill, stroke, stroke_width }).map(|_| JsValue::TRUE))
    }

    // Geometry queries
    pub fn bounding_box(&self) -> Float64Array {
        interop::rect(self.rs_path().bounding_box())
    }
    pub fn closest_segment(&self, x: f64, y: f64, threshold: f64) -> JsValue {
        match self.inner.hover(Vec2::new(x, y), threshold) {
            Some(hit) => to_js(&hit).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
    pub fn closest_segment_res(&self, x: f64, y: f64, threshold: f64) -> JsValue {
        if let Err(e) = check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        if threshold.is_nan() {
            return error::non_finite("threshold");
        }
        if threshold < 0.0 {
            return error::out_of_range("threshold", 0.0, f64::INFINITY, threshold);
        }
        error::ok(self.closest_segment(x, y, threshold))
    }
    pub fn point_for_nearest_segment_res(&self, index: u32, t: f64) -> JsValue {
        let hit = match segment_hit(index, t) {
            Ok(h) => h,
            Err(e) => return e,
        };
        error::result(self.inner.preview(&hit).map(|p| interop::arr_f64(&[p.x, p.y]).into()))
    }

    // Edits
    pub fn add_nearest_segment_res(&mut self, index: u32, t: f64) -> JsValue {
        let hit = match segment_hit(index, t) {
            Ok(h) => h,
            Err(e) => return e,
        };
        error::result(self.inner.insert_at(&hit).map(|_| JsValue::from_f64(self.rs_path().len() as f64)))
    }
    pub fn move_point_res(&mut self, index: u32, slot: u8, x: f64, y: f64) -> JsValue {
        if let Err(e) = check_finite(&[("x", x), ("y", y)]) {
            return e;
        }
        let slot = match parse_slot(slot) {
            Ok(s) => s,
            Err(e) => return e,
        };
        error::result(self.inner.move_point(index as usize, slot, Vec2::new(x, y)).map(|_| JsValue::TRUE))
    }

    // Selection
    pub fn enter_editing(&mut self) {
        self.inner.enter_editing();
    }
    pub fn exit_editing(&mut self) {
        self.inner.exit_editing();
    }
    pub fn is_editing(&self) -> bool {
        self.inner.is_editing()
    }
    pub fn select_res(&mut self, index: u32, slot: u8, selected: bool) -> JsValue {
        let slot = match parse_slot(slot) {
            Ok(s) => s,
            Err(e) => return e,
        };
        error::result(self.inner.select(index as usize, slot, selected).map(|_| JsValue::TRUE))
    }
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }
    /// One byte per control point: 1 when any of its slots is selected.
    pub fn selected_rows(&self) -> Uint8Array {
        let flags: Vec<u8> = self.inner.selected_rows().into_iter().map(u8::from).collect();
        interop::arr_u8(&flags)
    }
    pub fn move_selection_res(&mut self, dx: f64, dy: f64) -> JsValue {
        if let Err(e) = check_finite(&[("dx", dx), ("dy", dy)]) {
            return e;
        }
        error::result(self.inner.move_selection(dx, dy).map(|n| JsValue::from_f64(n as f64)))
    }
    pub fn mask_string(&self) -> Option<String> {
        self.inner.mask().map(|m| m.to_string())
    }

    // JSON + SVG
    pub fn to_json(&self) -> JsValue {
        to_js(&self.rs_path().to_json_value()).unwrap_or(JsValue::NULL)
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        let value = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(v) => v,
            Err(e) => return error::err("malformed_path", e.to_string(), None),
        };
        match Path::from_json_value(value) {
            Ok(path) => {
                self.inner.replace_path(path);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_core(&e),
        }
    }
    pub fn to_element(&self) -> String {
        element::to_path_element(self.rs_path())
    }
    pub fn to_svg_document(&self) -> String {
        element::to_svg_document(std::slice::from_ref(self.rs_path()))
    }
    pub fn from_element_res(&mut self, xml: &str) -> JsValue {
        match element::path_from_element(xml) {
            Ok(path) => {
                self.inner.replace_path(path);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_core(&e),
        }
    }
}

impl Default for PathEditor {
    fn default() -> Self {
        PathEditor::new()
    }
}
