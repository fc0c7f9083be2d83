use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

pub use api::{import_svg_document, set_panic_hook};

/// A path under edit, as seen from the drawing surface.
#[wasm_bindgen]
pub struct PathEditor {
    pub(crate) inner: vecpath::CurveEditor,
}

impl PathEditor {
    pub fn rs_new() -> PathEditor {
        PathEditor { inner: vecpath::CurveEditor::default() }
    }
    pub fn rs_path(&self) -> &vecpath::Path {
        self.inner.path()
    }
}
