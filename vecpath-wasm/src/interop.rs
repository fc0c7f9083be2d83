use js_sys::{Float64Array, Object, Reflect, Uint8Array};
use vecpath::{ParseWarning, Rect};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object {
    Object::new()
}

pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}

pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}

pub fn arr_u8(slice: &[u8]) -> Uint8Array {
    let arr = Uint8Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice);
    arr
}

/// `[x, y, width, height]`.
pub fn rect(r: Rect) -> Float64Array {
    arr_f64(&[r.x, r.y, r.width, r.height])
}

/// Parse warnings go to the browser console; callers still get the points.
pub fn forward_warnings(warnings: &[ParseWarning]) {
    for w in warnings {
        let msg = match w {
            ParseWarning::ArcApproximated { command_index } => {
                format!("vecpath: arc command {} approximated by a line", command_index)
            }
        };
        web_sys::console::warn_1(&JsValue::from_str(&msg));
    }
}
