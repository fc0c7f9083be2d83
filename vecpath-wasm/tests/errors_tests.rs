use js_sys::Reflect;
use vecpath_wasm::PathEditor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false)
}

fn editor(d: &str) -> PathEditor {
    let mut ed = PathEditor::new();
    assert!(is_ok(&ed.set_path_data_res(d)));
    ed
}

#[wasm_bindgen_test]
fn malformed_path_data_leaves_state_untouched() {
    let mut ed = editor("M 0 0 L 10 0");
    let r = ed.set_path_data_res("XYZ 10 10");
    assert!(is_err(&r, "malformed_path"));
    assert_eq!(ed.path_data(), "M 0 0 L 10 0");
    assert!(is_err(&ed.set_path_data_res(""), "malformed_path"));
}

#[wasm_bindgen_test]
fn segment_queries_report_core_errors() {
    let mut ed = editor("M 0 0 L 10 0 Z");
    assert!(is_err(&ed.point_for_nearest_segment_res(7, 0.5), "invalid_index"));
    assert!(is_err(&ed.point_for_nearest_segment_res(0, 0.5), "unsupported_point"));
    assert!(is_err(&ed.add_nearest_segment_res(2, 0.5), "unsupported_point"));
    assert_eq!(ed.point_count(), 3);

    let mut orphan = editor("M 0 0 Z L 5 5");
    assert!(is_err(&orphan.add_nearest_segment_res(2, 0.5), "invalid_adjacency"));
    assert_eq!(orphan.point_count(), 3);
}

#[wasm_bindgen_test]
fn parameters_are_validated_before_the_core() {
    let mut ed = editor("M 0 0 L 10 0");
    assert!(is_err(&ed.add_nearest_segment_res(1, 1.5), "out_of_range"));
    assert!(is_err(&ed.add_nearest_segment_res(1, f64::NAN), "non_finite"));
    assert!(is_err(&ed.closest_segment_res(0.0, 0.0, -1.0), "out_of_range"));
    assert!(is_err(&ed.closest_segment_res(f64::INFINITY, 0.0, 1.0), "non_finite"));
    assert!(is_err(&ed.set_translation_res(f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.set_style_res(None, None, -2.0), "out_of_range"));
    assert!(is_err(&ed.set_style_res(None, None, 1.0e6), "out_of_range"));
    assert!(is_err(&ed.move_point_res(1, 3, 0.0, 0.0), "invalid_slot"));
    assert_eq!(ed.point_count(), 2);
}

#[wasm_bindgen_test]
fn selection_errors() {
    let mut ed = editor("M 0 0 L 10 0");
    // Without a mask there is nothing to move.
    let r = ed.move_selection_res(1.0, 1.0);
    assert!(is_ok(&r));
    assert_eq!(Reflect::get(&r, &JsValue::from_str("value")).unwrap().as_f64(), Some(0.0));
    ed.enter_editing();
    assert!(is_err(&ed.select_res(5, 0, true), "invalid_index"));
    assert!(is_err(&ed.move_point_res(0, 1, 1.0, 1.0), "unsupported_point"));
}

#[wasm_bindgen_test]
fn bad_imports() {
    let mut ed = PathEditor::new();
    assert!(is_err(&ed.from_element_res("<path fill=\"red\"/>"), "malformed_path"));
    assert!(is_err(&ed.from_json_res(JsValue::from_str("nope")), "malformed_path"));
    assert!(is_err(&vecpath_wasm::import_svg_document("<g><path d=\"M0 0\"/></g>"), "malformed_path"));
}
