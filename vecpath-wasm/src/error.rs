use js_sys::Object;
use vecpath::Error;
use wasm_bindgen::prelude::*;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data {
        set_kv(&e, "data", &d);
    }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Map a core error onto the `{ ok:false, error }` envelope.
pub fn from_core(e: &Error) -> JsValue {
    let d = new_obj();
    match e {
        Error::InvalidIndex { index, len } => {
            set_num(&d, "index", *index);
            set_num(&d, "len", *len);
        }
        Error::RankMismatch { expected, got } => {
            set_num(&d, "expected", *expected);
            set_num(&d, "got", *got);
        }
        Error::InvalidAdjacency { index } => set_num(&d, "index", *index),
        Error::UnsupportedControlPointType { index, kind } => {
            set_num(&d, "index", *index);
            set_kv(&d, "kind", &JsValue::from_str(&format!("{:?}", kind)));
        }
        Error::ParameterOutOfRange { name, value } => {
            set_kv(&d, "param", &JsValue::from_str(name));
            set_kv(&d, "got", &JsValue::from_f64(*value));
        }
        Error::ShapeMismatch { .. } | Error::MalformedPathDescription(_) => {
            return err(e.code(), e.to_string(), None);
        }
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn result(r: vecpath::Result<JsValue>) -> JsValue {
    match r {
        Ok(v) => ok(v),
        Err(e) => from_core(&e),
    }
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_slot(got: u8) -> JsValue {
    let d = new_obj();
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("invalid_slot", "slot must be 0:Anchor, 1:Control1, 2:Control2", Some(d.into()))
}

fn set_num(o: &Object, k: &str, v: usize) {
    set_kv(o, k, &JsValue::from_f64(v as f64));
}
