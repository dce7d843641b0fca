use crate::interop::object;
use fsmdraw::DiagramError;
use wasm_bindgen::JsValue;

fn num(v: impl Into<f64>) -> JsValue {
    JsValue::from_f64(v.into())
}

pub fn ok(value: JsValue) -> JsValue {
    object(&[("ok", JsValue::TRUE), ("value", value)])
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let mut fields = vec![("code", JsValue::from_str(code)), ("message", JsValue::from_str(&message.into()))];
    fields.extend(data.map(|d| ("data", d)));
    object(&[("ok", JsValue::FALSE), ("error", object(&fields))])
}

/// Error object for a core failure, with the failing values under `data`.
pub fn from_error(e: &DiagramError) -> JsValue {
    let data = match e {
        DiagramError::NonFinite(param) => object(&[("param", JsValue::from_str(param))]),
        DiagramError::InvalidId { kind, id } => object(&[("kind", JsValue::from_str(kind)), ("id", num(*id))]),
        DiagramError::DuplicateArrow { action, from, to } => object(&[
            ("action", JsValue::from_str(action)),
            ("source", JsValue::from_str(from)),
            ("target", JsValue::from_str(to)),
        ]),
        DiagramError::CapsExceeded { what, max } => {
            object(&[("what", JsValue::from_str(what)), ("max", num(*max as f64))])
        }
        _ => return err(e.code(), e.to_string(), None),
    };
    err(e.code(), e.to_string(), Some(data))
}

/// `got` lies outside `[min, max]`.
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let data = object(&[
        ("param", JsValue::from_str(param)),
        ("min", num(min)),
        ("max", num(max)),
        ("got", num(got)),
    ]);
    err("out_of_range", format!("parameter '{param}' out of range"), Some(data))
}
