use crate::interop::{object, to_js};
use crate::{error, Diagram};
use fsmdraw::geometry::limits;
use fsmdraw::model::StateKind;
use fsmdraw::{Config, DiagramError, Pick};
use js_sys::{Float32Array, Uint32Array, Uint8Array};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` records to the browser console. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Debug);
    set_panic_hook();
}

#[wasm_bindgen]
impl Diagram {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Diagram {
        crate::Diagram::rs_new()
    }
    /// Diagram with layout options from a (partial) JSON object.
    pub fn with_options(json: &str) -> Result<Diagram, JsValue> {
        let config = Config::from_json_str(json).map_err(|e| error::from_error(&e))?;
        Ok(Diagram { inner: fsmdraw::Diagram::with_config(config) })
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Config
    pub fn set_config(&mut self, json: &str) -> bool {
        Config::from_json_str(json).and_then(|c| self.inner.set_config(c)).is_ok()
    }
    pub fn set_config_res(&mut self, json: &str) -> JsValue {
        match Config::from_json_str(json).and_then(|c| self.inner.set_config(c)) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_error(&e),
        }
    }
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    // States
    pub fn add_state(&mut self, key: &str, x: f32, y: f32) -> Option<u32> {
        self.inner.add_state(key, x, y).ok()
    }
    pub fn add_state_res(&mut self, key: &str, x: f32, y: f32) -> JsValue {
        match self.inner.add_state(key, x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_error(&e),
        }
    }
    pub fn move_state(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.inner.move_state(id, x, y)
    }
    pub fn move_state_res(&mut self, id: u32, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::from_error(&DiagramError::NonFinite("x"));
        }
        if !y.is_finite() {
            return error::from_error(&DiagramError::NonFinite("y"));
        }
        if self.inner.get_state(id).is_none() {
            return error::from_error(&DiagramError::InvalidId { kind: "state", id });
        }
        for (param, v) in [("x", x), ("y", y)] {
            if !limits::in_coord_bounds(v) {
                return error::out_of_range(param, limits::COORD_MIN, limits::COORD_MAX, v);
            }
        }
        error::ok(JsValue::from_bool(self.inner.move_state(id, x, y)))
    }
    pub fn set_state_label(&mut self, id: u32, label: Option<String>) -> bool {
        self.inner.set_state_label(id, label)
    }
    pub fn set_state_label_res(&mut self, id: u32, label: Option<String>) -> JsValue {
        if self.inner.get_state(id).is_none() {
            return error::from_error(&DiagramError::InvalidId { kind: "state", id });
        }
        error::ok(JsValue::from_bool(self.inner.set_state_label(id, label)))
    }
    pub fn get_state(&self, id: u32) -> JsValue {
        self.inner.get_state(id).map_or(JsValue::NULL, to_js)
    }
    pub fn state_id(&self, key: &str) -> Option<u32> {
        self.inner.state_id(key)
    }
    pub fn state_count(&self) -> u32 {
        self.inner.state_count()
    }

    // Arrows
    /// Arrow id, or `undefined` when an endpoint is unknown or the arrow
    /// already exists.
    pub fn add_arrow(&mut self, action: &str, source: &str, target: &str) -> Option<u32> {
        self.inner.add_arrow(action, source, target).ok().flatten()
    }
    /// `{ok: true, value: null}` when the arrow was omitted for an unknown state.
    pub fn add_arrow_res(&mut self, action: &str, source: &str, target: &str) -> JsValue {
        match self.inner.add_arrow(action, source, target) {
            Ok(Some(id)) => error::ok(JsValue::from_f64(id as f64)),
            Ok(None) => error::ok(JsValue::NULL),
            Err(e) => error::from_error(&e),
        }
    }
    pub fn remove_arrow(&mut self, id: u32) -> bool {
        self.inner.remove_arrow(id)
    }
    pub fn remove_arrow_res(&mut self, id: u32) -> JsValue {
        if self.inner.get_arrow(id).is_none() {
            return error::from_error(&DiagramError::InvalidId { kind: "arrow", id });
        }
        error::ok(JsValue::from_bool(self.inner.remove_arrow(id)))
    }
    pub fn get_arrow(&self, id: u32) -> JsValue {
        self.inner.get_arrow(id).map_or(JsValue::NULL, to_js)
    }
    pub fn arrow_count(&self) -> u32 {
        self.inner.arrow_count()
    }

    // Layout
    /// Re-place every state; returns the components as arrays of state ids,
    /// in the order they were found.
    pub fn auto_layout(&mut self) -> JsValue {
        web_sys::console::time_with_label("fsmdraw:auto_layout");
        let comps = self.inner.auto_layout();
        web_sys::console::time_end_with_label("fsmdraw:auto_layout");
        to_js(&comps)
    }

    // Typed arrays getters
    pub fn get_state_data(&self) -> JsValue {
        let (ids, pos) = self.inner.get_state_arrays();
        let mut sizes = Vec::with_capacity(ids.len() * 2);
        let mut kinds = Vec::with_capacity(ids.len());
        for &id in &ids {
            if let Some(s) = self.inner.get_state(id) {
                sizes.push(s.width);
                sizes.push(s.height);
                kinds.push(match s.kind {
                    StateKind::Normal => 0u8,
                    StateKind::Start => 1,
                    StateKind::End => 2,
                });
            }
        }
        object(&[
            ("ids", Uint32Array::from(ids.as_slice()).into()),
            ("positions", Float32Array::from(pos.as_slice()).into()),
            ("sizes", Float32Array::from(sizes.as_slice()).into()),
            ("kinds", Uint8Array::from(kinds.as_slice()).into()),
        ])
    }
    pub fn get_connections(&self) -> JsValue {
        to_js(&self.inner.connections())
    }
    pub fn to_svg_paths(&self) -> JsValue {
        to_js(&self.inner.to_svg_paths())
    }

    // Picking
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> JsValue {
        let Some(p) = self.inner.pick(x, y, tol) else { return JsValue::NULL };
        // Flatten to { kind: 'state'|'arrow', ... }
        match p {
            Pick::State { id } => object(&[("kind", JsValue::from_str("state")), ("id", JsValue::from(id))]),
            Pick::Arrow { id, dist } => object(&[
                ("kind", JsValue::from_str("arrow")),
                ("id", JsValue::from(id)),
                ("dist", JsValue::from(dist)),
            ]),
        }
    }
    pub fn pick_res(&self, x: f32, y: f32, tol: f32) -> JsValue {
        if !x.is_finite() {
            return error::from_error(&DiagramError::NonFinite("x"));
        }
        if !y.is_finite() {
            return error::from_error(&DiagramError::NonFinite("y"));
        }
        if !tol.is_finite() {
            return error::from_error(&DiagramError::NonFinite("tol"));
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f32::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }

    // Activation
    pub fn activate_arrow(&mut self, id: u32) -> JsValue {
        self.inner.activate_arrow(id).map_or(JsValue::NULL, |a| to_js(&a))
    }
    pub fn activate_arrow_res(&mut self, id: u32) -> JsValue {
        match self.inner.activate_arrow(id) {
            Ok(a) => error::ok(to_js(&a)),
            Err(e) => error::from_error(&e),
        }
    }
    pub fn deactivate(&mut self) -> Option<u32> {
        self.inner.deactivate()
    }
    pub fn active_arrow(&self) -> Option<u32> {
        self.inner.active_arrow()
    }
    /// Control points of the active arrow as `[x0, y0, x1, y1, ...]`.
    pub fn decorations(&self) -> Float32Array {
        let flat: Vec<f32> = self.inner.decorations().iter().flat_map(|p| [p.x, p.y]).collect();
        Float32Array::from(flat.as_slice())
    }

    // JSON
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.from_json_value(val).is_ok(),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.from_json_value(val) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::from_error(&e),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}
