use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Diagram { pub(crate) inner: fsmdraw::Diagram }

impl Diagram {
    pub fn rs_new() -> Diagram { Diagram { inner: fsmdraw::Diagram::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
