pub mod config;
pub mod error;
pub mod model;
pub mod selection;
pub mod geometry {
    pub mod cubic;
    pub mod flatten;
    pub mod intersect;
    pub mod limits;
    pub mod point;
    pub mod spline;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod connection;
    pub mod layout;
    pub mod picking;
    pub mod tarjan;
}
mod json;
mod svg;

pub use algorithms::connection::{connection_geometry, Connection, ConnectionGeometry};
pub use algorithms::layout::layout;
pub use algorithms::tarjan::{decompose, Component, Graph};
pub use config::Config;
pub use error::DiagramError;
pub use geometry::point::Point;
pub use geometry::spline::{build_path, path_contains, Path, PathSeg};
pub use selection::Activation;

use algorithms::connection::{anchor, loop_anchors, OccurrenceCounter};
use error::Result;
use geometry::limits;
use model::{Arrow, State, StateKind};
use selection::Selection;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An editable state diagram: states, arrows and the layout constants used
/// to place and draw them.
pub struct Diagram {
    pub(crate) states: Vec<State>,               // id is index
    pub(crate) index: HashMap<String, u32>,      // key -> state id
    pub(crate) arrows: Vec<Option<Arrow>>,       // id is index
    pub(crate) arrow_keys: HashSet<(String, u32, u32)>, // live (action, source, target)
    pub(crate) config: Config,
    pub(crate) geom_ver: u64,
    pub(crate) selection: Selection,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "state")]
    State { id: u32 },
    #[serde(rename = "arrow")]
    Arrow { id: u32, dist: f32 },
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Diagram {
            states: Vec::new(),
            index: HashMap::new(),
            arrows: Vec::new(),
            arrow_keys: HashSet::new(),
            config,
            geom_ver: 1,
            selection: Selection::default(),
        }
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver = self.geom_ver.wrapping_add(1);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.bump();
        Ok(())
    }

    // States
    pub fn add_state(&mut self, key: &str, x: f32, y: f32) -> Result<u32> {
        if !x.is_finite() {
            return Err(DiagramError::NonFinite("x"));
        }
        if !y.is_finite() {
            return Err(DiagramError::NonFinite("y"));
        }
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(DiagramError::OutOfBounds("state coordinate"));
        }
        let id = self.push_state(key)?;
        let s = &mut self.states[id as usize];
        s.x = x;
        s.y = y;
        Ok(id)
    }

    /// Register a state at the origin, sized by its kind.
    pub(crate) fn push_state(&mut self, key: &str) -> Result<u32> {
        if key.is_empty() || key.len() > limits::MAX_KEY_LEN {
            return Err(DiagramError::InvalidStructure(format!("state key length {}", key.len())));
        }
        if self.index.contains_key(key) {
            return Err(DiagramError::DuplicateState(key.to_string()));
        }
        if self.states.len() >= limits::MAX_STATES {
            return Err(DiagramError::CapsExceeded { what: "states", max: limits::MAX_STATES });
        }
        let kind = StateKind::for_key(key);
        let (width, height) = if kind.is_sentinel() {
            (self.config.sentinel_size, self.config.sentinel_size)
        } else {
            (self.config.state_width, self.config.state_height)
        };
        let id = self.states.len() as u32;
        self.states.push(State { key: key.to_string(), kind, x: 0.0, y: 0.0, width, height, label: None });
        self.index.insert(key.to_string(), id);
        self.bump();
        Ok(id)
    }

    pub fn state_id(&self, key: &str) -> Option<u32> {
        self.index.get(key).copied()
    }

    pub fn get_state(&self, id: u32) -> Option<&State> {
        self.states.get(id as usize)
    }

    pub fn move_state(&mut self, id: u32, x: f32, y: f32) -> bool {
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return false;
        }
        match self.states.get_mut(id as usize) {
            Some(s) => {
                s.x = x;
                s.y = y;
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Display text for a state; `None` falls back to the key.
    pub fn set_state_label(&mut self, id: u32, label: Option<String>) -> bool {
        match self.states.get_mut(id as usize) {
            Some(s) => {
                s.label = label;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn state_count(&self) -> u32 {
        self.states.len() as u32
    }

    /// State ids and their top-left corners in surface coordinates, flattened
    /// as `[x0, y0, x1, y1, ...]`.
    pub fn get_state_arrays(&self) -> (Vec<u32>, Vec<f32>) {
        let mut ids = Vec::with_capacity(self.states.len());
        let mut pos = Vec::with_capacity(self.states.len() * 2);
        for (i, s) in self.states.iter().enumerate() {
            let p = self.config.to_surface(Point::new(s.x, s.y));
            ids.push(i as u32);
            pos.push(p.x);
            pos.push(p.y);
        }
        (ids, pos)
    }

    // Arrows
    /// Add an arrow for `action` from `source` to `target`.
    ///
    /// Unknown states leave the diagram unchanged and yield `Ok(None)`;
    /// the sentinel keys create their state on first use. A second arrow
    /// with the same action, source and target is an error.
    pub fn add_arrow(&mut self, action: &str, source: &str, target: &str) -> Result<Option<u32>> {
        if !self.is_known(source) || !self.is_known(target) {
            log::warn!("action '{action}': dropping arrow {source} -> {target}, unknown state");
            return Ok(None);
        }
        // no sentinel may be created until every check has passed
        if let (Some(a), Some(b)) = (self.state_id(source), self.state_id(target)) {
            if self.arrow_keys.contains(&(action.to_string(), a, b)) {
                return Err(DiagramError::DuplicateArrow {
                    action: action.to_string(),
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }
        }
        if self.arrow_keys.len() >= limits::MAX_ARROWS {
            return Err(DiagramError::CapsExceeded { what: "arrows", max: limits::MAX_ARROWS });
        }
        let missing = match (self.state_id(source), self.state_id(target)) {
            (None, None) if source != target => 2,
            (None, _) | (_, None) => 1,
            _ => 0,
        };
        if self.states.len() + missing > limits::MAX_STATES {
            return Err(DiagramError::CapsExceeded { what: "states", max: limits::MAX_STATES });
        }
        let a = self.resolve(source)?;
        let b = self.resolve(target)?;
        let id = self.arrows.len() as u32;
        self.arrows.push(Some(Arrow { action: action.to_string(), source: a, target: b }));
        self.arrow_keys.insert((action.to_string(), a, b));
        self.bump();
        Ok(Some(id))
    }

    fn is_known(&self, key: &str) -> bool {
        self.index.contains_key(key) || StateKind::for_key(key).is_sentinel()
    }

    fn resolve(&mut self, key: &str) -> Result<u32> {
        match self.state_id(key) {
            Some(id) => Ok(id),
            None => self.push_state(key),
        }
    }

    pub fn remove_arrow(&mut self, id: u32) -> bool {
        match self.arrows.get_mut(id as usize) {
            Some(slot) if slot.is_some() => {
                if let Some(a) = slot.take() {
                    self.arrow_keys.remove(&(a.action, a.source, a.target));
                }
                if self.selection.active() == Some(id) {
                    self.selection.deactivate();
                }
                self.bump();
                true
            }
            _ => false,
        }
    }

    pub fn get_arrow(&self, id: u32) -> Option<&Arrow> {
        self.arrows.get(id as usize).and_then(|a| a.as_ref())
    }

    pub fn arrow_count(&self) -> u32 {
        self.arrow_keys.len() as u32
    }

    // Layout
    /// Node `i` of the returned graph is state `i`; one edge per arrow.
    pub fn build_graph(&self) -> Graph {
        let mut g = Graph::with_capacity(self.states.len());
        for s in &self.states {
            g.add_node(s.key.as_str());
        }
        for a in self.arrows.iter().flatten() {
            g.add_edge(a.source as usize, a.target as usize);
        }
        g
    }

    /// Place every state from the SCC decomposition of the arrow graph.
    pub fn auto_layout(&mut self) -> Vec<Component> {
        let graph = self.build_graph();
        let components = decompose(&graph);
        layout(&components, &mut self.states, &self.config);
        self.bump();
        components
    }

    // Rendering
    /// Drawable geometry for every arrow, recomputed from scratch in arrow
    /// order so occurrence indices are stable across redraws.
    pub fn connections(&self) -> Vec<Connection> {
        let directed: HashSet<(u32, u32)> = self.arrows.iter().flatten().map(|a| (a.source, a.target)).collect();
        let mut counter = OccurrenceCounter::new();
        let mut out = Vec::with_capacity(directed.len());
        for (id, arrow) in self.arrows.iter().enumerate() {
            let Some(arrow) = arrow else { continue };
            let (Some(src), Some(dst)) = (self.get_state(arrow.source), self.get_state(arrow.target)) else {
                continue;
            };
            let cycle = arrow.is_cycle();
            let (a, b) = if cycle {
                loop_anchors(src)
            } else {
                (anchor(src, dst.center()), anchor(dst, src.center()))
            };
            let geometry = ConnectionGeometry {
                source: self.config.to_surface(a),
                target: self.config.to_surface(b),
                occurrence: counter.next(arrow.source, arrow.target),
                cycle,
                bidirectional: !cycle && directed.contains(&(arrow.target, arrow.source)),
            };
            out.push(Connection::new(id as u32, geometry, Some(arrow.action.as_str()), &self.config));
        }
        out
    }

    pub fn connection(&self, id: u32) -> Option<Connection> {
        self.get_arrow(id)?;
        self.connections().into_iter().find(|c| c.arrow == id)
    }

    // Picking return
    pub fn pick(&self, x: f32, y: f32, tol: f32) -> Option<Pick> {
        algorithms::picking::pick_impl(self, x, y, tol)
    }

    // Activation
    pub fn activate_arrow(&mut self, id: u32) -> Result<Activation> {
        if self.get_arrow(id).is_none() {
            return Err(DiagramError::InvalidId { kind: "arrow", id });
        }
        Ok(self.selection.activate(id))
    }

    pub fn deactivate(&mut self) -> Option<u32> {
        self.selection.deactivate()
    }

    pub fn active_arrow(&self) -> Option<u32> {
        self.selection.active()
    }

    /// Control-point decorations of the active arrow; empty when none is active.
    pub fn decorations(&self) -> Vec<Point> {
        self.selection
            .active()
            .and_then(|id| self.connection(id))
            .map(|c| c.path.control_points())
            .unwrap_or_default()
    }

    // JSON
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    /// Replace the diagram with the document in `v`. On error the diagram is
    /// left untouched.
    pub fn from_json_value(&mut self, v: serde_json::Value) -> Result<()> {
        json::from_json_impl(self, v)
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(self)
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.index.clear();
        self.arrows.clear();
        self.arrow_keys.clear();
        self.selection = Selection::default();
        self.bump();
    }
}
