use crate::error::{DiagramError, Result};
use crate::geometry::limits;
use crate::model::StateKind;
use crate::Diagram;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Default)]
struct StateDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct TransitionDoc {
    #[serde(default)]
    targets: Vec<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ActionDoc {
    #[serde(default)]
    transitions: BTreeMap<String, TransitionDoc>,
}

#[derive(Serialize, Deserialize, Default)]
struct Doc {
    #[serde(default)]
    states: BTreeMap<String, StateDoc>,
    #[serde(default)]
    actions: BTreeMap<String, ActionDoc>,
}

pub fn to_json_impl(d: &Diagram) -> Value {
    let mut doc = Doc::default();
    for s in &d.states {
        doc.states.insert(
            s.key.clone(),
            StateDoc {
                x: Some(s.x),
                y: Some(s.y),
                width: Some(s.width),
                height: Some(s.height),
                label: s.label.clone(),
            },
        );
    }
    for a in d.arrows.iter().flatten() {
        let (Some(src), Some(dst)) = (d.states.get(a.source as usize), d.states.get(a.target as usize)) else {
            continue;
        };
        doc.actions
            .entry(a.action.clone())
            .or_default()
            .transitions
            .entry(src.key.clone())
            .or_default()
            .targets
            .push(dst.key.clone());
    }
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

/// Load a diagram document into `d`, replacing its contents.
///
/// The document is built into a scratch diagram first, so `d` only changes
/// when the whole document is accepted.
pub fn from_json_impl(d: &mut Diagram, v: Value) -> Result<()> {
    let doc: Doc = serde_json::from_value(v).map_err(|e| DiagramError::InvalidStructure(e.to_string()))?;
    if doc.states.len() > limits::MAX_STATES {
        return Err(DiagramError::CapsExceeded { what: "states", max: limits::MAX_STATES });
    }
    let arrow_total: usize = doc
        .actions
        .values()
        .flat_map(|a| a.transitions.values())
        .map(|t| t.targets.len())
        .sum();
    if arrow_total > limits::MAX_ARROWS {
        return Err(DiagramError::CapsExceeded { what: "arrows", max: limits::MAX_ARROWS });
    }

    let mut next = Diagram::with_config(d.config.clone());
    let mut needs_layout = false;
    for (key, s) in &doc.states {
        for c in [s.x, s.y].into_iter().flatten() {
            if !limits::in_coord_bounds(c) {
                return Err(DiagramError::OutOfBounds("state coordinate"));
            }
        }
        for w in [s.width, s.height].into_iter().flatten() {
            if !limits::in_size_bounds(w) {
                return Err(DiagramError::OutOfBounds("state size"));
            }
        }
        let id = next.push_state(key)?;
        let state = &mut next.states[id as usize];
        match (s.x, s.y) {
            (Some(x), Some(y)) => {
                state.x = x;
                state.y = y;
            }
            _ => needs_layout = true,
        }
        if let Some(w) = s.width {
            state.width = w;
        }
        if let Some(h) = s.height {
            state.height = h;
        }
        state.label = s.label.clone();
    }

    for (action, a) in &doc.actions {
        for (source, t) in &a.transitions {
            for target in &t.targets {
                let before = next.state_count();
                next.add_arrow(action, source, target)?;
                // a sentinel created on demand has no position yet
                if next.state_count() != before {
                    needs_layout = true;
                }
            }
        }
    }

    if needs_layout {
        next.auto_layout();
    }
    let sentinels = next.states.iter().filter(|s| s.kind != StateKind::Normal).count();
    log::debug!(
        "loaded diagram: {} states ({} sentinel), {} arrows, layout={}",
        next.state_count(),
        sentinels,
        next.arrow_count(),
        needs_layout
    );
    next.geom_ver = d.geom_ver.wrapping_add(1);
    *d = next;
    Ok(())
}
