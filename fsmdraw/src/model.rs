use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};

/// Reserved key of the synthetic start state.
pub const START_KEY: &str = "_start";
/// Reserved key of the synthetic end state.
pub const END_KEY: &str = "_end";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    Normal,
    Start,
    End,
}

impl StateKind {
    pub fn for_key(key: &str) -> StateKind {
        match key {
            START_KEY => StateKind::Start,
            END_KEY => StateKind::End,
            _ => StateKind::Normal,
        }
    }

    pub fn is_sentinel(self) -> bool {
        self != StateKind::Normal
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub key: String,
    pub kind: StateKind,
    /// Top-left corner in logical layout coordinates.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: Option<String>,
}

impl State {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub action: String,
    pub source: u32,
    pub target: u32,
}

impl Arrow {
    pub fn is_cycle(&self) -> bool {
        self.source == self.target
    }
}
