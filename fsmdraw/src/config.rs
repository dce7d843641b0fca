use crate::error::{DiagramError, Result};
use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};

/// Layout and rendering constants passed to every layout/geometry call.
///
/// Deserializes from a partial JSON object; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Horizontal distance between members of a row, and vertical distance
    /// between rows.
    pub step: f32,
    pub tension: f32,
    pub hit_tolerance: f32,
    /// Logical-to-surface translation.
    pub padding_x: f32,
    pub padding_y: f32,
    /// Vertical zig-zag amplitude inside a row. Heuristic, tunable.
    pub zigzag: f32,
    pub state_width: f32,
    pub state_height: f32,
    pub sentinel_size: f32,
    pub bow: f32,
    pub loop_height: f32,
    pub loop_spread: f32,
    pub label_char_width: f32,
    pub label_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step: 150.0,
            tension: 0.5,
            hit_tolerance: 5.0,
            padding_x: 40.0,
            padding_y: 40.0,
            zigzag: 50.0,
            state_width: 100.0,
            state_height: 40.0,
            sentinel_size: 24.0,
            bow: 30.0,
            loop_height: 40.0,
            loop_spread: 15.0,
            label_char_width: 7.0,
            label_height: 14.0,
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s).map_err(|e| DiagramError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let all = [
            ("step", self.step),
            ("tension", self.tension),
            ("hit_tolerance", self.hit_tolerance),
            ("padding_x", self.padding_x),
            ("padding_y", self.padding_y),
            ("zigzag", self.zigzag),
            ("state_width", self.state_width),
            ("state_height", self.state_height),
            ("sentinel_size", self.sentinel_size),
            ("bow", self.bow),
            ("loop_height", self.loop_height),
            ("loop_spread", self.loop_spread),
            ("label_char_width", self.label_char_width),
            ("label_height", self.label_height),
        ];
        for (name, v) in all {
            if !v.is_finite() {
                return Err(DiagramError::InvalidConfig(format!("{name} must be finite")));
            }
            if v < 0.0 {
                return Err(DiagramError::InvalidConfig(format!("{name} must not be negative")));
            }
        }
        if self.step <= 0.0 {
            return Err(DiagramError::InvalidConfig("step must be positive".into()));
        }
        Ok(())
    }

    /// Translate a logical layout position to drawing-surface pixels.
    pub fn to_surface(&self, p: Point) -> Point {
        Point::new(p.x + self.padding_x, p.y + self.padding_y)
    }

    pub fn from_surface(&self, p: Point) -> Point {
        Point::new(p.x - self.padding_x, p.y - self.padding_y)
    }
}
