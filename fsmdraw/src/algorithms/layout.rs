//! Row-per-component placement driven by the SCC decomposition.
//!
//! Tarjan yields components sinks-first, so rows are emitted back to front:
//! sources end up on top and flow runs downwards. Every component gets its
//! own row, centred against the widest one; members of a row step right by
//! `config.step` and zig-zag vertically so cycles fan out instead of lining
//! up on one axis.

use crate::algorithms::tarjan::Component;
use crate::config::Config;
use crate::model::State;

/// Vertical offset of every member of a row, relative to the row baseline.
///
/// Starts at zero and alternately moves by `+amplitude` and `-amplitude`.
pub fn zigzag_offsets(len: usize, amplitude: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(len);
    let mut dy = 0.0;
    let mut sign = 1.0;
    for _ in 0..len {
        offsets.push(dy);
        dy += sign * amplitude;
        sign = -sign;
    }
    offsets
}

/// Assign a logical position to every state named by `components`.
///
/// Component entries are indices into `states`; entries past the end are
/// skipped.
pub fn layout(components: &[Component], states: &mut [State], config: &Config) {
    let step = config.step;
    let max_width = components.iter().map(|c| c.len()).max().unwrap_or(0) as f32 * step;
    let mut baseline = 0.0f32;

    for component in components.iter().rev() {
        let width = component.len() as f32 * step;
        let left = (max_width - width) * 0.5;
        let offsets = zigzag_offsets(component.len(), config.zigzag);
        for (j, (&node, dy)) in component.iter().zip(offsets).enumerate() {
            match states.get_mut(node) {
                Some(state) => {
                    state.x = left + j as f32 * step;
                    state.y = baseline + dy;
                }
                None => log::warn!("layout: component references missing state {node}"),
            }
        }
        baseline += step;
    }
    log::debug!("layout: {} rows, max row width {}", components.len(), max_width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StateKind;

    fn states(n: usize) -> Vec<State> {
        (0..n)
            .map(|i| State {
                key: format!("s{i}"),
                kind: StateKind::Normal,
                x: f32::NAN,
                y: f32::NAN,
                width: 100.0,
                height: 40.0,
                label: None,
            })
            .collect()
    }

    #[test]
    fn zigzag_shape() {
        assert_eq!(zigzag_offsets(1, 50.0), vec![0.0]);
        assert_eq!(zigzag_offsets(4, 50.0), vec![0.0, 50.0, 0.0, 50.0]);
        assert!(zigzag_offsets(0, 50.0).is_empty());
    }

    #[test]
    fn rows_follow_reverse_component_order() {
        let mut s = states(2);
        // Tarjan output for a -> b
        layout(&[vec![1], vec![0]], &mut s, &Config::default());
        assert_eq!((s[0].x, s[0].y), (0.0, 0.0));
        assert_eq!((s[1].x, s[1].y), (0.0, 150.0));
    }

    #[test]
    fn narrow_rows_are_centred() {
        let mut s = states(4);
        layout(&[vec![3], vec![2, 1, 0]], &mut s, &Config::default());
        assert_eq!(s[2].x, 0.0);
        assert_eq!(s[1].x, 150.0);
        assert_eq!(s[0].x, 300.0);
        assert_eq!((s[2].y, s[1].y, s[0].y), (0.0, 50.0, 0.0));
        // single member centred under a 3-wide row
        assert_eq!(s[3].x, 150.0);
        assert_eq!(s[3].y, 150.0);
    }

    #[test]
    fn empty_and_out_of_range_input() {
        let mut s = states(1);
        layout(&[], &mut s, &Config::default());
        assert!(s[0].x.is_nan());
        layout(&[vec![0, 7]], &mut s, &Config::default());
        assert_eq!(s[0].x, 0.0);
    }
}
