use fsmdraw::geometry::point::angle;
use fsmdraw::{build_path, path_contains, Config, Diagram, Point};

#[test]
fn coincident_states_do_not_panic() {
    let mut d = Diagram::new();
    d.add_state("a", 0.0, 0.0).unwrap();
    d.add_state("b", 0.0, 0.0).unwrap();
    d.add_arrow("x", "a", "b").unwrap();
    d.add_arrow("y", "b", "a").unwrap();
    // anchors collapse onto the shared centre; geometry must stay finite
    for c in d.connections() {
        assert!(c.points.iter().all(|p| p.is_finite()));
    }
    let _ = d.pick(50.0, 50.0, 5.0);
    let _ = d.to_svg_paths();
}

#[test]
fn degenerate_angle_is_tolerated() {
    let p = Point::new(1.0, 1.0);
    assert!(angle(p, p, p).is_nan());
}

#[test]
fn repeated_points_build_a_finite_path() {
    let p = Point::new(7.0, 7.0);
    let path = build_path(&[p, p, p, p], 0.5);
    assert_eq!(path.segments.len(), 3);
    assert!(path.flatten().iter().all(|q| q.is_finite()));
    assert!(path_contains(&path, p, 0.1));
}

#[test]
fn invalid_input_is_rejected() {
    let mut d = Diagram::new();
    assert_eq!(d.add_state("a", f32::NAN, 0.0).unwrap_err().code(), "non_finite");
    assert_eq!(d.add_state("a", 0.0, 1.0e30).unwrap_err().code(), "out_of_bounds");
    d.add_state("a", 0.0, 0.0).unwrap();
    assert_eq!(d.add_state("a", 1.0, 1.0).unwrap_err().code(), "duplicate_state");
    assert!(!d.move_state(0, f32::INFINITY, 0.0));
    assert!(!d.move_state(9, 1.0, 1.0));
    assert_eq!(d.add_arrow("x", "a", "missing").unwrap(), None);
    assert!(!d.remove_arrow(3));
}

#[test]
fn bad_config_is_refused() {
    let mut d = Diagram::new();
    let cfg = Config { step: f32::NAN, ..Config::default() };
    assert_eq!(d.set_config(cfg).unwrap_err().code(), "invalid_config");
    assert_eq!(d.config().step, Config::default().step);
}

#[test]
fn pick_with_nonsense_input_is_none() {
    let mut d = Diagram::new();
    d.add_state("a", 0.0, 0.0).unwrap();
    assert!(d.pick(f32::NAN, 0.0, 5.0).is_none());
    // negative tolerance falls back to the configured one
    assert!(d.pick(60.0, 50.0, -1.0).is_some());
}

#[test]
fn state_labels_round_trip_and_bump_version() {
    let mut d = Diagram::new();
    let a = d.add_state("a", 0.0, 0.0).unwrap();
    let ver = d.geom_version();
    assert!(d.set_state_label(a, Some("Idle".into())));
    assert!(d.geom_version() > ver);
    assert!(!d.set_state_label(42, None));
    let v = d.to_json_value();
    assert_eq!(v["states"]["a"]["label"], "Idle");
}
