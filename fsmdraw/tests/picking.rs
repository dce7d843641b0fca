use fsmdraw::{Activation, Diagram, Pick};

/// Two states side by side with one arrow between them; the arrow runs along
/// surface y = 60 from x = 140 to x = 340.
fn pair() -> (Diagram, u32) {
    let mut d = Diagram::new();
    d.add_state("a", 0.0, 0.0).unwrap();
    d.add_state("b", 300.0, 0.0).unwrap();
    let e = d.add_arrow("go", "a", "b").unwrap().unwrap();
    (d, e)
}

#[test]
fn pick_state_before_arrow() {
    let (d, _) = pair();
    assert_eq!(d.pick(45.0, 45.0, 5.0), Some(Pick::State { id: 0 }));
    assert_eq!(d.pick(380.0, 70.0, 5.0), Some(Pick::State { id: 1 }));
}

#[test]
fn pick_arrow_by_curve_and_label() {
    let (d, e) = pair();
    match d.pick(180.0, 63.0, 5.0) {
        Some(Pick::Arrow { id, dist }) => {
            assert_eq!(id, e);
            assert!((dist - 3.0).abs() < 1e-3);
        }
        other => panic!("expected arrow pick, got {:?}", other),
    }
    // the label "go" is 14 px wide and centred on the arrow midpoint
    assert!(matches!(d.pick(246.0, 66.0, 1.0), Some(Pick::Arrow { .. })));
    assert_eq!(d.pick(180.0, 80.0, 5.0), None);
}

#[test]
fn closest_arrow_wins() {
    let (mut d, _) = pair();
    let back = d.add_arrow("back", "b", "a").unwrap().unwrap();
    let conns = d.connections();
    let bowed = conns.iter().find(|c| c.arrow == back).unwrap();
    let mid = bowed.points[1];
    match d.pick(mid.x, mid.y, 5.0) {
        Some(Pick::Arrow { id, .. }) => assert_eq!(id, back),
        other => panic!("expected the bowed arrow, got {:?}", other),
    }
}

#[test]
fn activation_and_decorations() {
    let (mut d, e) = pair();
    assert!(d.decorations().is_empty());
    assert_eq!(d.activate_arrow(e).unwrap(), Activation::Activated { id: e });
    assert_eq!(d.activate_arrow(e).unwrap(), Activation::AlreadyActive { id: e });
    assert_eq!(d.active_arrow(), Some(e));
    // straight arrow: start and end are its only control points
    assert_eq!(d.decorations().len(), 2);
    assert_eq!(d.deactivate(), Some(e));
    assert!(d.decorations().is_empty());
    assert_eq!(d.activate_arrow(99).unwrap_err().code(), "invalid_id");
}

#[test]
fn removing_the_active_arrow_clears_it() {
    let (mut d, e) = pair();
    d.activate_arrow(e).unwrap();
    assert!(d.remove_arrow(e));
    assert_eq!(d.active_arrow(), None);
    assert!(d.connections().is_empty());
}
