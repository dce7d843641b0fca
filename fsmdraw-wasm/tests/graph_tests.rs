use fsmdraw_wasm::Diagram;
use js_sys::{Float32Array, Reflect, Uint32Array, Uint8Array};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Deserialize)]
struct Pick {
    kind: String,
    id: f64,
}

#[wasm_bindgen_test]
fn states_and_arrows_basic() {
    let mut d = Diagram::new();
    let a = d.add_state("a", 0.0, 0.0).expect("state id");
    let b = d.add_state("b", 300.0, 0.0).expect("state id");
    assert_eq!(d.state_count(), 2);
    assert!(d.move_state(b, 300.0, 10.0));

    let e = d.add_arrow("go", "a", "b").expect("arrow id");
    assert_eq!(d.arrow_count(), 1);
    assert_eq!(d.add_arrow("go", "a", "missing"), None);

    let sd = d.get_state_data();
    let ids = Uint32Array::new(&Reflect::get(&sd, &JsValue::from_str("ids")).unwrap());
    let pos = Float32Array::new(&Reflect::get(&sd, &JsValue::from_str("positions")).unwrap());
    let kinds = Uint8Array::new(&Reflect::get(&sd, &JsValue::from_str("kinds")).unwrap());
    assert_eq!(ids.length(), 2);
    assert_eq!(pos.length(), 4);
    assert_eq!(kinds.to_vec(), vec![0, 0]);
    assert_eq!(ids.get_index(0), a);

    assert!(d.remove_arrow(e));
    assert_eq!(d.arrow_count(), 0);
}

#[wasm_bindgen_test]
fn pick_state_and_arrow() {
    let mut d = Diagram::new();
    let a = d.add_state("a", 0.0, 0.0).unwrap();
    d.add_state("b", 300.0, 0.0).unwrap();
    let e = d.add_arrow("go", "a", "b").unwrap();

    let ps: Pick = serde_wasm_bindgen::from_value(d.pick(45.0, 45.0, 5.0)).unwrap();
    assert_eq!(ps.kind, "state");
    assert_eq!(ps.id as u32, a);

    // arrow runs along surface y = 60 between the two boxes
    let pa: Pick = serde_wasm_bindgen::from_value(d.pick(180.0, 61.0, 5.0)).unwrap();
    assert_eq!(pa.kind, "arrow");
    assert_eq!(pa.id as u32, e);
    assert!(d.pick(180.0, 90.0, 5.0).is_null());
}

#[wasm_bindgen_test]
fn activation_and_decorations() {
    let mut d = Diagram::new();
    d.add_state("a", 0.0, 0.0).unwrap();
    d.add_state("b", 300.0, 0.0).unwrap();
    let e = d.add_arrow("go", "a", "b").unwrap();
    assert_eq!(d.decorations().length(), 0);
    let act: serde_json::Value = serde_wasm_bindgen::from_value(d.activate_arrow(e)).unwrap();
    assert_eq!(act["kind"], "activated");
    assert_eq!(d.active_arrow(), Some(e));
    assert_eq!(d.decorations().length(), 4);
    assert_eq!(d.deactivate(), Some(e));
    assert_eq!(d.decorations().length(), 0);
}

#[wasm_bindgen_test]
fn layout_and_json_roundtrip() {
    let mut d = Diagram::new();
    let doc = js_sys::JSON::parse(
        r#"{"states": {"a": {}, "b": {}, "c": {}},
            "actions": {"x": {"transitions": {"a": {"targets": ["b"]}, "b": {"targets": ["a", "c"]}}}}}"#,
    )
    .unwrap();
    assert!(d.from_json(doc));
    assert_eq!(d.state_count(), 3);
    assert_eq!(d.arrow_count(), 3);

    let comps: Vec<Vec<u32>> = serde_wasm_bindgen::from_value(d.auto_layout()).unwrap();
    assert_eq!(comps.len(), 2);
    assert_eq!(comps[0], vec![2]);

    let j: serde_json::Value = serde_wasm_bindgen::from_value(d.to_json()).unwrap();
    assert_eq!(j["actions"]["x"]["transitions"]["b"]["targets"].as_array().map(|t| t.len()), Some(2));

    let mut d2 = Diagram::new();
    assert!(d2.from_json(d.to_json()));
    assert_eq!(d2.arrow_count(), 3);
    d2.clear();
    assert_eq!(d2.state_count(), 0);
}

#[wasm_bindgen_test]
fn connections_and_svg() {
    let mut d = Diagram::new();
    d.add_state("a", 0.0, 0.0).unwrap();
    d.add_state("b", 300.0, 0.0).unwrap();
    d.add_arrow("go", "a", "b").unwrap();
    d.add_arrow("back", "b", "a").unwrap();
    d.add_arrow("stay", "a", "a").unwrap();
    let conns: Vec<serde_json::Value> = serde_wasm_bindgen::from_value(d.get_connections()).unwrap();
    assert_eq!(conns.len(), 3);
    assert_eq!(conns[2]["points"].as_array().map(|p| p.len()), Some(5));
    let paths: Vec<String> = serde_wasm_bindgen::from_value(d.to_svg_paths()).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths.iter().all(|s| s.starts_with("M ")));
}
