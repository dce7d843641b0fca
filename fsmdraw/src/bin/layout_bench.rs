use fsmdraw::{decompose, Diagram};
use std::time::Instant;

/// Chain of 3-cycles: c0 -> c1 -> ... where every cycle is one component.
fn build_cycle_chain(states_target: usize) -> Diagram {
    let mut d = Diagram::new();
    let cycles = (states_target / 3).max(1);
    for c in 0..cycles {
        for k in 0..3 { let _ = d.add_state(&format!("s{c}_{k}"), 0.0, 0.0); }
        for k in 0..3 { let _ = d.add_arrow("next", &format!("s{c}_{k}"), &format!("s{c}_{}", (k + 1) % 3)); }
        if c > 0 { let _ = d.add_arrow("advance", &format!("s{}_0", c - 1), &format!("s{c}_0")); }
    }
    d
}

/// Nearest-rank percentile of an ascending sample; 0 when empty.
fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let rank = (q * sorted.len() as f64).ceil() as usize;
    sorted.get(rank.saturating_sub(1)).copied().unwrap_or(0.0)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut states = 3000usize;
    let mut picks = 200usize;
    let mut tol = 5.0f32;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--states=") { if let Ok(v)=val.parse() { states=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--tol=") { if let Ok(v)=val.parse() { tol=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let mut d = build_cycle_chain(states);
    let t0 = Instant::now();
    let comps = decompose(&d.build_graph());
    let scc_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let t0 = Instant::now();
    d.auto_layout();
    let layout_ms = t0.elapsed().as_secs_f64() * 1000.0;
    let step = d.config().step;

    // Pick points sweep the first rows of the laid-out diagram
    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let mut hits = 0usize;
    for k in 0..picks {
        let x = (k % 3) as f32 * step + 60.0;
        let y = ((k / 3) % 20) as f32 * step + 45.0;
        let t0 = Instant::now();
        if d.pick(x, y, tol).is_some() { hits += 1; }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    times_ms.sort_by(|a, b| a.total_cmp(b));
    let [med, p90, p99] = [0.5, 0.9, 0.99].map(|q| nearest_rank(&times_ms, q));
    println!(
        "states={} arrows={} components={} scc_ms={:.3} layout_ms={:.3} picks={} tol={} hits={} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}",
        d.state_count(), d.arrow_count(), comps.len(), scc_ms, layout_ms, picks, tol, hits, med, p90, p99
    );
    if let Some(th) = assert_ms { if layout_ms > th { eprintln!("FAIL: layout {:.4} ms > threshold {:.3} ms", layout_ms, th); std::process::exit(1); } }
}
