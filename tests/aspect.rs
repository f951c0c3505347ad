use julia_viz::julia::normalize;
use julia_viz::PointerSample;

fn approx_eq2(a: (f64, f64), b: (f64, f64), eps: f64) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

/// Fragment coordinate that lands on `p` in the normalized plane.
fn frag_for(p: (f64, f64), res: (f64, f64)) -> (f64, f64) {
    let (w, h) = res;
    let x = (p.0 / (w / h) + 1.0) / 2.0 * w;
    let y = (p.1 + 1.0) / 2.0 * h;
    (x, y)
}

#[test]
fn vertical_extent_is_unit_for_any_aspect() {
    for res in [(1920.0, 1080.0), (1080.0, 1920.0), (800.0, 600.0), (512.0, 512.0)] {
        let top = normalize((res.0 / 2.0, res.1), res.0, res.1);
        let bottom = normalize((res.0 / 2.0, 0.0), res.0, res.1);
        assert!(approx_eq2(top, (0.0, 1.0), 1e-9), "top={:?}", top);
        assert!(approx_eq2(bottom, (0.0, -1.0), 1e-9), "bottom={:?}", bottom);
    }
}

#[test]
fn plane_points_are_aspect_invariant() {
    // Same plane point reached from two different aspect ratios
    let res1 = (1920.0, 1080.0); // wide
    let res2 = (1080.0, 1920.0); // tall

    let samples = [(0.0, 0.0), (0.3, 0.1), (-0.2, 0.5), (0.25, -0.75)];
    for &p in &samples {
        let p1 = normalize(frag_for(p, res1), res1.0, res1.1);
        let p2 = normalize(frag_for(p, res2), res2.0, res2.1);
        assert!(approx_eq2(p1, p2, 1e-9), "p1={:?} p2={:?}", p1, p2);
        assert!(approx_eq2(p1, p, 1e-9));
    }
}

#[test]
fn pointer_constant_ignores_aspect() {
    // The Julia constant is mapped per axis without aspect correction.
    let wide = PointerSample::new(1920.0, 1080.0).to_julia_constant(1920.0, 1080.0);
    let tall = PointerSample::new(1080.0, 1920.0).to_julia_constant(1080.0, 1920.0);
    assert!(approx_eq2(wide, (1.5, 1.5), 1e-12));
    assert!(approx_eq2(tall, (1.5, 1.5), 1e-12));
}
