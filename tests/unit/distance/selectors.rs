use super::*;

fn square_edges(colors: [EdgeColor; 4]) -> Vec<Edge> {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    (0..4)
        .map(|i| Edge::with_color(Segment::line(pts[i], pts[(i + 1) % 4]), colors[i]))
        .collect()
}

fn run<S: EdgeSelector>(p: Point, edges: &[Edge]) -> S::Distance {
    let mut sel = S::new(p);
    let n = edges.len();
    for i in 0..n {
        sel.add_edge(&edges[(i + n - 1) % n], &edges[i], &edges[(i + 1) % n]);
    }
    sel.distance()
}

#[test]
fn true_distance_inside_is_negative() {
    let edges = square_edges([EdgeColor::WHITE; 4]);
    let d = run::<TrueDistanceSelector>(Point::new(0.5, 0.5), &edges);
    assert!((d + 0.5).abs() < 1e-12);
}

#[test]
fn pseudo_distance_extends_edges_past_corners() {
    let edges = square_edges([EdgeColor::WHITE; 4]);
    let p = Point::new(1.5, 1.5);
    let t = run::<TrueDistanceSelector>(p, &edges);
    let pseudo = run::<PerpendicularDistanceSelector>(p, &edges);
    assert!((t - 0.5f64.sqrt()).abs() < 1e-12);
    assert!((pseudo - 0.5).abs() < 1e-12);
}

#[test]
fn channels_only_see_their_edges() {
    let edges = square_edges([
        EdgeColor::CYAN,
        EdgeColor::MAGENTA,
        EdgeColor::YELLOW,
        EdgeColor::MAGENTA,
    ]);
    let p = Point::new(0.5, 0.25);
    let m = run::<MultiDistanceSelector>(p, &edges);
    assert!((m.g + 0.25).abs() < 1e-12);
    assert!((m.b + 0.25).abs() < 1e-12);
    // Red never sees the bottom edge, so it reports a farther boundary.
    assert!(m.r.abs() > 0.25);
    assert!((m.resolve() + 0.25).abs() < 1e-12);

    let mt = run::<MultiAndTrueDistanceSelector>(p, &edges);
    assert!((mt.a + 0.25).abs() < 1e-12);
}

#[test]
fn black_edges_are_invisible_to_channels() {
    let edges = square_edges([EdgeColor::BLACK; 4]);
    let m = run::<MultiDistanceSelector>(Point::new(0.5, 0.5), &edges);
    assert_eq!(m, MultiDistance::FAR);
}

#[test]
fn merge_keeps_the_closer_result() {
    let edges = square_edges([EdgeColor::WHITE; 4]);
    let p = Point::new(0.5, 0.1);
    let mut a = TrueDistanceSelector::new(p);
    a.add_edge(&edges[1], &edges[2], &edges[3]);
    let mut b = TrueDistanceSelector::new(p);
    b.add_edge(&edges[3], &edges[0], &edges[1]);
    a.merge(&b);
    assert!((a.distance() + 0.1).abs() < 1e-12);
}
