use super::*;

fn add_rect(shape: &mut Shape, x0: f64, y0: f64, x1: f64, y1: f64) {
    let c = shape.add_contour();
    let pts = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
    for i in 0..4 {
        let (ax, ay) = pts[i];
        let (bx, by) = pts[(i + 1) % 4];
        shape
            .add_linear(c, Point::new(ax, ay), Point::new(bx, by))
            .unwrap();
    }
}

#[test]
fn adjacent_splines_always_differ() {
    let mut shape = Shape::new();
    add_rect(&mut shape, 0.0, 0.0, 4.0, 1.0);
    add_rect(&mut shape, 0.0, 1.2, 4.0, 2.2);
    edge_coloring_by_distance(&mut shape, 3.0, 0).unwrap();
    for contour in shape.contours() {
        let c: Vec<EdgeColor> = contour.edges().iter().map(|e| e.color()).collect();
        for i in 0..c.len() {
            assert_ne!(c[i], c[(i + 1) % c.len()]);
            assert_eq!(c[i].bits().count_ones(), 2);
        }
    }
}

#[test]
fn deterministic_per_seed() {
    for seed in [0u64, 42] {
        let mut a = Shape::new();
        add_rect(&mut a, 0.0, 0.0, 3.0, 3.0);
        let mut b = a.clone();
        edge_coloring_by_distance(&mut a, 3.0, seed).unwrap();
        edge_coloring_by_distance(&mut b, 3.0, seed).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn search_separates_the_close_pair() {
    let ring = Ring {
        members: vec![0, 1, 2, 3],
    };
    let mut weights = vec![vec![0.0; 4]; 4];
    weights[0][2] = 100.0;
    weights[2][0] = 100.0;
    weights[1][3] = 1.0;
    weights[3][1] = 1.0;
    let mut colors = vec![
        EdgeColor::CYAN,
        EdgeColor::MAGENTA,
        EdgeColor::CYAN,
        EdgeColor::MAGENTA,
    ];
    let changes = optimize(std::slice::from_ref(&ring), &weights, &mut colors, 0);
    assert!(changes > 0);
    assert_ne!(colors[0], colors[2]);
    assert!(ring_is_proper(&ring, &colors));
}

#[test]
fn weights_skip_adjacent_pairs() {
    let ring = Ring {
        members: vec![0, 1, 2],
    };
    assert!(adjacent(std::slice::from_ref(&ring), 0, 1));
    assert!(adjacent(std::slice::from_ref(&ring), 2, 0));
    let lone = Ring { members: vec![3] };
    assert!(!adjacent(&[ring, lone], 0, 3));
}
