use super::*;

#[test]
fn svg_square_becomes_one_closed_contour() {
    let shape = parse_svg_path("M0,0 L10,0 L10,10 L0,10 Z", 0.0).unwrap();
    assert_eq!(shape.contour_count(), 1);
    assert_eq!(shape.edge_count(), 4);
    assert_eq!(shape.y_axis(), YAxisOrientation::Downward);
    assert!(shape.validate());
}

#[test]
fn explicit_return_to_start_adds_no_closing_edge() {
    let shape = parse_svg_path("M0,0 L10,0 L10,10 L0,0 Z", 0.0).unwrap();
    assert_eq!(shape.edge_count(), 3);
}

#[test]
fn subpaths_become_separate_contours() {
    let shape = parse_svg_path("M0,0 L1,0 L1,1 Z M2,2 L3,2 Q3,3 2,3 Z", 0.0).unwrap();
    assert_eq!(shape.contour_count(), 2);
    assert_eq!(shape.contour(1).map(|c| c.len()), Some(3));
    assert!(shape.validate());
}

#[test]
fn small_gaps_snap_and_large_gaps_get_a_line() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((1.0, 0.0));
    path.line_to((1.0, 1.0));
    path.line_to((0.001, 0.001));

    let snapped = Shape::from_bez_path(&path, 0.01).unwrap();
    assert_eq!(snapped.edge_count(), 3);
    assert!(snapped.validate());
    let last = snapped.contour(0).and_then(|c| c.edges().last()).unwrap();
    assert_eq!(last.segment().end(), Point::new(0.0, 0.0));

    let bridged = Shape::from_bez_path(&path, 0.0).unwrap();
    assert_eq!(bridged.edge_count(), 4);
    assert!(bridged.validate());
}

#[test]
fn zero_length_segments_are_skipped() {
    let shape = parse_svg_path("M0,0 L0,0 L1,0 L1,1 Z", 0.0).unwrap();
    assert_eq!(shape.edge_count(), 3);
    assert!(shape.validate());
}

#[test]
fn bez_path_export_preserves_the_outline() {
    let shape = parse_svg_path("M0,0 L4,0 C4,2 2,4 0,4 Z", 0.0).unwrap();
    let path = shape.to_bez_path();
    let back = Shape::from_bez_path(&path, 0.0).unwrap();
    assert_eq!(back.contours(), shape.contours());
}

#[test]
fn bad_input_is_rejected() {
    assert!(matches!(
        parse_svg_path("M 0 0 L foo", 0.0),
        Err(MsdfError::InvalidArgument(_))
    ));
    assert!(Shape::from_bez_path(&BezPath::new(), -1.0).is_err());
}
