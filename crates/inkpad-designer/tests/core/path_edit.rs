use inkpad_designer::model::{DesignPath, PathPoint, PathPointKind, Point, PointType};
use inkpad_designer::path_edit::{HandleKind, HandleRef, PathEditManager, SegmentKind};

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

/// Anchor 1 at (50, 0) with incoming (40, 0) and outgoing (50, 20).
fn joint(point_type: PointType) -> DesignPath {
    DesignPath::new(
        vec![
            PathPoint::move_to(Point::new(0.0, 0.0)),
            PathPoint::cubic(Point::new(10.0, 0.0), Point::new(40.0, 0.0), Point::new(50.0, 0.0))
                .with_type(point_type),
            PathPoint::cubic(Point::new(50.0, 20.0), Point::new(90.0, 0.0), Point::new(100.0, 0.0)),
        ],
        false,
    )
}

fn incoming_of(index: usize) -> HandleRef {
    HandleRef {
        point: index,
        kind: HandleKind::Incoming,
    }
}

fn anchors(path: &DesignPath) -> Vec<Point> {
    path.points.iter().map(|p| p.position).collect()
}

#[test]
fn test_handles_listed_for_each_control() {
    let path = joint(PointType::Smooth);
    let mut manager = PathEditManager::default();
    manager.begin(4, &path);
    assert!(manager.is_editing());
    assert_eq!(manager.shape_id(), Some(4));
    // three anchors, outgoing of 0, incoming and outgoing of 1, incoming of 2
    assert_eq!(manager.handles().len(), 7);
    assert_eq!(
        manager.handle_at(Point::new(41.0, 1.0)),
        Some(incoming_of(1))
    );
    assert_eq!(manager.handle_at(Point::new(70.0, 40.0)), None);

    manager.end();
    assert!(!manager.is_editing());
    assert!(manager.handles().is_empty());
}

#[test]
fn test_smooth_keeps_sibling_length_and_opposes_direction() {
    let mut path = joint(PointType::Smooth);
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    assert!(manager.move_handle(&mut path, incoming_of(1), Point::new(44.0, -8.0), false));
    assert_eq!(path.incoming(1), Some(Point::new(44.0, -8.0)));
    let outgoing = path.outgoing(1).unwrap();
    assert!(approx(outgoing, Point::new(62.0, 16.0)), "{:?}", outgoing);
}

#[test]
fn test_symmetrical_mirrors_sibling() {
    let mut path = joint(PointType::Symmetrical);
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    manager.move_handle(&mut path, incoming_of(1), Point::new(30.0, -5.0), false);
    assert_eq!(path.outgoing(1), Some(Point::new(70.0, 5.0)));
}

#[test]
fn test_corner_leaves_sibling_alone() {
    let mut path = joint(PointType::Corner);
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    manager.move_handle(&mut path, incoming_of(1), Point::new(30.0, -5.0), false);
    assert_eq!(path.outgoing(1), Some(Point::new(50.0, 20.0)));
}

#[test]
fn test_break_continuity_overrides_policy() {
    let mut path = joint(PointType::Symmetrical);
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    manager.move_handle(&mut path, incoming_of(1), Point::new(30.0, -5.0), true);
    assert_eq!(path.outgoing(1), Some(Point::new(50.0, 20.0)));
}

#[test]
fn test_anchor_drag_carries_controls() {
    let mut path = joint(PointType::Smooth);
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    let anchor = HandleRef {
        point: 1,
        kind: HandleKind::Anchor,
    };
    manager.move_handle(&mut path, anchor, Point::new(55.0, 10.0), false);
    assert_eq!(path.points[1].position, Point::new(55.0, 10.0));
    assert_eq!(path.incoming(1), Some(Point::new(45.0, 10.0)));
    assert_eq!(path.outgoing(1), Some(Point::new(55.0, 30.0)));
    assert_eq!(path.data(), "M 0 0 C 10 0 45 10 55 10 C 55 30 90 0 100 0");
}

#[test]
fn test_anchor_drag_carries_quadratic_controls() {
    let mut path = DesignPath::new(
        vec![
            PathPoint::move_to(Point::new(0.0, 0.0)),
            PathPoint::quadratic(Point::new(10.0, 10.0), Point::new(20.0, 0.0)),
            PathPoint::quadratic(Point::new(30.0, -10.0), Point::new(40.0, 0.0)),
        ],
        false,
    );
    let mut manager = PathEditManager::default();
    manager.begin(1, &path);
    let anchor = HandleRef {
        point: 1,
        kind: HandleKind::Anchor,
    };
    assert!(manager.move_handle(&mut path, anchor, Point::new(30.0, 5.0), false));
    assert_eq!(
        path.points[1].kind,
        PathPointKind::Quadratic {
            cp: Point::new(20.0, 15.0)
        }
    );
    assert_eq!(
        path.points[2].kind,
        PathPointKind::Quadratic {
            cp: Point::new(40.0, -5.0)
        }
    );
    assert_eq!(path.data(), "M 0 0 Q 20 15 30 5 Q 40 -5 40 0");
}

#[test]
fn test_set_point_type_reaims_outgoing() {
    let mut path = joint(PointType::Corner);
    let mut manager = PathEditManager::default();
    assert!(manager.set_point_type(&mut path, 1, PointType::Symmetrical));
    assert_eq!(path.points[1].point_type, PointType::Symmetrical);
    assert_eq!(path.outgoing(1), Some(Point::new(60.0, 0.0)));
}

#[test]
fn test_convert_cycle_keeps_count_and_anchors() {
    let mut path = DesignPath::polyline(&[
        Point::new(0.0, 0.0),
        Point::new(30.0, 0.0),
        Point::new(60.0, 30.0),
    ]);
    let before = anchors(&path);
    let mut manager = PathEditManager::default();

    assert!(manager.convert_point(&mut path, 1, SegmentKind::Cubic));
    match path.points[1].kind {
        PathPointKind::Cubic { cp1, cp2 } => {
            assert!(approx(cp1, Point::new(10.0, 0.0)));
            assert!(approx(cp2, Point::new(20.0, 0.0)));
        }
        other => panic!("expected cubic, got {:?}", other),
    }

    assert!(manager.convert_point(&mut path, 1, SegmentKind::Quadratic));
    match path.points[1].kind {
        PathPointKind::Quadratic { cp } => assert!(approx(cp, Point::new(15.0, 0.0))),
        other => panic!("expected quadratic, got {:?}", other),
    }

    assert!(manager.convert_point(&mut path, 1, SegmentKind::Cubic));
    match path.points[1].kind {
        PathPointKind::Cubic { cp1, cp2 } => {
            assert!(approx(cp1, Point::new(10.0, 0.0)));
            assert!(approx(cp2, Point::new(20.0, 0.0)));
        }
        other => panic!("expected cubic, got {:?}", other),
    }

    assert!(manager.convert_point(&mut path, 1, SegmentKind::Line));
    assert_eq!(path.points[1].kind, PathPointKind::Line);
    assert_eq!(anchors(&path), before);
    assert_eq!(path.data(), "M 0 0 L 30 0 L 60 30");
}

#[test]
fn test_convert_rejects_first_point_and_same_kind() {
    let mut path = DesignPath::polyline(&[Point::new(0.0, 0.0), Point::new(30.0, 0.0)]);
    let mut manager = PathEditManager::default();
    assert!(!manager.convert_point(&mut path, 0, SegmentKind::Cubic));
    assert!(!manager.convert_point(&mut path, 1, SegmentKind::Line));
    assert!(!manager.convert_point(&mut path, 5, SegmentKind::Cubic));
}

#[test]
fn test_insert_splits_line_at_midpoint() {
    let mut path = DesignPath::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let mut manager = PathEditManager::default();
    assert_eq!(manager.insert_point(&mut path, 1), Some(1));
    assert_eq!(
        anchors(&path),
        vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(100.0, 0.0)]
    );
    assert_eq!(manager.insert_point(&mut path, 0), None);
}

#[test]
fn test_insert_subdivides_cubic() {
    let mut path = DesignPath::new(
        vec![
            PathPoint::move_to(Point::new(0.0, 0.0)),
            PathPoint::cubic(Point::new(0.0, 40.0), Point::new(40.0, 40.0), Point::new(40.0, 0.0)),
        ],
        false,
    );
    let mut manager = PathEditManager::default();
    assert_eq!(manager.insert_point(&mut path, 1), Some(1));
    assert_eq!(path.len(), 3);
    assert_eq!(
        path.points[1],
        PathPoint::cubic(Point::new(0.0, 20.0), Point::new(10.0, 30.0), Point::new(20.0, 30.0))
    );
    assert_eq!(
        path.points[2].kind,
        PathPointKind::Cubic {
            cp1: Point::new(30.0, 30.0),
            cp2: Point::new(40.0, 20.0),
        }
    );
}

#[test]
fn test_remove_respects_minimum() {
    let mut path = DesignPath::polyline(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
    ]);
    let mut manager = PathEditManager::default();
    assert!(manager.remove_point(&mut path, 0));
    assert_eq!(path.len(), 2);
    assert_eq!(path.points[0].kind, PathPointKind::Move);
    assert_eq!(path.data(), "M 10 0 L 20 0");
    assert!(!manager.remove_point(&mut path, 1));
    assert_eq!(path.len(), 2);
}

#[test]
fn test_toggle_closed_round_trip() {
    let mut path = DesignPath::polyline(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ]);
    let mut manager = PathEditManager::default();
    assert!(manager.toggle_closed(&mut path));
    assert!(path.closed);
    assert!(path.data().ends_with('Z'));
    assert!(manager.toggle_closed(&mut path));
    assert!(!path.closed);
    assert_eq!(path.data(), "M 0 0 L 10 0 L 10 10");

    let mut single = DesignPath::polyline(&[Point::new(0.0, 0.0)]);
    assert!(!manager.toggle_closed(&mut single));
}

#[test]
fn test_append_starts_with_move() {
    let mut path = DesignPath::new(Vec::new(), false);
    let mut manager = PathEditManager::default();
    manager.append_point(&mut path, Point::new(1.0, 2.0));
    manager.append_point(&mut path, Point::new(3.0, 4.0));
    assert_eq!(path.data(), "M 1 2 L 3 4");
}
