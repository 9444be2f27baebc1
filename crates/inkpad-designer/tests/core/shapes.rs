use inkpad_designer::model::{Bounds, DesignPath, Point, Shape, ShapeStyle, ShapeType};
use inkpad_designer::scene::Scene;
use inkpad_designer::surface::GeometryHitTester;
use inkpad_designer::Color;

fn square_path() -> DesignPath {
    let mut path = DesignPath::polyline(&[
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);
    assert!(path.close());
    path
}

#[test]
fn test_rect_and_text_hit_their_box() {
    let rect = Shape::rect(1, 10.0, 10.0, 50.0, 20.0);
    assert!(rect.contains_point(Point::new(10.0, 10.0)));
    assert!(rect.contains_point(Point::new(60.0, 30.0)));
    assert!(!rect.contains_point(Point::new(61.0, 30.0)));

    let text = Shape::text_box(2, 0.0, 0.0, 160.0, 40.0, "hello");
    assert!(text.contains_point(Point::new(150.0, 35.0)));
    assert!(!text.contains_point(Point::new(150.0, 45.0)));
}

#[test]
fn test_circle_hit_includes_rim() {
    let circle = Shape::circle(1, Point::new(0.0, 0.0), 10.0);
    assert!(circle.contains_point(Point::new(6.0, 8.0)));
    assert!(!circle.contains_point(Point::new(8.0, 8.0)));
}

#[test]
fn test_line_hit_uses_stroke_width_plus_tolerance() {
    let line = Shape::line(1, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    assert!(line.contains_point(Point::new(50.0, 6.0)));
    assert!(!line.contains_point(Point::new(50.0, 8.0)));

    let tight = GeometryHitTester::new(0.0);
    assert!(!line.contains_point_with(Point::new(50.0, 3.0), &tight));
    assert!(line.contains_point_with(Point::new(50.0, 2.0), &tight));
}

#[test]
fn test_path_hit_checks_fill_and_stroke() {
    let closed = Shape::path(1, square_path());
    // the interior counts even though the path carries no fill
    assert_eq!(closed.style.fill, None);
    assert!(closed.contains_point(Point::new(50.0, 50.0)));
    assert!(closed.contains_point(Point::new(102.0, 50.0)));
    assert!(!closed.contains_point(Point::new(150.0, 50.0)));

    let open = Shape::path(2, DesignPath::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]));
    assert!(open.contains_point(Point::new(50.0, 3.0)));
    assert!(!open.contains_point(Point::new(50.0, 10.0)));
}

#[test]
fn test_rotated_rect_hit_uses_local_frame() {
    let mut rect = Shape::rect(1, 0.0, 0.0, 100.0, 20.0);
    assert!(!rect.contains_point(Point::new(50.0, 50.0)));
    rect.style.rotation = 90.0;
    assert!(rect.contains_point(Point::new(50.0, 50.0)));
    assert!(!rect.contains_point(Point::new(90.0, 10.0)));
}

#[test]
fn test_group_hits_any_child() {
    let group = Shape::group(
        3,
        vec![
            Shape::rect(1, 0.0, 0.0, 10.0, 10.0),
            Shape::circle(2, Point::new(50.0, 50.0), 5.0),
        ],
    );
    assert!(group.contains_point(Point::new(5.0, 5.0)));
    assert!(group.contains_point(Point::new(50.0, 52.0)));
    assert!(!group.contains_point(Point::new(30.0, 30.0)));
}

#[test]
fn test_path_bounds_read_literal_coordinates() {
    let path = DesignPath::from_data("M 0 0 C 0 -10 40 -10 50 0").unwrap();
    assert_eq!(path.len(), 2);
    let shape = Shape::path(1, path);
    assert_eq!(shape.bounds(), Bounds::new(0.0, -10.0, 50.0, 10.0));
}

#[test]
fn test_group_bounds_is_union_of_children() {
    let group = Shape::group(
        3,
        vec![
            Shape::rect(1, 10.0, 10.0, 10.0, 10.0),
            Shape::line(2, Point::new(40.0, 5.0), Point::new(30.0, 25.0)),
        ],
    );
    assert_eq!(group.bounds(), Bounds::new(10.0, 5.0, 30.0, 20.0));
    assert_eq!(group.anchor(), Point::new(10.0, 5.0));
    assert_eq!(group.shape_type(), ShapeType::Group);
}

#[test]
fn test_empty_group_has_zero_bounds() {
    let group = Shape::group(1, Vec::new());
    assert_eq!(group.bounds(), Bounds::new(0.0, 0.0, 0.0, 0.0));
    assert!(!group.contains_point(Point::new(0.0, 0.0)));
}

#[test]
fn test_rotation_emits_transform_attribute() {
    let mut rect = Shape::rect(7, 0.0, 0.0, 10.0, 10.0);
    assert_eq!(rect.transform_attribute(), "");
    rect.style.rotation = 45.0;
    assert_eq!(rect.transform_attribute(), r#" transform="rotate(45, 5, 5)""#);
    let markup = rect.to_markup();
    assert!(markup.starts_with(r#"<rect x="0" y="0" width="10" height="10" id="shape-7""#));
    assert!(markup.contains(r#"transform="rotate(45, 5, 5)""#));
}

#[test]
fn test_group_markup_nests_children() {
    let group = Shape::group(
        3,
        vec![
            Shape::rect(1, 0.0, 0.0, 10.0, 10.0),
            Shape::circle(2, Point::new(5.0, 5.0), 2.0),
        ],
    );
    let markup = group.to_markup();
    assert!(markup.starts_with(r#"<g id="shape-3">"#));
    assert!(markup.ends_with("</g>"));
    let rect_at = markup.find("<rect").unwrap();
    let circle_at = markup.find("<circle").unwrap();
    assert!(rect_at < circle_at);
}

#[test]
fn test_circle_fit_uses_smaller_half_extent() {
    let mut circle = Shape::circle(1, Point::new(10.0, 10.0), 10.0);
    let from = circle.bounds();
    assert!(circle.fit_bounds(&from, &Bounds::new(0.0, 0.0, 40.0, 20.0)));
    assert_eq!(circle.bounds(), Bounds::new(10.0, 0.0, 20.0, 20.0));
}

#[test]
fn test_scene_hit_test_returns_topmost_top_level_shape() {
    let mut scene = Scene::new();
    scene.replace_all(vec![
        Shape::rect(1, 0.0, 0.0, 100.0, 100.0),
        Shape::group(4, vec![Shape::rect(2, 40.0, 40.0, 20.0, 20.0)]),
        Shape::rect(3, 200.0, 200.0, 10.0, 10.0).with_style(ShapeStyle::filled(Color::WHITE)),
    ]);
    let hit = GeometryHitTester::default();
    assert_eq!(scene.hit_test(Point::new(50.0, 50.0), &hit), Some(4));
    assert_eq!(scene.hit_test(Point::new(10.0, 10.0), &hit), Some(1));
    assert_eq!(scene.hit_test(Point::new(150.0, 150.0), &hit), None);
}
