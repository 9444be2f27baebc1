use inkpad_designer::commands::{
    AddShape, CompositeCommand, GroupShapes, MoveShapes, RemoveShape, ResizeShape, SceneCommand,
    UngroupShapes, UpdateProperties,
};
use inkpad_designer::model::{
    Bounds, Color, DesignPath, Fill, PathPoint, Point, Shape, ShapeProperty,
};
use inkpad_designer::scene::Scene;

fn scene_with(shapes: Vec<Shape>) -> Scene {
    let mut scene = Scene::new();
    scene.replace_all(shapes);
    scene
}

fn three_rects() -> Scene {
    scene_with(vec![
        Shape::rect(1, 0.0, 0.0, 10.0, 10.0),
        Shape::rect(2, 20.0, 0.0, 10.0, 10.0),
        Shape::rect(3, 40.0, 0.0, 10.0, 10.0),
    ])
}

#[test]
fn test_remove_restores_original_index() {
    let mut scene = three_rects();
    let before = scene.shapes().to_vec();
    let mut cmd = SceneCommand::RemoveShape(RemoveShape::new(2));

    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![1, 3]);
    cmd.invert(&mut scene);
    assert_eq!(scene.shapes(), before.as_slice());
}

#[test]
fn test_add_then_invert_then_apply_keeps_shape() {
    let mut scene = three_rects();
    let mut cmd = SceneCommand::AddShape(AddShape::new(
        Shape::circle(9, Point::new(5.0, 5.0), 4.0),
        1,
    ));
    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![1, 9, 2, 3]);
    cmd.invert(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![1, 2, 3]);
    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![1, 9, 2, 3]);
}

#[test]
fn test_group_and_invert_restore_order() {
    let mut scene = three_rects();
    let before = scene.shapes().to_vec();
    let mut cmd = SceneCommand::GroupShapes(GroupShapes::new(10, vec![3, 1]));

    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![2, 10]);
    let group = scene.find(10).and_then(|s| s.as_group()).unwrap();
    let children: Vec<u64> = group.children.iter().map(|c| c.id).collect();
    assert_eq!(children, vec![1, 3]);
    assert_eq!(group.origin, Point::new(0.0, 0.0));

    cmd.invert(&mut scene);
    assert_eq!(scene.shapes(), before.as_slice());

    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![2, 10]);
}

#[test]
fn test_group_keeps_style_across_redo() {
    let mut scene = three_rects();
    let mut cmd = SceneCommand::GroupShapes(GroupShapes::new(10, vec![1, 2]));
    cmd.apply(&mut scene);
    if let Some(group) = scene.find_mut(10) {
        group.style.rotation = 30.0;
    }
    cmd.invert(&mut scene);
    cmd.apply(&mut scene);
    assert_eq!(scene.find(10).map(|s| s.rotation()), Some(30.0));
}

#[test]
fn test_ungroup_and_regroup() {
    let mut scene = three_rects();
    SceneCommand::GroupShapes(GroupShapes::new(10, vec![1, 2])).apply(&mut scene);
    let grouped = scene.shapes().to_vec();

    let mut cmd = SceneCommand::UngroupShapes(UngroupShapes::new(10));
    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![3, 1, 2]);
    cmd.invert(&mut scene);
    assert_eq!(scene.shapes(), grouped.as_slice());
}

#[test]
fn test_ungroup_of_plain_shape_is_noop() {
    let mut scene = three_rects();
    let before = scene.shapes().to_vec();
    let mut cmd = SceneCommand::UngroupShapes(UngroupShapes::new(2));
    cmd.apply(&mut scene);
    assert_eq!(scene.shapes(), before.as_slice());
}

#[test]
fn test_move_nested_group_moves_every_descendant() {
    let inner = Shape::group(
        5,
        vec![
            Shape::circle(3, Point::new(10.0, 10.0), 5.0),
            Shape::line(4, Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
        ],
    );
    let outer = Shape::group(6, vec![Shape::rect(1, 0.0, 0.0, 10.0, 10.0), inner]);
    let mut scene = scene_with(vec![outer]);

    let mut cmd = SceneCommand::MoveShapes(MoveShapes {
        ids: vec![6],
        dx: 7.0,
        dy: -3.0,
    });
    cmd.apply(&mut scene);
    assert_eq!(scene.find(1).unwrap().bounds(), Bounds::new(7.0, -3.0, 10.0, 10.0));
    assert_eq!(scene.find(3).unwrap().bounds(), Bounds::new(12.0, 2.0, 10.0, 10.0));
    assert_eq!(scene.find(4).unwrap().bounds(), Bounds::new(7.0, -3.0, 10.0, 0.0));

    cmd.invert(&mut scene);
    assert_eq!(scene.find(4).unwrap().bounds(), Bounds::new(0.0, 0.0, 10.0, 0.0));
}

#[test]
fn test_resize_group_scales_children_and_nested_path() {
    let path = DesignPath::new(
        vec![
            PathPoint::move_to(Point::new(20.0, 0.0)),
            PathPoint::cubic(
                Point::new(22.0, 2.0),
                Point::new(28.0, 8.0),
                Point::new(30.0, 10.0),
            ),
        ],
        false,
    );
    let group = Shape::group(
        9,
        vec![Shape::rect(1, 0.0, 0.0, 10.0, 10.0), Shape::path(2, path)],
    );
    let mut scene = scene_with(vec![group]);
    let before = scene.find(9).unwrap().bounds();
    assert_eq!(before, Bounds::new(0.0, 0.0, 30.0, 10.0));

    let mut cmd = SceneCommand::ResizeShape(ResizeShape::new(
        9,
        before,
        Bounds::new(0.0, 0.0, 60.0, 20.0),
    ));
    cmd.apply(&mut scene);
    assert_eq!(scene.find(1).unwrap().bounds(), Bounds::new(0.0, 0.0, 20.0, 20.0));
    let scaled = scene.find(2).and_then(|s| s.as_path()).unwrap();
    assert_eq!(scaled.data(), "M 40 0 C 44 4 56 16 60 20");

    cmd.invert(&mut scene);
    assert_eq!(scene.find(9).unwrap().bounds(), before);
    cmd.apply(&mut scene);
    assert_eq!(scene.find(9).unwrap().bounds(), Bounds::new(0.0, 0.0, 60.0, 20.0));
}

#[test]
fn test_resize_zero_height_group_is_noop() {
    let group = Shape::group(
        9,
        vec![Shape::line(1, Point::new(0.0, 0.0), Point::new(10.0, 0.0))],
    );
    let mut scene = scene_with(vec![group]);
    let original = scene.shapes().to_vec();
    let mut cmd = SceneCommand::ResizeShape(ResizeShape::new(
        9,
        Bounds::new(0.0, 0.0, 10.0, 0.0),
        Bounds::new(0.0, 0.0, 20.0, 10.0),
    ));
    cmd.apply(&mut scene);
    assert_eq!(scene.shapes(), original.as_slice());
}

#[test]
fn test_update_properties_round_trip() {
    let mut scene = three_rects();
    let red = Some(Fill::Solid(Color::rgb(255, 0, 0)));
    let mut cmd = SceneCommand::UpdateProperties(UpdateProperties {
        id: 2,
        before: vec![ShapeProperty::Fill(Some(Fill::Solid(Color::BLACK))), ShapeProperty::Rotation(0.0)],
        after: vec![ShapeProperty::Fill(red.clone()), ShapeProperty::Rotation(45.0)],
    });
    cmd.apply(&mut scene);
    let shape = scene.find(2).unwrap();
    assert_eq!(shape.style.fill, red);
    assert_eq!(shape.rotation(), 45.0);

    cmd.invert(&mut scene);
    let shape = scene.find(2).unwrap();
    assert_eq!(shape.style.fill, Some(Fill::Solid(Color::BLACK)));
    assert_eq!(shape.rotation(), 0.0);
}

#[test]
fn test_composite_inverts_in_reverse() {
    let mut scene = three_rects();
    let before = scene.shapes().to_vec();
    let mut cmd = SceneCommand::Composite(CompositeCommand::new(
        "Delete Shapes",
        vec![
            SceneCommand::RemoveShape(RemoveShape::new(1)),
            SceneCommand::RemoveShape(RemoveShape::new(3)),
        ],
    ));
    assert_eq!(cmd.name(), "Delete Shapes");
    cmd.apply(&mut scene);
    assert_eq!(scene.top_level_ids(), vec![2]);
    cmd.invert(&mut scene);
    assert_eq!(scene.shapes(), before.as_slice());
}
