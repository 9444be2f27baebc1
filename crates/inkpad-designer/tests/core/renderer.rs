use inkpad_core::EditorConfig;
use inkpad_designer::model::{
    Bounds, Color, DesignPath, Fill, Point, Shape, ShapeKind, ShapeProperty, ShapeType,
};
use inkpad_designer::surface::{RecordingSurface, SurfaceOp};
use inkpad_designer::{Alignment, FixedColor, Modifiers, Renderer, Tool};

const INK: Color = Color::rgb(10, 20, 30);

fn renderer() -> Renderer {
    let mut config = EditorConfig::default();
    config.snap.enabled = false;
    Renderer::new(config).with_color_policy(Box::new(FixedColor(INK)))
}

fn drag(r: &mut Renderer, from: (f64, f64), to: (f64, f64)) {
    drag_with(r, from, to, Modifiers::NONE);
}

fn drag_with(r: &mut Renderer, from: (f64, f64), to: (f64, f64), mods: Modifiers) {
    let mid = Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    r.pointer_down(Point::new(from.0, from.1), mods);
    r.pointer_move(mid, mods);
    r.pointer_up(Point::new(to.0, to.1), mods);
}

fn click(r: &mut Renderer, at: (f64, f64), mods: Modifiers) {
    r.pointer_down(Point::new(at.0, at.1), mods);
    r.pointer_up(Point::new(at.0, at.1), mods);
}

fn bounds_of(r: &Renderer, id: u64) -> Bounds {
    r.shape(id).map(Shape::bounds).unwrap()
}

#[test]
fn test_draw_rect_undo_redo() {
    let mut r = renderer();
    r.set_tool(Tool::Rect);
    drag(&mut r, (10.0, 10.0), (110.0, 60.0));

    assert_eq!(r.shapes().len(), 1);
    let shape = &r.shapes()[0];
    let id = shape.id;
    assert_eq!(shape.bounds(), Bounds::new(10.0, 10.0, 100.0, 50.0));
    assert_eq!(shape.style.fill, Some(Fill::Solid(INK)));
    assert_eq!(r.selection().ids(), &[id]);
    assert_eq!(r.history().labels(), vec!["Add Shape"]);

    assert!(r.undo());
    assert!(r.shapes().is_empty());
    assert!(r.selection().is_empty());
    assert!(!r.undo());

    assert!(r.redo());
    assert_eq!(r.shapes()[0].id, id);
    assert_eq!(bounds_of(&r, id), Bounds::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_drag_direction_is_normalized() {
    let mut r = renderer();
    r.set_tool(Tool::Rect);
    drag(&mut r, (110.0, 60.0), (10.0, 10.0));
    assert_eq!(r.shapes()[0].bounds(), Bounds::new(10.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_tiny_gestures_are_discarded() {
    let mut r = renderer();
    r.set_tool(Tool::Rect);
    drag(&mut r, (10.0, 10.0), (11.0, 40.0));
    r.set_tool(Tool::Line);
    drag(&mut r, (0.0, 0.0), (1.0, 1.0));
    r.set_tool(Tool::Circle);
    drag(&mut r, (5.0, 5.0), (5.5, 5.0));
    assert!(r.shapes().is_empty());
    assert!(r.history().is_empty());
}

#[test]
fn test_circle_line_and_text_tools() {
    let mut r = renderer();
    r.set_tool(Tool::Circle);
    drag(&mut r, (50.0, 50.0), (80.0, 90.0));
    r.set_tool(Tool::Line);
    drag(&mut r, (0.0, 0.0), (30.0, 40.0));
    r.set_tool(Tool::Text);
    click(&mut r, (200.0, 200.0), Modifiers::NONE);

    let types: Vec<ShapeType> = r.shapes().iter().map(Shape::shape_type).collect();
    assert_eq!(types, vec![ShapeType::Circle, ShapeType::Line, ShapeType::TextBox]);
    assert_eq!(r.shapes()[0].bounds(), Bounds::new(0.0, 0.0, 100.0, 100.0));

    let line = &r.shapes()[1];
    assert_eq!(line.style.fill, None);
    assert_eq!(line.style.stroke.map(|s| s.color), Some(INK));

    match &r.shapes()[2].kind {
        ShapeKind::TextBox(text) => {
            assert_eq!(text.text, "Text");
            assert_eq!((text.x, text.y, text.width, text.height), (200.0, 200.0, 160.0, 40.0));
        }
        other => panic!("expected text box, got {:?}", other),
    }
}

#[test]
fn test_preview_follows_drawing_gesture() {
    let mut r = renderer();
    r.set_tool(Tool::Rect);
    r.pointer_down(Point::new(0.0, 0.0), Modifiers::NONE);
    r.pointer_move(Point::new(40.0, 30.0), Modifiers::NONE);
    assert!(r.is_interacting());
    let preview = r.preview_shape().unwrap();
    assert_eq!(preview.bounds(), Bounds::new(0.0, 0.0, 40.0, 30.0));
    assert!(r.shapes().is_empty());

    r.cancel_interaction();
    assert!(!r.is_interacting());
    assert!(r.preview_shape().is_none());
    assert!(r.shapes().is_empty());
}

#[test]
fn test_snapped_drawing_lands_on_grid() {
    let mut r = Renderer::default();
    r.set_tool(Tool::Rect);
    drag(&mut r, (43.0, 57.0), (98.0, 103.0));
    assert_eq!(r.shapes()[0].bounds(), Bounds::new(40.0, 60.0, 60.0, 40.0));
}

#[test]
fn test_move_drag_records_one_command() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    drag(&mut r, (50.0, 25.0), (70.0, 35.0));

    assert_eq!(r.selection().ids(), &[id]);
    assert_eq!(bounds_of(&r, id), Bounds::new(20.0, 10.0, 100.0, 50.0));
    assert_eq!(r.history().labels(), vec!["Add Shape", "Move Shapes"]);

    assert!(r.undo());
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 100.0, 50.0));
    assert!(r.redo());
    assert_eq!(bounds_of(&r, id), Bounds::new(20.0, 10.0, 100.0, 50.0));
}

#[test]
fn test_click_without_drag_records_nothing() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    click(&mut r, (50.0, 25.0), Modifiers::NONE);
    assert_eq!(r.selection().ids(), &[id]);
    assert_eq!(r.history().len(), 1);
}

#[test]
fn test_cancel_restores_moved_shape() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    r.pointer_down(Point::new(50.0, 25.0), Modifiers::NONE);
    r.pointer_move(Point::new(80.0, 80.0), Modifiers::NONE);
    assert_eq!(bounds_of(&r, id), Bounds::new(30.0, 55.0, 100.0, 50.0));

    r.cancel_interaction();
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(r.history().len(), 1);
    assert!(!r.is_interacting());
}

#[test]
fn test_handle_resize_undo_redo() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    assert!(r.select(id));
    drag(&mut r, (100.0, 50.0), (120.0, 70.0));

    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 120.0, 70.0));
    assert_eq!(r.history().labels(), vec!["Add Shape", "Resize Shape"]);

    assert!(r.undo());
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 100.0, 50.0));
    assert!(r.redo());
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 120.0, 70.0));
}

#[test]
fn test_resize_floor_does_not_accumulate() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    r.select(id);
    r.pointer_down(Point::new(100.0, 50.0), Modifiers::NONE);
    r.pointer_move(Point::new(-200.0, -200.0), Modifiers::NONE);
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 10.0, 10.0));
    r.pointer_up(Point::new(110.0, 60.0), Modifiers::NONE);
    assert_eq!(bounds_of(&r, id), Bounds::new(0.0, 0.0, 110.0, 60.0));
}

#[test]
fn test_marquee_and_shift_toggle() {
    let mut r = renderer();
    let a = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    let b = r.add_shape(Shape::rect(0, 20.0, 0.0, 10.0, 10.0));
    let c = r.add_shape(Shape::rect(0, 200.0, 200.0, 10.0, 10.0));

    r.pointer_down(Point::new(-5.0, -5.0), Modifiers::NONE);
    r.pointer_move(Point::new(20.0, 10.0), Modifiers::NONE);
    assert_eq!(r.marquee(), Some(Bounds::new(-5.0, -5.0, 25.0, 15.0)));
    r.pointer_up(Point::new(35.0, 15.0), Modifiers::NONE);
    assert_eq!(r.selection().ids(), &[a, b]);
    assert_eq!(r.marquee(), None);

    click(&mut r, (205.0, 205.0), Modifiers::SHIFT);
    assert_eq!(r.selection().ids(), &[a, b, c]);
    click(&mut r, (5.0, 5.0), Modifiers::SHIFT);
    assert_eq!(r.selection().ids(), &[b, c]);

    click(&mut r, (500.0, 500.0), Modifiers::NONE);
    assert!(r.selection().is_empty());
    assert_eq!(r.history().len(), 3);
}

#[test]
fn test_group_and_ungroup_round_trip() {
    let mut r = renderer();
    let a = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    let b = r.add_shape(Shape::rect(0, 20.0, 0.0, 10.0, 10.0));

    r.select(a);
    assert_eq!(r.group_selected(), None);

    r.select_all();
    let group = r.group_selected().unwrap();
    assert_eq!(r.shapes().len(), 1);
    assert_eq!(r.selection().ids(), &[group]);
    assert_eq!(bounds_of(&r, group), Bounds::new(0.0, 0.0, 30.0, 10.0));

    assert!(r.undo());
    assert_eq!(r.scene().top_level_ids(), vec![a, b]);
    assert!(r.selection().is_empty());
    assert!(r.redo());
    assert_eq!(r.scene().top_level_ids(), vec![group]);

    r.select(group);
    assert!(r.ungroup_selected());
    assert_eq!(r.scene().top_level_ids(), vec![a, b]);
    assert_eq!(r.selection().ids(), &[a, b]);
    assert!(!r.ungroup_selected());

    assert!(r.undo());
    assert_eq!(r.scene().top_level_ids(), vec![group]);
}

#[test]
fn test_moving_group_moves_children() {
    let mut r = renderer();
    r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    r.add_shape(Shape::circle(0, Point::new(30.0, 5.0), 5.0));
    r.select_all();
    let group = r.group_selected().unwrap();
    // clear of the handle squares on the group's left edge
    drag(&mut r, (8.0, 5.0), (18.0, 25.0));
    assert_eq!(bounds_of(&r, group), Bounds::new(10.0, 20.0, 35.0, 10.0));
    let children = &r.shape(group).and_then(Shape::as_group).unwrap().children;
    assert_eq!(children[1].bounds(), Bounds::new(35.0, 20.0, 10.0, 10.0));
}

#[test]
fn test_delete_and_undo_restores_order() {
    let mut r = renderer();
    let a = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    let b = r.add_shape(Shape::rect(0, 20.0, 0.0, 10.0, 10.0));
    let c = r.add_shape(Shape::rect(0, 40.0, 0.0, 10.0, 10.0));
    r.select(a);
    r.toggle_selection(c);

    assert!(r.delete_selected());
    assert_eq!(r.scene().top_level_ids(), vec![b]);
    assert!(r.selection().is_empty());
    assert_eq!(r.history().labels().last(), Some(&"Delete Shapes"));
    assert!(!r.delete_selected());

    assert!(r.undo());
    assert_eq!(r.scene().top_level_ids(), vec![a, b, c]);
}

#[test]
fn test_align_is_one_undo_step() {
    let mut r = renderer();
    let a = r.add_shape(Shape::rect(0, 10.0, 0.0, 10.0, 10.0));
    let b = r.add_shape(Shape::rect(0, 30.0, 20.0, 10.0, 10.0));
    let c = r.add_shape(Shape::rect(0, 50.0, 40.0, 10.0, 10.0));
    r.select_all();

    assert!(r.align_selected(Alignment::Left));
    for id in [a, b, c] {
        assert_eq!(bounds_of(&r, id).x, 10.0);
    }
    assert_eq!(r.history().len(), 4);
    assert_eq!(r.history().labels().last(), Some(&"Align Shapes"));
    assert!(!r.align_selected(Alignment::Left));

    assert!(r.undo());
    assert_eq!(bounds_of(&r, b).x, 30.0);
    assert_eq!(bounds_of(&r, c).x, 50.0);
}

#[test]
fn test_property_updates_and_rotation() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    r.select(id);
    let red = ShapeProperty::Fill(Some(Fill::Solid(Color::rgb(255, 0, 0))));

    assert!(r.set_property_selected(red.clone()));
    assert_eq!(r.shape(id).unwrap().style.fill, Some(Fill::Solid(Color::rgb(255, 0, 0))));
    assert!(!r.set_property_selected(red));
    assert!(!r.set_property_selected(ShapeProperty::Text("nope".to_string())));

    assert!(r.rotate_selected(370.0));
    assert_eq!(r.shape(id).unwrap().rotation(), 10.0);
    assert!(r.rotate_selected_towards(Point::new(5.0, 50.0), true));
    assert_eq!(r.shape(id).unwrap().rotation(), 180.0);

    assert!(r.undo());
    assert_eq!(r.shape(id).unwrap().rotation(), 10.0);
    assert!(r.undo());
    assert_eq!(r.shape(id).unwrap().rotation(), 0.0);
}

#[test]
fn test_path_edit_session_records_on_end() {
    let mut r = renderer();
    let path = DesignPath::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let id = r.add_shape(Shape::path(0, path));

    r.double_click(Point::new(50.0, 0.0));
    assert_eq!(r.editing_path(), Some(id));
    assert_eq!(r.selection().ids(), &[id]);

    drag(&mut r, (100.0, 0.0), (100.0, 40.0));
    let data = r.shape(id).and_then(Shape::as_path).map(|p| p.data().to_string());
    assert_eq!(data.as_deref(), Some("M 0 0 L 100 40"));
    assert_eq!(r.history().len(), 1);

    assert!(r.end_path_edit());
    assert_eq!(r.editing_path(), None);
    assert_eq!(r.history().labels(), vec!["Add Shape", "Update Properties"]);

    assert!(r.undo());
    let data = r.shape(id).and_then(Shape::as_path).map(|p| p.data().to_string());
    assert_eq!(data.as_deref(), Some("M 0 0 L 100 0"));
    assert!(r.redo());
    let data = r.shape(id).and_then(Shape::as_path).map(|p| p.data().to_string());
    assert_eq!(data.as_deref(), Some("M 0 0 L 100 40"));
}

#[test]
fn test_path_point_operations_in_session() {
    let mut r = renderer();
    let path = DesignPath::polyline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    let id = r.add_shape(Shape::path(0, path));
    assert!(!r.toggle_path_closed());

    assert!(r.begin_path_edit(id));
    assert_eq!(r.insert_point(1), Some(1));
    assert!(r.toggle_path_closed());
    assert!(r.remove_point(1));
    assert!(!r.remove_point(1));

    // pressing away from the path closes the session
    click(&mut r, (300.0, 300.0), Modifiers::NONE);
    assert_eq!(r.editing_path(), None);
    let path = r.shape(id).and_then(Shape::as_path).unwrap();
    assert!(path.closed);
    assert_eq!(path.len(), 2);
    assert_eq!(r.history().len(), 2);

    let rect = r.add_shape(Shape::rect(0, 0.0, 0.0, 5.0, 5.0));
    assert!(!r.begin_path_edit(rect));
}

#[test]
fn test_pen_builds_open_and_closed_paths() {
    let mut r = renderer();
    r.set_tool(Tool::Pen);
    for p in [(0.0, 0.0), (50.0, 0.0), (50.0, 50.0)] {
        click(&mut r, p, Modifiers::NONE);
    }
    assert_eq!(r.pen_path().map(DesignPath::len), Some(3));
    assert!(r.preview_shape().is_some());
    let open = r.finish_pen().unwrap();
    let path = r.shape(open).and_then(Shape::as_path).unwrap();
    assert!(!path.closed);
    assert_eq!(path.data(), "M 0 0 L 50 0 L 50 50");
    assert_eq!(r.shape(open).unwrap().style.stroke.map(|s| s.color), Some(INK));

    for p in [(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (102.0, 102.0)] {
        click(&mut r, p, Modifiers::NONE);
    }
    assert!(r.pen_path().is_none());
    let closed = r.shapes().last().and_then(Shape::as_path).unwrap();
    assert!(closed.closed);
    assert_eq!(closed.len(), 3);
}

#[test]
fn test_pen_double_click_and_discard() {
    let mut r = renderer();
    r.set_tool(Tool::Pen);
    click(&mut r, (0.0, 0.0), Modifiers::NONE);
    click(&mut r, (60.0, 0.0), Modifiers::NONE);
    click(&mut r, (60.0, 0.0), Modifiers::NONE);
    r.double_click(Point::new(60.0, 0.0));
    let path = r.shapes().last().and_then(Shape::as_path).unwrap();
    assert_eq!(path.data(), "M 0 0 L 60 0");

    click(&mut r, (10.0, 10.0), Modifiers::NONE);
    r.set_tool(Tool::Select);
    assert!(r.pen_path().is_none());
    assert_eq!(r.shapes().len(), 1);
}

#[test]
fn test_markup_round_trip_through_renderer() {
    let mut r = renderer();
    r.set_tool(Tool::Rect);
    drag(&mut r, (10.0, 10.0), (110.0, 60.0));
    r.set_tool(Tool::Circle);
    drag(&mut r, (200.0, 200.0), (230.0, 240.0));
    r.select_all();
    r.rotate_selected(30.0);
    let markup = r.export_markup();

    let mut loaded = renderer();
    loaded.load_markup(&markup).unwrap();
    assert_eq!(loaded.shapes(), r.shapes());
    assert!(loaded.history().is_empty());
    assert_eq!(loaded.export_markup(), markup);

    loaded.set_tool(Tool::Rect);
    drag(&mut loaded, (0.0, 300.0), (20.0, 320.0));
    let max_loaded = r.shapes().iter().map(|s| s.id).max().unwrap();
    assert!(loaded.shapes().last().unwrap().id > max_loaded);
}

#[test]
fn test_failed_load_keeps_document_and_reset_clears() {
    let mut r = renderer();
    let id = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    r.select(id);

    assert!(r.load_markup("<svg><rect").is_err());
    assert_eq!(r.scene().top_level_ids(), vec![id]);
    assert_eq!(r.history().len(), 1);
    assert_eq!(r.selection().ids(), &[id]);

    r.reset();
    assert!(r.shapes().is_empty());
    assert!(r.history().is_empty());
    assert!(r.selection().is_empty());
    let next = r.add_shape(Shape::rect(0, 0.0, 0.0, 10.0, 10.0));
    assert!(next > id);
}

#[test]
fn test_render_is_balanced_and_shows_handles_for_single_selection() {
    let mut r = renderer();
    let a = r.add_shape(Shape::rect(0, 0.0, 0.0, 100.0, 50.0));
    r.add_shape(Shape::circle(0, Point::new(200.0, 200.0), 20.0));
    let is_handle = |op: &SurfaceOp| {
        matches!(op, SurfaceOp::StrokeRect(b) if b.width == 10.0 && b.height == 10.0)
    };

    r.select(a);
    let mut surface = RecordingSurface::new();
    r.render(&mut surface);
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.count(is_handle), 8);
    assert_eq!(r.transform_controls().handles().len(), 8);

    r.select_all();
    let mut surface = RecordingSurface::new();
    r.render(&mut surface);
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.count(is_handle), 0);
    assert!(surface.count(|op| matches!(op, SurfaceOp::StrokeRect(_))) >= 2);
}
