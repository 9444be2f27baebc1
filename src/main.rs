use inkpad::{
    init_logging, Alignment, Color, DesignPath, EditorConfig, Fill, Modifiers, PathPoint, Point,
    Renderer, Shape, ShapeProperty, Tool, BUILD_DATE, VERSION,
};

/// Draws a small sample scene through the interactive API and writes its
/// markup to stdout.
fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("inkpad {} (built {})", VERSION, BUILD_DATE);

    let config = match std::env::var("INKPAD_CONFIG") {
        Ok(json) => EditorConfig::from_json(&json)?,
        Err(_) => EditorConfig::default(),
    };
    let mut renderer = Renderer::new(config);

    renderer.set_tool(Tool::Rect);
    drag(&mut renderer, Point::new(40.0, 40.0), Point::new(200.0, 140.0));
    renderer.set_tool(Tool::Circle);
    drag(&mut renderer, Point::new(320.0, 100.0), Point::new(380.0, 100.0));
    renderer.set_tool(Tool::Line);
    drag(&mut renderer, Point::new(40.0, 220.0), Point::new(420.0, 220.0));

    let wave = DesignPath::new(
        vec![
            PathPoint::move_to(Point::new(40.0, 320.0)),
            PathPoint::cubic(
                Point::new(120.0, 240.0),
                Point::new(200.0, 400.0),
                Point::new(280.0, 320.0),
            ),
        ],
        false,
    );
    renderer.add_shape(Shape::path(0, wave));

    renderer.set_tool(Tool::Select);
    renderer.select_all();
    renderer.align_selected(Alignment::Left);
    renderer.set_property_selected(ShapeProperty::Fill(Some(Fill::Solid(Color::rgb(
        0x34, 0x98, 0xdb,
    )))));
    if let Some(group) = renderer.group_selected() {
        tracing::info!("Grouped the sample shapes as {}", group);
    }
    renderer.rotate_selected(15.0);

    let markup = renderer.export_markup();
    let mut check = Renderer::default();
    check.load_markup(&markup)?;
    tracing::info!(
        "Round trip kept {} top-level shape(s); history has {} entries",
        check.shapes().len(),
        renderer.history().len()
    );

    println!("{}", markup);
    Ok(())
}

fn drag(renderer: &mut Renderer, from: Point, to: Point) {
    renderer.pointer_down(from, Modifiers::NONE);
    renderer.pointer_move(to, Modifiers::NONE);
    renderer.pointer_up(to, Modifiers::NONE);
}
