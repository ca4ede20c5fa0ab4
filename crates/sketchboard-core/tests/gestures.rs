//! End-to-end gesture sequences driven through the public event API.

use kurbo::{Point, Size, Vec2};
use sketchboard_core::{
    Canvas, Command, EventOutcome, KeyEvent, Modifiers, PointerEvent, ShapeKind, ToolKind,
    bounding_box,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn drag(canvas: &mut Canvas, from: Point, to: Point, steps: usize) -> EventOutcome {
    canvas.handle_pointer_event(PointerEvent::Down { position: from });
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        canvas.handle_pointer_event(PointerEvent::Move {
            position: from.lerp(to, t),
        });
    }
    canvas.handle_pointer_event(PointerEvent::Up { position: to })
}

#[test]
fn test_draw_every_kind_and_undo_all() {
    init_logging();
    let mut canvas = Canvas::new();
    let tools = [
        (ToolKind::Line, ShapeKind::Line),
        (ToolKind::Rectangle, ShapeKind::Rectangle),
        (ToolKind::Circle, ShapeKind::Circle),
        (ToolKind::Triangle, ShapeKind::Triangle),
        (ToolKind::Freehand, ShapeKind::Freehand),
    ];
    for (i, (tool, _)) in tools.iter().enumerate() {
        canvas.execute(Command::SetTool(*tool));
        let y = i as f64 * 100.0;
        let outcome = drag(&mut canvas, Point::new(0.0, y), Point::new(80.0, y + 60.0), 4);
        assert_eq!(outcome, EventOutcome::Committed);
    }

    let kinds: Vec<_> = canvas.shapes().iter().map(|s| s.kind).collect();
    let expected: Vec<_> = tools.iter().map(|(_, kind)| *kind).collect();
    assert_eq!(kinds, expected);
    assert!(canvas.shapes().iter().all(|s| s.is_complete()));
    assert_eq!(canvas.history().len(), tools.len() + 1);

    // Freehand keeps every distinct pointer sample.
    assert_eq!(canvas.shapes()[4].points.len(), 5);

    while canvas.can_undo() {
        canvas.execute(Command::Undo);
    }
    assert!(canvas.shapes().is_empty());
    assert_eq!(canvas.history().index(), 0);
}

#[test]
fn test_new_commit_discards_redo_branch() {
    init_logging();
    let mut canvas = Canvas::new();
    canvas.set_tool(ToolKind::Line);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1);
    drag(&mut canvas, Point::new(0.0, 20.0), Point::new(10.0, 20.0), 1);
    canvas.undo();
    assert!(canvas.can_redo());

    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Point::new(50.0, 50.0), Point::new(60.0, 60.0), 1);
    assert!(!canvas.can_redo());
    assert_eq!(canvas.history().len(), 3);
    let kinds: Vec<_> = canvas.shapes().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ShapeKind::Line, ShapeKind::Rectangle]);
}

#[test]
fn test_move_then_undo_restores_position() {
    init_logging();
    let mut canvas = Canvas::new();
    canvas.set_tool(ToolKind::Circle);
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(130.0, 100.0), 3);
    let id = canvas.shapes()[0].id();
    let before = bounding_box(&canvas.shapes()[0]);

    canvas.set_tool(ToolKind::Select);
    // Grab the circle on its outline.
    let outcome = drag(&mut canvas, Point::new(130.0, 100.0), Point::new(180.0, 140.0), 8);
    assert_eq!(outcome, EventOutcome::Committed);
    let after = bounding_box(canvas.shape(id).unwrap());
    assert!((after.x0 - before.x0 - 50.0).abs() < 1e-9);
    assert!((after.y0 - before.y0 - 40.0).abs() < 1e-9);

    canvas.handle_key(&KeyEvent::new("z", Modifiers::CTRL));
    assert_eq!(bounding_box(canvas.shape(id).unwrap()), before);
    // Still selected: the shape exists in the restored snapshot.
    assert!(canvas.is_selected(id));
}

#[test]
fn test_drawing_after_pan_and_zoom_lands_in_world_space() {
    init_logging();
    let mut canvas = Canvas::new();
    canvas.handle_key(&KeyEvent::plain("h"));
    assert_eq!(canvas.tool(), ToolKind::Pan);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(40.0, 20.0), 2);
    assert_eq!(canvas.offset(), Vec2::new(40.0, 20.0));
    canvas.handle_key(&KeyEvent::plain("="));
    let zoom = canvas.zoom();
    assert!((zoom - 1.2).abs() < 1e-12);

    canvas.handle_key(&KeyEvent::plain("L"));
    let screen_a = Point::new(100.0, 80.0);
    let screen_b = Point::new(220.0, 80.0);
    drag(&mut canvas, screen_a, screen_b, 2);

    let line = &canvas.shapes()[0];
    let expected_a = canvas.camera().screen_to_world(screen_a);
    let expected_b = canvas.camera().screen_to_world(screen_b);
    assert!((line.points[0] - expected_a).hypot() < 1e-9);
    assert!((line.points[1] - expected_b).hypot() < 1e-9);
    assert!((canvas.camera().world_to_screen(line.points[1]) - screen_b).hypot() < 1e-9);

    // The grid follows the pan offset.
    let grid = canvas.grid_lines(Size::new(200.0, 100.0));
    assert!((grid.spacing - 20.0 * zoom).abs() < 1e-9);
    assert!(!grid.vertical.is_empty());
    assert!(!grid.horizontal.is_empty());
}

#[test]
fn test_pointer_leave_finishes_drawing() {
    init_logging();
    let mut canvas = Canvas::new();
    canvas.set_tool(ToolKind::Freehand);
    canvas.handle_pointer_event(PointerEvent::Down {
        position: Point::new(0.0, 0.0),
    });
    canvas.handle_pointer_event(PointerEvent::Move {
        position: Point::new(5.0, 5.0),
    });
    assert_eq!(
        canvas.handle_pointer_event(PointerEvent::Leave),
        EventOutcome::Committed
    );
    assert_eq!(canvas.shapes()[0].points, vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
    assert!(!canvas.state().is_active());
    assert_eq!(canvas.handle_pointer_event(PointerEvent::Leave), EventOutcome::Ignored);
}

#[test]
fn test_delete_undo_redo_cycle() {
    init_logging();
    let mut canvas = Canvas::new();
    canvas.set_tool(ToolKind::Rectangle);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(50.0, 50.0), 1);
    canvas.set_tool(ToolKind::Select);
    drag(&mut canvas, Point::new(25.0, 25.0), Point::new(25.0, 25.0), 0);
    assert!(canvas.selected().is_some());

    assert_eq!(canvas.execute(Command::DeleteSelected), EventOutcome::Committed);
    assert!(canvas.shapes().is_empty());
    canvas.execute(Command::Undo);
    assert_eq!(canvas.shapes().len(), 1);
    canvas.handle_key(&KeyEvent::new("y", Modifiers::CTRL));
    assert!(canvas.shapes().is_empty());
}
