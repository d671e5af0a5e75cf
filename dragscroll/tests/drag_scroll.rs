use std::cell::RefCell;
use std::rc::Rc;

use dragscroll::{
    ConfigError, Cursor, Document, DragScroll, DragScrollConfig, DragState, Element, Event,
    EventKind, ModifierKey, Modifiers, Mounted, MouseButton, Rect, Scope, ScrollOffset, Size,
    DEFAULT_SENSITIVITY,
};

type Log = Rc<RefCell<Vec<String>>>;

/// Content wider and taller than any viewport used here, with a few
/// interactive descendants near the top-left corner:
///
/// - (0..4, 0) button "edit", (4..8, 0) link "docs"
/// - (0..10, 1..3) box with role "menu", text "menu-item" at (0..4, 1)
/// - (0..10, 3) box with a tab stop
/// - (0..10, 4) plain text "cell"
fn content() -> Element {
    Element::col()
        .id("content")
        .width(Size::Fixed(1000))
        .height(Size::Fixed(1000))
        .child(
            Element::row()
                .id("toolbar")
                .height(Size::Fixed(1))
                .child(Element::button("Edit").id("edit"))
                .child(Element::link("Docs").id("docs")),
        )
        .child(
            Element::box_()
                .id("menu")
                .role("menu")
                .width(Size::Fixed(10))
                .height(Size::Fixed(2))
                .child(Element::text("item").id("menu-item")),
        )
        .child(
            Element::box_()
                .id("focusable")
                .tab_index(0)
                .width(Size::Fixed(10))
                .height(Size::Fixed(1)),
        )
        .child(Element::text("plain cell").id("cell"))
}

struct Harness {
    doc: Document,
    viewport: Mounted,
    log: Log,
}

impl Harness {
    fn offset(&self) -> ScrollOffset {
        self.doc.scroll().get("viewport")
    }

    fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn count(&self, entry: &str) -> usize {
        self.log.borrow().iter().filter(|e| *e == entry).count()
    }
}

fn recording(config: DragScrollConfig, log: &Log) -> DragScroll {
    let (start, drag, end, modifier) = (log.clone(), log.clone(), log.clone(), log.clone());
    DragScroll::new("viewport", config)
        .unwrap()
        .on_drag_start(move |_| start.borrow_mut().push("start".to_string()))
        .on_drag(move |_| drag.borrow_mut().push("drag".to_string()))
        .on_drag_end(move || end.borrow_mut().push("end".to_string()))
        .on_modifier_drag_change(move |active| modifier.borrow_mut().push(format!("modifier:{active}")))
}

/// Viewport filling a 200x100 screen.
fn harness(config: DragScrollConfig) -> Harness {
    let log = Log::default();
    let mut doc = Document::new(Element::box_());
    let viewport = recording(config, &log).mount(&doc);

    doc.set_root(viewport.element(content()));
    doc.update_layout(Rect::from_size(200, 100));
    Harness { doc, viewport, log }
}

/// Viewport below a one-line header, 200x99 at (0, 1).
fn harness_below_header(config: DragScrollConfig) -> Harness {
    let log = Log::default();
    let mut doc = Document::new(Element::box_());
    let viewport = recording(config, &log).mount(&doc);

    doc.set_root(
        Element::col()
            .id("page")
            .width(Size::Fill)
            .height(Size::Fill)
            .child(Element::text("header").id("header").height(Size::Fixed(1)))
            .child(viewport.element(content())),
    );
    doc.update_layout(Rect::from_size(200, 100));
    Harness { doc, viewport, log }
}

fn down(x: u16, y: u16) -> Event {
    down_with(x, y, Modifiers::new())
}

fn down_with(x: u16, y: u16, modifiers: Modifiers) -> Event {
    Event::MouseDown {
        x,
        y,
        button: MouseButton::Left,
        modifiers,
    }
}

fn move_to(x: u16, y: u16) -> Event {
    move_with(x, y, Modifiers::new())
}

fn move_with(x: u16, y: u16, modifiers: Modifiers) -> Event {
    Event::MouseMove { x, y, modifiers }
}

fn up(x: u16, y: u16) -> Event {
    Event::MouseUp {
        x,
        y,
        button: MouseButton::Left,
        modifiers: Modifiers::new(),
    }
}

fn context_menu(x: u16, y: u16) -> Event {
    Event::ContextMenu {
        x,
        y,
        modifiers: Modifiers::new(),
    }
}

// ============================================================================
// Offset math
// ============================================================================

#[test]
fn test_drag_left_scrolls_right_with_gain() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down(100, 50));
    h.doc.dispatch(&move_to(40, 50));

    assert_eq!(h.offset().x, 72.0, "(100 - 40) * 1.2");
    assert_eq!(h.offset().y, 0.0, "vertical unchanged");
}

#[test]
fn test_anchor_is_relative_to_viewport_origin() {
    let mut h = harness_below_header(DragScrollConfig::new().both());

    // Page row 51 is viewport row 50.
    h.doc.dispatch(&down(100, 51));
    match h.viewport.state() {
        DragState::Dragging(session) => assert_eq!(session.anchor_pointer, (100.0, 50.0)),
        DragState::Idle => panic!("press on plain content should start a drag"),
    }

    h.doc.dispatch(&move_to(40, 21));
    assert_eq!(h.offset(), ScrollOffset::new(72.0, 36.0));
}

#[test]
fn test_offsets_are_computed_from_anchor_not_accumulated() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down(100, 50));
    h.doc.dispatch(&move_to(90, 50));
    h.doc.dispatch(&move_to(80, 50));
    h.doc.dispatch(&move_to(90, 50));

    assert_eq!(h.offset().x, 12.0);
}

#[test]
fn test_drag_starts_from_current_offset() {
    let mut h = harness(DragScrollConfig::new().both());
    h.doc.scroll_mut().set("viewport", 300.0, 200.0);

    h.doc.dispatch(&down(50, 50));
    h.doc.dispatch(&move_to(60, 40));

    assert_eq!(h.offset(), ScrollOffset::new(288.0, 212.0));
}

#[test]
fn test_offsets_clamp_to_scroll_range() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down(10, 10));
    h.doc.dispatch(&move_to(100, 90));
    assert_eq!(h.offset(), ScrollOffset::ZERO, "can't scroll before the origin");

    h.doc.dispatch(&up(100, 90));
    h.doc.scroll_mut().set("viewport", 790.0, 0.0);
    h.doc.dispatch(&down(100, 10));
    h.doc.dispatch(&move_to(0, 10));
    assert_eq!(h.offset().x, 800.0, "content 1000 wide in a 200 wide viewport");
}

#[test]
fn test_custom_sensitivity() {
    let mut h = harness(DragScrollConfig::new().both().sensitivity(2.0));

    h.doc.dispatch(&down(100, 50));
    h.doc.dispatch(&move_to(90, 45));

    assert_eq!(h.offset(), ScrollOffset::new(20.0, 10.0));
}

#[test]
fn test_default_sensitivity_is_one_point_two() {
    assert_eq!(DEFAULT_SENSITIVITY, 1.2);
    assert_eq!(DragScrollConfig::default().sensitivity, DEFAULT_SENSITIVITY);
}

#[test]
fn test_drag_continues_outside_viewport() {
    let log = Log::default();
    let mut doc = Document::new(Element::box_());
    let viewport = recording(DragScrollConfig::new().both(), &log).mount(&doc);

    // Viewport takes the 50 columns left over by the sidebar.
    doc.set_root(
        Element::row()
            .id("page")
            .width(Size::Fill)
            .height(Size::Fill)
            .child(viewport.element(content()))
            .child(
                Element::text("sidebar")
                    .id("sidebar")
                    .width(Size::Fixed(150))
                    .height(Size::Fill),
            ),
    );
    doc.update_layout(Rect::from_size(200, 100));
    assert_eq!(doc.layout().get("viewport"), Some(&Rect::new(0, 0, 50, 100)));

    doc.scroll_mut().set("viewport", 300.0, 0.0);
    doc.dispatch(&down(45, 10));
    let dispatch = doc.dispatch(&move_to(120, 10));

    assert_eq!(dispatch.target.as_deref(), Some("sidebar"));
    assert_eq!(doc.scroll().get("viewport").x, 210.0, "300 - 75 * 1.2");

    doc.dispatch(&up(150, 90));
    assert!(!viewport.is_dragging(), "release outside the viewport ends the drag");
}

// ============================================================================
// Axis enablement
// ============================================================================

#[test]
fn test_horizontal_disabled_never_moves_horizontal_offset() {
    let mut h = harness(DragScrollConfig::new().vertical(true));

    h.doc.dispatch(&down(100, 50));
    for (x, y) in [(0, 50), (199, 10), (3, 99), (150, 0)] {
        h.doc.dispatch(&move_to(x, y));
        assert_eq!(h.offset().x, 0.0);
    }
    assert!((h.offset().y - 60.0).abs() < 1e-3, "last move: (50 - 0) * 1.2");
}

#[test]
fn test_hidden_axis_ignores_programmatic_scroll() {
    let mut h = harness(DragScrollConfig::new().vertical(true));

    assert!(!h.doc.scroll_mut().set("viewport", 100.0, 0.0));
    assert_eq!(h.offset(), ScrollOffset::ZERO);
}

#[test]
fn test_no_axes_is_inert_but_valid() {
    let mut h = harness(DragScrollConfig::new().require_modifier(true));

    h.doc.dispatch(&down_with(100, 50, Modifiers::ctrl()));
    h.doc.dispatch(&move_with(10, 10, Modifiers::ctrl()));
    h.doc.dispatch(&up(10, 10));

    assert_eq!(h.offset(), ScrollOffset::ZERO);
    assert_eq!(
        h.entries(),
        vec!["modifier:true", "start", "drag", "modifier:false", "end"]
    );
}

#[test]
fn test_viewport_element_reflects_config() {
    let h = harness(DragScrollConfig::new().horizontal(true));
    let root = h.doc.root();

    assert_eq!(root.id, "viewport");
    assert_eq!(root.overflow_x, dragscroll::Overflow::Auto);
    assert_eq!(root.overflow_y, dragscroll::Overflow::Hidden);
    assert_eq!(root.user_select, dragscroll::UserSelect::None);
}

#[test]
fn test_pointer_shows_grabbing_cursor_while_dragging() {
    let mut h = harness(DragScrollConfig::new().both());
    let area = Rect::from_size(200, 100);
    assert_eq!(h.doc.cursor(), Cursor::Default, "no pointer seen yet");

    h.doc.dispatch(&move_to(100, 50));
    assert_eq!(h.doc.cursor(), Cursor::Default);

    h.doc.dispatch(&down(100, 50));
    h.doc.set_root(h.viewport.element(content()));
    h.doc.update_layout(area);
    assert_eq!(h.doc.cursor(), Cursor::Grabbing);

    h.doc.dispatch(&up(100, 50));
    h.doc.set_root(h.viewport.element(content()));
    h.doc.update_layout(area);
    assert_eq!(h.doc.cursor(), Cursor::Default);
}

#[test]
fn test_controls_keep_their_own_cursor() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&move_to(1, 0));

    assert_eq!(h.doc.cursor(), Cursor::Pointer, "button inside the viewport");
}

// ============================================================================
// Modifier gating
// ============================================================================

#[test]
fn test_modifier_required_press_without_key_never_drags() {
    let mut h = harness(DragScrollConfig::new().both().require_modifier(true));

    h.doc.dispatch(&down(100, 50));
    assert_eq!(h.viewport.state(), DragState::Idle);

    // Pressing the key after the press doesn't retroactively start a drag.
    h.doc.dispatch(&move_with(40, 50, Modifiers::ctrl()));
    assert_eq!(h.offset(), ScrollOffset::ZERO);
    assert_eq!(h.count("start"), 0);
    assert_eq!(h.count("drag"), 0);
}

#[test]
fn test_modifier_release_pauses_updates_until_pointer_up() {
    let mut h = harness(DragScrollConfig::new().both().require_modifier(true));

    h.doc.dispatch(&down_with(100, 50, Modifiers::ctrl()));
    h.doc.dispatch(&move_with(90, 50, Modifiers::ctrl()));
    assert_eq!(h.offset().x, 12.0);

    h.doc.dispatch(&move_to(50, 50));
    assert_eq!(h.offset().x, 12.0, "key released: offsets frozen");
    assert!(h.viewport.is_dragging(), "session survives the release");

    h.doc.dispatch(&move_with(80, 50, Modifiers::ctrl()));
    assert_eq!(h.offset().x, 24.0, "same anchor once the key is back");

    h.doc.dispatch(&up(80, 50));
    assert_eq!(h.viewport.state(), DragState::Idle);
}

#[test]
fn test_modifier_key_is_configurable() {
    let mut h = harness(
        DragScrollConfig::new()
            .both()
            .require_modifier(true)
            .modifier(ModifierKey::Alt),
    );

    h.doc.dispatch(&down_with(100, 50, Modifiers::ctrl()));
    assert_eq!(h.viewport.state(), DragState::Idle);

    h.doc.dispatch(&down_with(100, 50, Modifiers::alt()));
    h.doc.dispatch(&move_with(90, 50, Modifiers::alt()));
    assert_eq!(h.offset().x, 12.0);
}

#[test]
fn test_modifier_change_fires_on_edges_only() {
    let mut h = harness(DragScrollConfig::new().both().require_modifier(true));
    let ctrl = Modifiers::ctrl();

    h.doc.dispatch(&down_with(100, 50, ctrl));
    h.doc.dispatch(&move_with(99, 50, ctrl));
    h.doc.dispatch(&move_with(98, 50, ctrl));
    h.doc.dispatch(&move_with(97, 50, ctrl));
    assert_eq!(h.count("modifier:true"), 1);

    h.doc.dispatch(&move_to(96, 50));
    h.doc.dispatch(&move_to(95, 50));
    assert_eq!(h.count("modifier:false"), 1);

    h.doc.dispatch(&move_with(94, 50, ctrl));
    assert_eq!(h.count("modifier:true"), 2);
    assert!(h.viewport.handle().is_modifier_dragging());

    h.doc.dispatch(&up(94, 50));
    assert_eq!(h.count("modifier:false"), 2, "final false on release");
    assert!(!h.viewport.handle().is_modifier_dragging());
}

#[test]
fn test_no_extra_false_on_release_when_already_false() {
    let mut h = harness(DragScrollConfig::new().both().require_modifier(true));

    h.doc.dispatch(&down_with(100, 50, Modifiers::ctrl()));
    h.doc.dispatch(&move_to(90, 50));
    h.doc.dispatch(&up(90, 50));

    assert_eq!(
        h.entries(),
        vec!["modifier:true", "start", "modifier:false", "end"]
    );
}

#[test]
fn test_ungated_drag_never_reports_modifier_changes() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down_with(100, 50, Modifiers::ctrl()));
    h.doc.dispatch(&move_to(90, 50));
    h.doc.dispatch(&move_with(80, 50, Modifiers::ctrl()));
    h.doc.dispatch(&up(80, 50));

    assert_eq!(h.entries(), vec!["start", "drag", "drag", "end"]);
}

// ============================================================================
// Interactive element guard
// ============================================================================

#[test]
fn test_press_on_button_never_starts_drag() {
    let mut h = harness(DragScrollConfig::new().both().require_modifier(true));

    let dispatch = h.doc.dispatch(&down_with(1, 0, Modifiers::ctrl()));
    assert_eq!(dispatch.target.as_deref(), Some("edit"));
    assert!(!dispatch.default_prevented, "the button gets its click");
    assert_eq!(h.viewport.state(), DragState::Idle);

    h.doc.dispatch(&move_with(150, 90, Modifiers::ctrl()));
    assert_eq!(h.offset(), ScrollOffset::ZERO);
    assert_eq!(h.count("start"), 0);
    assert_eq!(h.count("drag"), 0);
}

#[test]
fn test_links_roles_and_tab_stops_are_interactive() {
    // (5, 0) link, (1, 1) text inside role="menu", (1, 3) tab stop
    for (x, y) in [(5, 0), (1, 1), (1, 3)] {
        let mut h = harness(DragScrollConfig::new().both());
        h.doc.dispatch(&down(x, y));
        assert_eq!(h.viewport.state(), DragState::Idle, "press at ({x}, {y})");
    }
}

#[test]
fn test_plain_text_inside_viewport_drags() {
    let mut h = harness(DragScrollConfig::new().both());

    let dispatch = h.doc.dispatch(&down(1, 4));
    assert_eq!(dispatch.target.as_deref(), Some("cell"));
    assert!(dispatch.default_prevented);
    assert!(h.viewport.is_dragging());
}

#[test]
fn test_guard_resets_for_next_gesture() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down(1, 0));
    h.doc.dispatch(&up(1, 0));

    h.doc.dispatch(&down(100, 50));
    h.doc.dispatch(&move_to(90, 50));
    assert_eq!(h.offset().x, 12.0);
}

// ============================================================================
// Buttons, release, context menu
// ============================================================================

#[test]
fn test_secondary_button_does_not_start_drag() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&Event::MouseDown {
        x: 100,
        y: 50,
        button: MouseButton::Right,
        modifiers: Modifiers::new(),
    });

    assert_eq!(h.viewport.state(), DragState::Idle);
}

#[test]
fn test_release_without_session_fires_drag_end_only() {
    let mut h = harness(DragScrollConfig::new().both());
    h.doc.scroll_mut().set("viewport", 10.0, 20.0);

    h.doc.dispatch(&up(100, 50));
    h.doc.dispatch(&up(100, 50));

    assert_eq!(h.entries(), vec!["end", "end"]);
    assert_eq!(h.offset(), ScrollOffset::new(10.0, 20.0));
}

#[test]
fn test_callbacks_fire_in_gesture_order() {
    let mut h = harness(DragScrollConfig::new().both());

    h.doc.dispatch(&down(100, 50));
    h.doc.dispatch(&move_to(90, 50));
    h.doc.dispatch(&move_to(80, 50));
    h.doc.dispatch(&up(80, 50));

    assert_eq!(h.entries(), vec!["start", "drag", "drag", "end"]);
}

#[test]
fn test_context_menu_suppressed_only_while_dragging() {
    let mut h = harness(DragScrollConfig::new().both());

    assert!(!h.doc.dispatch(&context_menu(100, 50)).default_prevented);

    h.doc.dispatch(&down(100, 50));
    assert!(h.doc.dispatch(&context_menu(100, 50)).default_prevented);

    h.doc.dispatch(&up(100, 50));
    assert!(!h.doc.dispatch(&context_menu(100, 50)).default_prevented);
}

#[test]
fn test_drag_press_suppresses_text_selection() {
    let mut h = harness_below_header(DragScrollConfig::new().both());

    h.doc.dispatch(&down(2, 0));
    assert!(h.doc.selection().is_some(), "header text outside the viewport is selectable");
    h.doc.dispatch(&up(2, 0));

    h.doc.dispatch(&down(2, 5));
    assert!(h.doc.selection().is_none());
}

// ============================================================================
// Handle and lifecycle
// ============================================================================

#[test]
fn test_reset_moves_both_axes_to_origin() {
    let mut h = harness(DragScrollConfig::new().both());
    h.doc.scroll_mut().set("viewport", 300.0, 200.0);
    let handle = h.viewport.handle();

    assert!(handle.reset_position(&mut h.doc));
    assert_eq!(h.offset(), ScrollOffset::ZERO);

    assert!(!handle.reset_position(&mut h.doc), "already at the origin");
    assert_eq!(h.offset(), ScrollOffset::ZERO);
}

#[test]
fn test_reset_ignores_axis_enablement() {
    let mut h = harness(DragScrollConfig::new().vertical(true));
    h.doc.scroll_mut().set("viewport", 0.0, 40.0);

    h.viewport.handle().reset_position(&mut h.doc);
    assert_eq!(h.offset(), ScrollOffset::ZERO);
}

#[test]
fn test_handle_before_mount_is_inert() {
    let mut doc = Document::new(Element::box_().id("viewport"));
    let component = DragScroll::new("viewport", DragScrollConfig::new().both()).unwrap();
    let handle = component.handle();

    assert!(!handle.is_mounted());
    assert!(!handle.reset_position(&mut doc));
    assert!(!handle.is_modifier_dragging());
}

#[test]
fn test_unmount_detaches_listeners_and_handles() {
    let mut h = harness(DragScrollConfig::new().both());
    let handle = h.viewport.handle();
    assert_eq!(h.doc.listeners().len(), 4);
    assert_eq!(h.doc.listeners().count(&Scope::Document, EventKind::MouseMove), 1);
    assert_eq!(
        h.doc
            .listeners()
            .count(&Scope::Element("viewport".to_string()), EventKind::MouseDown),
        1
    );

    h.doc.scroll_mut().set("viewport", 50.0, 50.0);
    let Harness { mut doc, viewport, log } = h;
    drop(viewport);

    assert!(doc.listeners().is_empty());
    assert!(!handle.is_mounted());
    assert!(!handle.reset_position(&mut doc));
    assert_eq!(doc.scroll().get("viewport"), ScrollOffset::new(50.0, 50.0));

    doc.dispatch(&down(100, 50));
    doc.dispatch(&up(100, 50));
    assert!(log.borrow().is_empty(), "no callbacks after unmount");
}

#[test]
fn test_remount_does_not_leak_listeners() {
    let mut doc = Document::new(Element::box_());

    for _ in 0..3 {
        let viewport = DragScroll::new("viewport", DragScrollConfig::new().both())
            .unwrap()
            .mount(&doc);
        doc.set_root(viewport.element(content()));
        assert_eq!(doc.listeners().len(), 4);
    }

    assert!(doc.listeners().is_empty());
}

#[test]
fn test_missing_viewport_is_a_no_op() {
    let log = Log::default();
    let mut doc = Document::new(Element::box_().id("elsewhere").width(Size::Fill).height(Size::Fill));
    let viewport = recording(DragScrollConfig::new().both(), &log).mount(&doc);
    doc.update_layout(Rect::from_size(200, 100));

    doc.dispatch(&down(100, 50));
    doc.dispatch(&move_to(40, 50));
    assert_eq!(viewport.state(), DragState::Idle);
    assert!(!viewport.handle().reset_position(&mut doc));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_invalid_sensitivity_rejected() {
    let err = DragScroll::new("viewport", DragScrollConfig::new().sensitivity(0.0)).unwrap_err();
    assert_eq!(err, ConfigError::InvalidSensitivity(0.0));

    let err = DragScroll::new("viewport", DragScrollConfig::new().sensitivity(f32::NAN)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSensitivity(s) if s.is_nan()));

    assert!(DragScrollConfig::new().sensitivity(-1.0).validate().is_err());
    assert!(DragScrollConfig::new().sensitivity(0.5).validate().is_ok());
}

#[test]
fn test_modifier_policy() {
    let gated = DragScrollConfig::new().require_modifier(true);
    assert!(!gated.allows(Modifiers::new()));
    assert!(gated.allows(Modifiers::ctrl()));
    assert!(!gated.allows(Modifiers::shift()));

    let open = DragScrollConfig::new();
    assert!(open.allows(Modifiers::new()));
    assert!(open.allows(Modifiers::alt()));
}
