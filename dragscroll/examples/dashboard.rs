//! Modifier-gated panning over a grid of panels.
//!
//! `cargo run --example dashboard -- shift` picks the modifier (ctrl by default).

use std::cell::Cell;
use std::fs::File;
use std::io;
use std::rc::Rc;

use dragscroll::{
    Border, Color, Document, DragScroll, DragScrollConfig, DragScrollHandle, Element, Event, Key,
    ModifierKey, MouseButton, Size, Style, Terminal,
};
use simplelog::{Config, LevelFilter, WriteLogger};

const VIEWPORT: &str = "board";
const GRID_COLS: usize = 5;
const GRID_ROWS: usize = 4;
const PANEL_WIDTH: u16 = 34;
const PANEL_HEIGHT: u16 = 9;

const METRICS: [(&str, &str); 8] = [
    ("Requests", "12.4k/min"),
    ("Latency p95", "184 ms"),
    ("Error rate", "0.42 %"),
    ("Queue depth", "37"),
    ("CPU", "63 %"),
    ("Memory", "5.1 GiB"),
    ("Cache hits", "91.8 %"),
    ("Deploys", "3 today"),
];

/// What the status line shows.
#[derive(Default)]
struct Status {
    /// Edges reported by the modifier callback.
    modifier_edges: Rc<Cell<u32>>,
    context_menu: Option<(u16, u16)>,
}

fn main() -> io::Result<()> {
    match File::create("dashboard.log") {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("logging disabled: {e}"),
    }

    let modifier = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<ModifierKey>().map_err(io::Error::other)?,
        None => ModifierKey::default(),
    };

    let mut status = Status::default();
    let edges = Rc::clone(&status.modifier_edges);

    let config = DragScrollConfig::new()
        .both()
        .require_modifier(true)
        .modifier(modifier);
    let mut doc = Document::new(Element::box_());
    let board = DragScroll::new(VIEWPORT, config)
        .map_err(io::Error::other)?
        .on_modifier_drag_change(move |active| {
            edges.set(edges.get() + 1);
            log::info!("modifier drag {}", if active { "on" } else { "off" });
        })
        .on_drag_end(|| log::debug!("board released"))
        .mount(&doc);
    let handle = board.handle();

    let mut term = Terminal::new()?;

    loop {
        let root = ui(board.element(panels()), &handle, &doc, modifier, &status);
        doc.set_root(root);
        term.draw(&mut doc)?;

        for event in term.poll(None)? {
            match event {
                Event::Key {
                    key: Key::Char('q') | Key::Escape,
                    ..
                } => return Ok(()),
                Event::Key {
                    key: Key::Char('r'),
                    ..
                } => {
                    handle.reset_position(&mut doc);
                    continue;
                }
                _ => {}
            }

            let dispatch = doc.dispatch(&event);
            match event {
                Event::MouseDown {
                    button: MouseButton::Left,
                    ..
                } => {
                    status.context_menu = None;
                    if dispatch.target.as_deref() == Some("reset") {
                        handle.reset_position(&mut doc);
                    }
                }
                Event::ContextMenu { x, y, .. } if !dispatch.default_prevented => {
                    status.context_menu = Some((x, y));
                }
                _ => {}
            }
        }
    }
}

fn ui(
    board: Element,
    handle: &DragScrollHandle,
    doc: &Document,
    modifier: ModifierKey,
    status: &Status,
) -> Element {
    let offset = doc.scroll().get(VIEWPORT);
    let (indicator, indicator_color) = if handle.is_modifier_dragging() {
        (format!(" PANNING ({modifier}) "), Color::oklch(0.75, 0.15, 145.0))
    } else {
        (format!(" hold {modifier} + drag to pan "), Color::oklch(0.45, 0.02, 250.0))
    };

    let toolbar = Element::row()
        .id("toolbar")
        .height(Size::Fixed(1))
        .gap(2)
        .child(Element::text(" Operations").style(Style::new().bold()))
        .child(
            Element::button("[ Reset view ]")
                .id("reset")
                .style(Style::new().foreground(Color::oklch(0.8, 0.12, 250.0))),
        )
        .child(
            Element::text(indicator)
                .id("indicator")
                .style(Style::new().background(indicator_color).bold()),
        );

    let mut footer = format!(
        " offset ({:.0}, {:.0})  edges {}  r resets, q quits",
        offset.x,
        offset.y,
        status.modifier_edges.get()
    );
    if let Some((x, y)) = status.context_menu {
        footer.push_str(&format!("  context menu at ({x}, {y})"));
    }

    Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(toolbar)
        .child(
            Element::col()
                .id("frame")
                .width(Size::Fill)
                .height(Size::Fill)
                .style(Style::new().border(Border::Single))
                .child(board),
        )
        .child(Element::text(footer).height(Size::Fixed(1)).style(Style::new().dim()))
}

fn panels() -> Element {
    Element::col()
        .id("grid")
        .gap(1)
        .children((0..GRID_ROWS).map(|r| {
            Element::row()
                .gap(2)
                .children((0..GRID_COLS).map(move |c| panel(r * GRID_COLS + c)))
        }))
}

fn panel(n: usize) -> Element {
    let (title, value) = METRICS[n % METRICS.len()];
    let hue = (n as f32 * 47.0) % 360.0;
    let accent = Color::oklch(0.72, 0.1, hue);

    Element::col()
        .width(Size::Fixed(PANEL_WIDTH))
        .height(Size::Fixed(PANEL_HEIGHT))
        .style(Style::new().border(Border::Rounded).foreground(accent.clone()))
        .child(Element::text(format!(" {title} · node {}", n + 1)).style(Style::new().bold()))
        .child(Element::text(format!(" {value}")))
        .child(Element::text(sparkline(n)).style(Style::new().foreground(accent.darken(0.15))))
        .child(Element::link(" details →"))
        .child(
            Element::row()
                .gap(1)
                .child(Element::text(" "))
                .child(Element::button("[ Ack ]"))
                .child(Element::button("[ Mute ]")),
        )
}

fn sparkline(seed: usize) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let mut v = (seed as u32 + 1).wrapping_mul(2654435761);
    let mut line = String::from(" ");
    for _ in 0..(PANEL_WIDTH - 4) {
        v ^= v << 13;
        v ^= v >> 17;
        v ^= v << 5;
        line.push(BARS[(v % 8) as usize]);
    }
    line
}
