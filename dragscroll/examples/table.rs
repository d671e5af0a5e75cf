use std::fs::File;
use std::io;

use dragscroll::{
    Border, Color, Document, DragScroll, DragScrollConfig, Element, Event, Key, MouseButton,
    Mounted, Size, Style, Terminal,
};
use simplelog::{Config, LevelFilter, WriteLogger};

const VIEWPORT: &str = "table";
const ROWS_PER_PAGE: usize = 25;
const TOTAL_ROWS: usize = 180;

const ROLES: [&str; 4] = ["Admin", "Editor", "Viewer", "Billing"];
const STATUSES: [&str; 3] = ["Active", "Invited", "Suspended"];
const CITIES: [&str; 6] = ["Lisbon", "Osaka", "Montreal", "Nairobi", "Tallinn", "Recife"];

/// (header, width) per column; wide enough that the table overflows most terminals.
const COLUMNS: [(&str, u16); 9] = [
    ("#", 6),
    ("Name", 20),
    ("Email", 30),
    ("City", 12),
    ("Role", 12),
    ("Status", 12),
    ("Quota", 10),
    ("Notes", 32),
    ("", 10),
];

fn main() -> io::Result<()> {
    // The terminal owns stdout; log to a file.
    match File::create("table.log") {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("logging disabled: {e}"),
    }

    let mut doc = Document::new(Element::box_());
    let table = DragScroll::new(VIEWPORT, DragScrollConfig::new().both())
        .map_err(io::Error::other)?
        .on_drag_start(|_| log::info!("table drag started"))
        .on_drag_end(|| log::info!("table drag ended"))
        .mount(&doc);
    let handle = table.handle();

    let mut term = Terminal::new()?;
    let mut page = 0;

    loop {
        let root = ui(&table, &doc, page);
        doc.set_root(root);
        term.draw(&mut doc)?;

        for event in term.poll(None)? {
            if let Event::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } = event
            {
                return Ok(());
            }

            let dispatch = doc.dispatch(&event);
            let Event::MouseDown {
                button: MouseButton::Left,
                ..
            } = event
            else {
                continue;
            };

            let next = match dispatch.target.as_deref() {
                Some("prev") => page.saturating_sub(1),
                Some("next") => (page + 1).min(page_count() - 1),
                _ => page,
            };
            if next != page {
                log::info!("page {} -> {}", page + 1, next + 1);
                page = next;
                handle.reset_position(&mut doc);
            }
        }
    }
}

fn page_count() -> usize {
    TOTAL_ROWS.div_ceil(ROWS_PER_PAGE)
}

fn ui(table: &Mounted, doc: &Document, page: usize) -> Element {
    let offset = doc.scroll().get(VIEWPORT);
    let status = format!(
        " page {}/{}  offset ({:.0}, {:.0})  {}  drag anywhere in the table, q quits",
        page + 1,
        page_count(),
        offset.x,
        offset.y,
        if table.is_dragging() { "dragging" } else { "idle" },
    );

    Element::col()
        .id("root")
        .width(Size::Fill)
        .height(Size::Fill)
        .child(
            Element::row()
                .id("toolbar")
                .height(Size::Fixed(1))
                .gap(2)
                .child(Element::text(" Members").style(Style::new().bold()))
                .child(button("prev", "◀ Prev"))
                .child(button("next", "Next ▶")),
        )
        .child(
            Element::col()
                .id("frame")
                .width(Size::Fill)
                .height(Size::Fill)
                .style(Style::new().border(Border::Rounded))
                .child(table.element(rows(page))),
        )
        .child(
            Element::text(status)
                .height(Size::Fixed(1))
                .style(Style::new().dim()),
        )
}

fn button(id: &str, label: &str) -> Element {
    Element::button(label)
        .id(id)
        .style(Style::new().foreground(Color::oklch(0.8, 0.12, 250.0)).underline())
}

fn rows(page: usize) -> Element {
    let first = page * ROWS_PER_PAGE;
    let last = (first + ROWS_PER_PAGE).min(TOTAL_ROWS);

    let header = Element::row()
        .height(Size::Fixed(1))
        .style(Style::new().background(Color::oklch(0.3, 0.04, 250.0)).bold())
        .children(
            COLUMNS
                .iter()
                .map(|(title, width)| Element::text(*title).width(Size::Fixed(*width))),
        );

    Element::col()
        .id("rows")
        .child(header)
        .children((first..last).map(row))
}

fn row(i: usize) -> Element {
    let cells = [
        Element::text(format!("{}", i + 1)),
        Element::text(format!("Member {:03}", i + 1)),
        Element::link(format!("member{:03}@example.org", i + 1)),
        Element::text(CITIES[i % CITIES.len()]),
        Element::select(format!("{} ▾", ROLES[i % ROLES.len()])),
        Element::text(STATUSES[i % STATUSES.len()]),
        Element::text(format!("{} GB", (i * 7) % 50 + 5)),
        Element::input(format!("notes for member {}", i + 1)),
        Element::button("[ Edit ]"),
    ];
    let background = if i % 2 == 0 {
        Color::oklch(0.2, 0.01, 250.0)
    } else {
        Color::oklch(0.23, 0.01, 250.0)
    };

    Element::row()
        .height(Size::Fixed(1))
        .style(Style::new().background(background))
        .children(
            cells
                .into_iter()
                .zip(COLUMNS)
                .map(|(cell, (_, width))| cell.width(Size::Fixed(width))),
        )
}
