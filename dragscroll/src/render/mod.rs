use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect, ViewportLayout};
use crate::text::{char_width, truncate_to_width};
use crate::types::{Border, Color, Overflow, Rgb, TextStyle};

/// Foreground and text style handed down to descendants.
#[derive(Clone, Copy)]
struct Inherited {
    fg: Rgb,
    text_style: TextStyle,
}

fn scrollbar_thumb() -> Color {
    Color::oklch(0.72, 0.06, 250.0)
}

fn scrollbar_track() -> Color {
    scrollbar_thumb().darken(0.45).desaturate(0.03)
}

/// Paint `root` into `buf` using positions from `layout`.
pub fn render_to_buffer(root: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let clip = buf.area();
    let inherited = Inherited {
        fg: Cell::default().fg,
        text_style: TextStyle::new(),
    };
    render_element(root, layout, buf, clip, inherited);
}

fn render_element(
    element: &Element,
    layout: &LayoutResult,
    buf: &mut Buffer,
    clip: Rect,
    inherited: Inherited,
) {
    let Some(rect) = layout.get(&element.id).copied() else {
        return;
    };
    let visible = rect.intersect(&clip);
    if visible.is_empty() {
        return;
    }

    let style = &element.style;
    if let Some(bg) = &style.background {
        fill(buf, visible, bg.to_rgb());
    }

    let own = Inherited {
        fg: style
            .foreground
            .as_ref()
            .map(Color::to_rgb)
            .unwrap_or(inherited.fg),
        text_style: merge(inherited.text_style, style.text_style),
    };

    if style.border != Border::None {
        draw_border(buf, rect, clip, style.border, own.fg);
    }

    let inner = rect.inset(style.border_width());
    let child_clip = if element.clips() {
        inner.intersect(&clip)
    } else {
        clip
    };

    match &element.content {
        Content::Text(text) => draw_text(buf, inner, child_clip, text, own),
        Content::Children(children) => {
            for child in children {
                render_element(child, layout, buf, child_clip, own);
            }
        }
        Content::None => {}
    }

    if let Some(viewport) = layout.viewport(&element.id) {
        draw_scrollbars(element, viewport, buf, clip);
    }
}

fn merge(parent: TextStyle, own: TextStyle) -> TextStyle {
    TextStyle {
        bold: parent.bold || own.bold,
        italic: parent.italic || own.italic,
        underline: parent.underline || own.underline,
        dim: parent.dim || own.dim,
    }
}

fn fill(buf: &mut Buffer, area: Rect, bg: Rgb) {
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                *cell = Cell { bg, ..Cell::default() };
            }
        }
    }
}

fn put(buf: &mut Buffer, clip: Rect, x: i32, y: i32, ch: char, fg: Rgb) {
    if !clip.contains(x, y) {
        return;
    }
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = fg;
        cell.wide_continuation = false;
    }
}

fn draw_border(buf: &mut Buffer, rect: Rect, clip: Rect, border: Border, fg: Rgb) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let (tl, tr, bl, br) = match border {
        Border::Rounded => ('╭', '╮', '╰', '╯'),
        _ => ('┌', '┐', '└', '┘'),
    };
    let (left, right, top, bottom) = (rect.x, rect.right() - 1, rect.y, rect.bottom() - 1);

    for x in left + 1..right {
        put(buf, clip, x, top, '─', fg);
        put(buf, clip, x, bottom, '─', fg);
    }
    for y in top + 1..bottom {
        put(buf, clip, left, y, '│', fg);
        put(buf, clip, right, y, '│', fg);
    }
    put(buf, clip, left, top, tl, fg);
    put(buf, clip, right, top, tr, fg);
    put(buf, clip, left, bottom, bl, fg);
    put(buf, clip, right, bottom, br, fg);
}

fn draw_text(buf: &mut Buffer, area: Rect, clip: Rect, text: &str, style: Inherited) {
    for (i, line) in text.lines().enumerate().take(area.height as usize) {
        let y = area.y + i as i32;
        let line = truncate_to_width(line, area.width as usize);
        let mut x = area.x;

        for ch in line.chars() {
            let width = char_width(ch) as i32;
            if width == 0 {
                continue;
            }
            if clip.contains(x, y) {
                if let Some(cell) = buf.get_mut(x, y) {
                    cell.char = ch;
                    cell.fg = style.fg;
                    cell.style = style.text_style;
                    cell.wide_continuation = false;
                }
                if width == 2 && clip.contains(x + 1, y) {
                    if let Some(cell) = buf.get_mut(x + 1, y) {
                        cell.char = ' ';
                        cell.wide_continuation = true;
                    }
                }
            }
            x += width;
        }
    }
}

/// Thumbs on the last column/row of the visible area for axes that scroll
/// and overflow (`Scroll` always shows the track).
fn draw_scrollbars(element: &Element, viewport: &ViewportLayout, buf: &mut Buffer, clip: Rect) {
    let inner = viewport.inner;
    if inner.is_empty() {
        return;
    }
    let thumb = scrollbar_thumb().to_rgb();
    let track = scrollbar_track().to_rgb();

    let show_y = match element.overflow_y {
        Overflow::Scroll => true,
        Overflow::Auto => viewport.content_height > inner.height,
        _ => false,
    };
    if show_y {
        let x = inner.right() - 1;
        let (start, len) = thumb_span(inner.height, viewport.content_height, viewport.scroll_y);
        for i in 0..inner.height {
            let color = if (start..start + len).contains(&i) { thumb } else { track };
            paint_bar(buf, clip, x, inner.y + i as i32, color);
        }
    }

    let show_x = match element.overflow_x {
        Overflow::Scroll => true,
        Overflow::Auto => viewport.content_width > inner.width,
        _ => false,
    };
    if show_x {
        let y = inner.bottom() - 1;
        let (start, len) = thumb_span(inner.width, viewport.content_width, viewport.scroll_x);
        for i in 0..inner.width {
            let color = if (start..start + len).contains(&i) { thumb } else { track };
            paint_bar(buf, clip, inner.x + i as i32, y, color);
        }
    }
}

fn paint_bar(buf: &mut Buffer, clip: Rect, x: i32, y: i32, color: Rgb) {
    if !clip.contains(x, y) {
        return;
    }
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ' ';
        cell.bg = color;
        cell.wide_continuation = false;
    }
}

/// Thumb start and length along a track of `track` cells.
fn thumb_span(track: u16, content: u16, offset: u16) -> (u16, u16) {
    if content <= track {
        return (0, track);
    }
    let len = ((track as u32 * track as u32) / content as u32).max(1) as u16;
    let max_offset = (content - track) as u32;
    let travel = (track - len) as u32;
    let start = (offset.min(content - track) as u32 * travel / max_offset) as u16;
    (start, len)
}
