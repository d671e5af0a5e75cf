use super::{LayoutResult, Rect, ViewportLayout};
use crate::element::{Content, Element};
use crate::scroll::ScrollState;
use crate::text::max_line_width;
use crate::types::{Direction, Size};

/// Lay out `root` inside `available`. Children of clipping containers are
/// shifted by the container's current scroll offset.
pub fn layout(root: &Element, available: Rect, scroll: &ScrollState) -> LayoutResult {
    let mut result = LayoutResult::new();

    let width = resolve_size(root.width, available.width, root, true);
    let height = resolve_size(root.height, available.height, root, false);
    let rect = Rect::new(available.x, available.y, width, height);

    result.insert(root.id.clone(), rect);
    layout_children(root, rect, scroll, &mut result);
    result
}

fn layout_children(element: &Element, rect: Rect, scroll: &ScrollState, result: &mut LayoutResult) {
    let inner = rect.inset(element.style.border_width());

    let children: &[Element] = match &element.content {
        Content::Children(children) => children,
        _ => &[],
    };

    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };

    // Clipping axes let children keep their natural size and overflow.
    let (main_overflow, cross_overflow) = if is_row {
        (element.overflow_x, element.overflow_y)
    } else {
        (element.overflow_y, element.overflow_x)
    };
    let unbounded_main = main_overflow.clips();
    let unbounded_cross = cross_overflow.clips();

    // First pass: fixed and content-sized children, count fill items
    let gap_total = gaps_width(element.gap, children.len());
    let mut fixed_total = 0u16;
    let mut fill_count = 0u16;
    for child in children {
        match main_size_of(child, is_row) {
            Size::Fill => fill_count += 1,
            Size::Fixed(n) => fixed_total = fixed_total.saturating_add(n),
            Size::Auto => fixed_total = fixed_total.saturating_add(estimate_size(child, is_row)),
        }
    }

    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));
    let fill_size = if fill_count > 0 {
        remaining / fill_count
    } else {
        0
    };

    let (scroll_x, scroll_y) = if element.clips() {
        let offset = scroll.get(&element.id);
        (offset.x.floor() as i32, offset.y.floor() as i32)
    } else {
        (0, 0)
    };

    // Second pass: place children along the main axis
    let mut offset = 0u16;
    let mut content_width = 0u16;
    let mut content_height = 0u16;

    for child in children {
        let main = match main_size_of(child, is_row) {
            Size::Fixed(n) => n,
            Size::Auto => estimate_size(child, is_row),
            Size::Fill => fill_size,
        };
        let main = if unbounded_main {
            main
        } else {
            main.min(main_size.saturating_sub(offset))
        };

        let cross = match cross_size_of(child, is_row) {
            Size::Fixed(n) => n,
            Size::Fill => cross_size,
            Size::Auto => estimate_size(child, !is_row),
        };
        let cross = if unbounded_cross {
            cross
        } else {
            cross.min(cross_size)
        };

        let (rel_x, rel_y, width, height) = if is_row {
            (offset, 0, main, cross)
        } else {
            (0, offset, cross, main)
        };

        let child_rect = Rect::new(
            inner.x + rel_x as i32 - scroll_x,
            inner.y + rel_y as i32 - scroll_y,
            width,
            height,
        );
        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, scroll, result);

        content_width = content_width.max(rel_x.saturating_add(width));
        content_height = content_height.max(rel_y.saturating_add(height));
        offset = offset.saturating_add(main).saturating_add(element.gap);
    }

    if element.clips() {
        result.insert_viewport(
            element.id.clone(),
            ViewportLayout {
                inner,
                content_width,
                content_height,
                scroll_x: scroll_x as u16,
                scroll_y: scroll_y as u16,
            },
        );
    }
}

fn main_size_of(element: &Element, is_row: bool) -> Size {
    if is_row {
        element.width
    } else {
        element.height
    }
}

fn cross_size_of(element: &Element, is_row: bool) -> Size {
    main_size_of(element, !is_row)
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width).min(available),
    }
}

/// Natural size of an element along one axis.
fn estimate_size(element: &Element, is_width: bool) -> u16 {
    let declared = if is_width {
        element.width
    } else {
        element.height
    };
    if let Size::Fixed(n) = declared {
        return n;
    }

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                u16::try_from(max_line_width(text)).unwrap_or(u16::MAX)
            } else {
                u16::try_from(text.lines().count().max(1)).unwrap_or(u16::MAX)
            }
        }
        Content::Children(children) if children.is_empty() => 0,
        Content::Children(children) => {
            let along_main = (element.direction == Direction::Row) == is_width;
            if along_main {
                let gap_total = gaps_width(element.gap, children.len());
                children
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .fold(gap_total, u16::saturating_add)
            } else {
                children
                    .iter()
                    .map(|c| estimate_size(c, is_width))
                    .max()
                    .unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    content_size + element.style.border_width() * 2
}

/// Space taken by gaps between `count` children, saturating on huge trees.
fn gaps_width(gap: u16, count: usize) -> u16 {
    let gaps = u16::try_from(count.saturating_sub(1)).unwrap_or(u16::MAX);
    gap.saturating_mul(gaps)
}
