use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the deepest element at the given coordinates.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: i32, y: i32) -> Option<String> {
    hit_path(layout, root, x, y).last().map(|e| e.id.clone())
}

/// Chain of elements from `root` down to the deepest element under the point.
///
/// Children of a clipping container are only hit inside the container's
/// visible area, so content scrolled out of view can't be targeted.
/// Empty when the point is outside the root.
pub fn hit_path<'a>(layout: &LayoutResult, root: &'a Element, x: i32, y: i32) -> Vec<&'a Element> {
    let mut path = Vec::new();
    hit_element(layout, root, x, y, &mut path);
    path
}

fn hit_element<'a>(
    layout: &LayoutResult,
    element: &'a Element,
    x: i32,
    y: i32,
    path: &mut Vec<&'a Element>,
) -> bool {
    let Some(rect) = layout.get(&element.id) else {
        return false;
    };

    if !rect.contains(x, y) {
        return false;
    }

    path.push(element);

    if element.clips() && !rect.inset(element.style.border_width()).contains(x, y) {
        return true;
    }

    // Check children in reverse order (last rendered = on top)
    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if hit_element(layout, child, x, y, path) {
                break;
            }
        }
    }

    true
}
