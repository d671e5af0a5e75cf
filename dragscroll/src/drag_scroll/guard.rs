use crate::element::Element;

/// Whether a press landed on an interactive element between the target
/// (last in `path`) and the viewport, viewport excluded.
pub fn originated_on_interactive(path: &[&Element], viewport: &str) -> bool {
    path.iter()
        .rev()
        .take_while(|e| e.id != viewport)
        .any(|e| e.is_interactive())
}
