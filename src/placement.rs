use canvas_host::{HostBridge, Point, SelectionBounds};

use crate::error::SessionError;

/// Horizontal gap between the selection's right edge and a created node.
pub const ANCHOR_MARGIN: f64 = 48.0;

/// Computes the placement anchor for a node created next to the selection.
///
/// Derived once per canvas session from the selection's bounding-box union;
/// `None` when the selection has no valid box, in which case creation falls
/// back to the origin and an existing node keeps its position.
pub async fn resolve_anchor(host: &HostBridge) -> Result<Option<Point>, SessionError> {
    let Some(bounds) = host.selection_bounds().await? else {
        return Ok(None);
    };
    Ok(Some(anchor_from_bounds(bounds)))
}

fn anchor_from_bounds(bounds: SelectionBounds) -> Point {
    Point::new(bounds.right + ANCHOR_MARGIN, bounds.top)
}

#[cfg(test)]
mod tests {
    use canvas_host::{Point, SelectionBounds};

    use super::anchor_from_bounds;

    #[test]
    fn anchor_sits_to_the_right_of_the_selection() {
        let anchor = anchor_from_bounds(SelectionBounds {
            top: 20.0,
            right: 100.0,
        });
        assert_eq!(anchor, Point::new(148.0, 20.0));
    }
}
