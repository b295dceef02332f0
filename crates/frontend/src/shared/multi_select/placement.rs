/// Gap between the control and the panel, px
pub const PANEL_GAP: f64 = 4.0;

/// Control bounds in viewport coordinates (`getBoundingClientRect`)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSide {
    Below,
    Above,
}

/// Fixed-position coordinates of the dropdown panel.
///
/// `offset` is the distance from the top edge of the viewport when the panel
/// opens below and from the bottom edge when it opens above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropdownPlacement {
    pub side: PlacementSide,
    pub offset: f64,
    pub left: f64,
    pub width: f64,
    pub max_height: f64,
}

impl DropdownPlacement {
    pub fn position_above(&self) -> bool {
        self.side == PlacementSide::Above
    }

    pub fn to_style(&self) -> String {
        let vertical = match self.side {
            PlacementSide::Below => format!("top: {}px;", self.offset),
            PlacementSide::Above => format!("bottom: {}px;", self.offset),
        };
        format!(
            "position: fixed; {} left: {}px; width: {}px; max-height: {}px;",
            vertical, self.left, self.width, self.max_height
        )
    }
}

/// Below by default; above only when the panel does not fit below and there
/// is more room above than below.
pub fn compute_dropdown_placement(
    anchor: AnchorRect,
    viewport: ViewportSize,
    panel_height: f64,
) -> DropdownPlacement {
    let space_below = viewport.height - anchor.bottom;
    let space_above = anchor.top;
    let above = space_below < panel_height && space_above > space_below;

    let (side, offset) = if above {
        (PlacementSide::Above, viewport.height - anchor.top + PANEL_GAP)
    } else {
        (PlacementSide::Below, anchor.bottom + PANEL_GAP)
    };

    DropdownPlacement {
        side,
        offset,
        left: anchor.left,
        width: anchor.width,
        max_height: panel_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1280.0,
        height: 800.0,
    };

    fn anchor_at(top: f64) -> AnchorRect {
        AnchorRect {
            top,
            bottom: top + 36.0,
            left: 120.0,
            width: 320.0,
        }
    }

    #[test]
    fn near_bottom_opens_above() {
        // 64px below, 700px above
        let placement = compute_dropdown_placement(anchor_at(700.0), VIEWPORT, 250.0);
        assert!(placement.position_above());
        assert_eq!(placement.offset, 800.0 - 700.0 + PANEL_GAP);
        assert!(placement.to_style().contains("bottom: 104px;"));
    }

    #[test]
    fn enough_room_below_stays_below() {
        let placement = compute_dropdown_placement(anchor_at(100.0), VIEWPORT, 250.0);
        assert!(!placement.position_above());
        assert_eq!(placement.offset, 136.0 + PANEL_GAP);
        assert_eq!(placement.left, 120.0);
        assert_eq!(placement.width, 320.0);
    }

    #[test]
    fn cramped_both_ways_prefers_the_larger_side() {
        let short = ViewportSize {
            width: 400.0,
            height: 300.0,
        };
        // 100px above, 164px below: neither fits, below is larger
        let placement = compute_dropdown_placement(anchor_at(100.0), short, 250.0);
        assert!(!placement.position_above());
        // 180px above, 84px below
        let placement = compute_dropdown_placement(anchor_at(180.0), short, 250.0);
        assert!(placement.position_above());
    }
}
