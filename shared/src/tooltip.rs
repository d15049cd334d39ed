pub const TOOLTIP_MESSAGE: &str = "Click on the stamp to learn more";
pub const TOOLTIP_FONT_SIZE: f64 = 10.0;

const POINTER_GAP: f64 = 15.0;
const PADDING: f64 = 10.0;
const BOX_HEIGHT: f64 = 26.0;
const CORNER_RADIUS: f64 = 4.0;

/// One-shot hover hint. Once any stamp has been hovered it stays hidden
/// for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip {
    dismissed: bool,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new()
    }
}

impl Tooltip {
    pub fn new() -> Self {
        Self { dismissed: false }
    }

    /// Feed this frame's hover result. Touch devices never dismiss (they never show it either).
    pub fn observe_hover(&mut self, any_hovered: bool, is_touch: bool) {
        if any_hovered && !is_touch {
            self.dismissed = true;
        }
    }

    pub fn is_visible(&self, is_touch: bool) -> bool {
        !self.dismissed && !is_touch
    }
}

/// Rounded box and text anchor for the hint, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipLayout {
    pub box_x: f64,
    pub box_y: f64,
    pub box_width: f64,
    pub box_height: f64,
    pub corner_radius: f64,
    /// Left edge of the text; text is vertically centered on `text_y`.
    pub text_x: f64,
    pub text_y: f64,
}

impl TooltipLayout {
    pub fn at_pointer(pointer_x: f64, pointer_y: f64, text_width: f64) -> Self {
        let x = pointer_x + POINTER_GAP;
        let y = pointer_y;
        Self {
            box_x: x - PADDING / 2.0,
            box_y: y - BOX_HEIGHT / 2.0,
            box_width: text_width + PADDING * 2.0,
            box_height: BOX_HEIGHT,
            corner_radius: CORNER_RADIUS,
            text_x: x + PADDING / 2.0,
            text_y: y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_until_first_hover() {
        let mut tip = Tooltip::new();
        assert!(tip.is_visible(false));
        tip.observe_hover(false, false);
        assert!(tip.is_visible(false));
        tip.observe_hover(true, false);
        assert!(!tip.is_visible(false));
        tip.observe_hover(false, false);
        assert!(!tip.is_visible(false), "dismissal is permanent");
    }

    #[test]
    fn never_visible_on_touch() {
        let mut tip = Tooltip::new();
        assert!(!tip.is_visible(true));
        tip.observe_hover(true, true);
        assert!(!tip.is_visible(true));
        assert!(tip.is_visible(false), "touch hover leaves the hint armed");
    }

    #[test]
    fn layout_sits_right_of_pointer() {
        let layout = TooltipLayout::at_pointer(100.0, 200.0, 150.0);
        assert_eq!(layout.box_x, 110.0);
        assert_eq!(layout.box_y, 187.0);
        assert_eq!(layout.box_width, 170.0);
        assert_eq!(layout.box_height, 26.0);
        assert_eq!(layout.text_x, 120.0);
        assert_eq!(layout.text_y, 200.0);
    }
}
