use serde::{Deserialize, Serialize};

use crate::viewport::MapViewport;

/// Immutable description of one stamp as it appears in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampSpec {
    /// Horizontal position of the stamp center, as a fraction of the drawn map width.
    pub x_percent: f64,
    /// Vertical position of the stamp center, as a fraction of the drawn map height.
    pub y_percent: f64,
    /// Stamp width as a fraction of the drawn map width. Also the hit-circle diameter.
    pub size_percent: f64,
    pub color_src: String,
    pub mono_src: String,
    pub link: String,
}

/// A stamp plus its per-frame hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub spec: StampSpec,
    pub hovered: bool,
}

impl From<StampSpec> for Stamp {
    fn from(spec: StampSpec) -> Self {
        Self {
            spec,
            hovered: false,
        }
    }
}

/// Absolute pixel geometry of a stamp under a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPlacement {
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub radius: f64,
}

impl StampPlacement {
    /// Strict inside test: a point exactly on the circle is outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        (dx * dx + dy * dy).sqrt() < self.radius
    }

    /// Drawn height for an image with the given height / width ratio.
    pub fn height_for(&self, image_ratio: f64) -> f64 {
        if !image_ratio.is_finite() || image_ratio <= 0.0 {
            return self.width;
        }
        self.width * image_ratio
    }
}

impl StampSpec {
    pub fn placement(&self, vp: &MapViewport) -> StampPlacement {
        let (center_x, center_y) = vp.map_point(self.x_percent, self.y_percent);
        let width = vp.draw_width * self.size_percent;
        StampPlacement {
            center_x,
            center_y,
            width,
            radius: width / 2.0,
        }
    }
}

/// First stamp (in list order) whose hit circle contains the point.
pub fn hit_test<'a, I>(stamps: I, vp: &MapViewport, x: f64, y: f64) -> Option<usize>
where
    I: IntoIterator<Item = &'a StampSpec>,
{
    stamps
        .into_iter()
        .position(|spec| spec.placement(vp).contains(x, y))
}

/// Recompute hover flags for every stamp. Returns `true` if any stamp is hovered.
///
/// With no pointer on the canvas every flag is cleared.
pub fn refresh_hover(stamps: &mut [Stamp], vp: &MapViewport, pointer: Option<(f64, f64)>) -> bool {
    let mut any = false;
    for stamp in stamps.iter_mut() {
        stamp.hovered = pointer
            .map(|(x, y)| stamp.spec.placement(vp).contains(x, y))
            .unwrap_or(false);
        any |= stamp.hovered;
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(x: f64, y: f64, size: f64, link: &str) -> StampSpec {
        StampSpec {
            x_percent: x,
            y_percent: y,
            size_percent: size,
            color_src: "color.png".to_string(),
            mono_src: "mono.png".to_string(),
            link: link.to_string(),
        }
    }

    fn square_viewport() -> MapViewport {
        MapViewport::fit(1000.0, 1000.0, 1.0, 0.0)
    }

    #[test]
    fn placement_scales_with_draw_width() {
        let vp = square_viewport();
        let p = spec(0.5, 0.25, 0.125, "a").placement(&vp);
        assert_eq!((p.center_x, p.center_y), (500.0, 250.0));
        assert_eq!(p.width, 125.0);
        assert_eq!(p.radius, 62.5);
    }

    #[test]
    fn center_is_always_inside() {
        let vp = square_viewport();
        let p = spec(0.3, 0.7, 0.0001, "a").placement(&vp);
        assert!(p.radius > 0.0);
        assert!(p.contains(p.center_x, p.center_y));
    }

    #[test]
    fn boundary_is_outside() {
        let vp = square_viewport();
        let p = spec(0.5, 0.5, 0.125, "a").placement(&vp);
        assert!(!p.contains(p.center_x + p.radius, p.center_y));
        assert!(!p.contains(p.center_x, p.center_y - p.radius));
        assert!(p.contains(p.center_x + p.radius - 0.001, p.center_y));
    }

    #[test]
    fn zero_size_stamp_is_never_hit() {
        let vp = square_viewport();
        let p = spec(0.5, 0.5, 0.0, "a").placement(&vp);
        assert!(!p.contains(p.center_x, p.center_y));
    }

    #[test]
    fn overlapping_stamps_resolve_to_first_listed() {
        let vp = square_viewport();
        let stamps = [
            spec(0.50, 0.5, 0.08, "first"),
            spec(0.54, 0.5, 0.08, "second"),
        ];
        // Equidistant from both centers and inside both radii.
        assert_eq!(hit_test(&stamps, &vp, 520.0, 500.0), Some(0));
        assert_eq!(hit_test(&stamps, &vp, 570.0, 500.0), Some(1));
        assert_eq!(hit_test(&stamps, &vp, 900.0, 900.0), None);
    }

    #[test]
    fn hover_refresh_sets_every_overlapping_flag() {
        let vp = square_viewport();
        let mut stamps: Vec<Stamp> = vec![
            spec(0.50, 0.5, 0.08, "first").into(),
            spec(0.54, 0.5, 0.08, "second").into(),
            spec(0.10, 0.1, 0.08, "far").into(),
        ];
        assert!(refresh_hover(&mut stamps, &vp, Some((520.0, 500.0))));
        let flags: Vec<bool> = stamps.iter().map(|s| s.hovered).collect();
        assert_eq!(flags, vec![true, true, false]);

        assert!(!refresh_hover(&mut stamps, &vp, None));
        assert!(stamps.iter().all(|s| !s.hovered));
    }

    #[test]
    fn height_follows_image_ratio() {
        let vp = square_viewport();
        let p = spec(0.5, 0.5, 0.125, "a").placement(&vp);
        assert_eq!(p.height_for(1.5), 187.5);
        assert_eq!(p.height_for(0.0), 125.0);
    }
}
