//! The presentation loop: one explicit state struct driven by the host's
//! animation frames and pointer events.
//!
//! The host (a canvas in the browser, or a test) calls [`Sketch::render`] once per
//! frame and forwards pointer input. `render` returns a backend-agnostic
//! [`Frame`] describing what to draw; the host owns every pixel.

use crate::catalog::Catalog;
use crate::intro::{IntroFrame, IntroLayout, IntroSequence};
use crate::stamp::{Stamp, StampPlacement, hit_test, refresh_hover};
use crate::tooltip::Tooltip;
use crate::viewport::MapViewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Arrow,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Arrow => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Which image of a stamp to blit this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampVariant {
    Color,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampSprite {
    pub index: usize,
    pub placement: StampPlacement,
    pub variant: StampVariant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scene<'a> {
    Intro {
        text: &'a str,
        alpha: f64,
        layout: IntroLayout,
    },
    Map {
        viewport: MapViewport,
        stamps: Vec<StampSprite>,
        /// Pointer position to anchor the hint at, when it should be drawn.
        tooltip_anchor: Option<(f64, f64)>,
    },
    /// Intro is over but the map image has not arrived yet.
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub scene: Scene<'a>,
    pub cursor: Cursor,
}

/// Where a click should send the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub stamp_index: usize,
    pub url: String,
}

/// Host-facing interface of the presentation loop.
pub trait Sketch {
    fn render(&mut self, now_ms: f64, canvas: CanvasSize) -> Frame<'_>;
    fn on_pointer_move(&mut self, x: f64, y: f64);
    fn on_pointer_leave(&mut self);
    fn on_click(&mut self, now_ms: f64, x: f64, y: f64, kind: PointerKind) -> Option<Navigation>;
    /// True while frames change on their own (the intro fade), so the host keeps its loop running.
    fn needs_animation(&self, now_ms: f64) -> bool;
}

pub struct Presentation {
    intro: IntroSequence,
    start_ms: f64,
    stamps: Vec<Stamp>,
    tooltip: Tooltip,
    top_offset: f64,
    is_touch: bool,
    map_aspect: Option<f64>,
    canvas: CanvasSize,
    pointer: Option<(f64, f64)>,
}

impl Presentation {
    pub fn new(catalog: Catalog, start_ms: f64, is_touch: bool) -> Self {
        Self {
            intro: catalog.intro,
            start_ms,
            stamps: catalog.stamps.into_iter().map(Stamp::from).collect(),
            tooltip: Tooltip::new(),
            top_offset: catalog.map.top_offset,
            is_touch,
            map_aspect: None,
            canvas: CanvasSize::new(0.0, 0.0),
            pointer: None,
        }
    }

    /// Record the map image's width / height once it has loaded.
    pub fn set_map_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.map_aspect = Some(aspect);
        }
    }

    pub fn stamps(&self) -> &[Stamp] {
        &self.stamps
    }

    pub fn intro_active(&self, now_ms: f64) -> bool {
        self.intro.is_active(now_ms - self.start_ms)
    }

    fn viewport(&self) -> Option<MapViewport> {
        let aspect = self.map_aspect?;
        let vp = MapViewport::fit(
            self.canvas.width,
            self.canvas.height,
            aspect,
            self.top_offset,
        );
        (!vp.is_empty()).then_some(vp)
    }
}

impl Sketch for Presentation {
    fn render(&mut self, now_ms: f64, canvas: CanvasSize) -> Frame<'_> {
        self.canvas = canvas;

        if let IntroFrame::Phrase { text, alpha, .. } = self.intro.frame(now_ms - self.start_ms) {
            return Frame {
                scene: Scene::Intro {
                    text,
                    alpha,
                    layout: IntroLayout::for_canvas(canvas.width, canvas.height),
                },
                cursor: Cursor::Arrow,
            };
        }

        let Some(viewport) = self.viewport() else {
            return Frame {
                scene: Scene::Blank,
                cursor: Cursor::Arrow,
            };
        };

        let any_hovered = refresh_hover(&mut self.stamps, &viewport, self.pointer);
        let hover_visuals = any_hovered && !self.is_touch;
        self.tooltip.observe_hover(any_hovered, self.is_touch);

        let stamps = self
            .stamps
            .iter()
            .enumerate()
            .map(|(index, stamp)| StampSprite {
                index,
                placement: stamp.spec.placement(&viewport),
                variant: if stamp.hovered && !self.is_touch {
                    StampVariant::Mono
                } else {
                    StampVariant::Color
                },
            })
            .collect();

        let tooltip_anchor = if self.tooltip.is_visible(self.is_touch) {
            self.pointer
        } else {
            None
        };

        Frame {
            scene: Scene::Map {
                viewport,
                stamps,
                tooltip_anchor,
            },
            cursor: if hover_visuals {
                Cursor::Pointer
            } else {
                Cursor::Arrow
            },
        }
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Some((x, y));
    }

    fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    fn on_click(&mut self, now_ms: f64, x: f64, y: f64, kind: PointerKind) -> Option<Navigation> {
        if self.intro_active(now_ms) {
            return None;
        }
        // Touch devices also emit synthetic mouse clicks; only the tap counts.
        if kind == PointerKind::Mouse && self.is_touch {
            return None;
        }
        let viewport = self.viewport()?;
        let index = hit_test(self.stamps.iter().map(|s| &s.spec), &viewport, x, y)?;
        Some(Navigation {
            stamp_index: index,
            url: self.stamps[index].spec.link.clone(),
        })
    }

    fn needs_animation(&self, now_ms: f64) -> bool {
        self.intro_active(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::StampSpec;

    const AFTER_INTRO: f64 = 16_001.0;

    fn spec(x: f64, y: f64, link: &str) -> StampSpec {
        StampSpec {
            x_percent: x,
            y_percent: y,
            size_percent: 0.08,
            color_src: "c.png".to_string(),
            mono_src: "m.png".to_string(),
            link: link.to_string(),
        }
    }

    fn catalog(stamps: Vec<StampSpec>) -> Catalog {
        Catalog {
            intro: IntroSequence::new(vec!["one".into(), "two".into()], 8000.0, 1000.0),
            stamps,
            ..Catalog::default()
        }
    }

    fn square() -> CanvasSize {
        CanvasSize::new(1000.0, 1000.0)
    }

    fn desktop(stamps: Vec<StampSpec>) -> Presentation {
        let mut p = Presentation::new(catalog(stamps), 0.0, false);
        p.set_map_aspect(1.0);
        p
    }

    #[test]
    fn intro_forces_arrow_and_blocks_clicks() {
        let mut p = desktop(vec![spec(0.5, 0.5, "https://a")]);
        p.on_pointer_move(500.0, 500.0);
        let frame = p.render(4000.0, square());
        assert_eq!(frame.cursor, Cursor::Arrow);
        match frame.scene {
            Scene::Intro { text, alpha, .. } => {
                assert_eq!(text, "one");
                assert_eq!(alpha, 255.0);
            }
            other => panic!("expected intro, got {other:?}"),
        }
        assert_eq!(p.on_click(4000.0, 500.0, 500.0, PointerKind::Mouse), None);
        assert_eq!(p.on_click(12000.0, 500.0, 500.0, PointerKind::Touch), None);
        assert!(p.needs_animation(15_999.0));
    }

    #[test]
    fn map_renders_with_tooltip_after_intro() {
        let mut p = desktop(vec![spec(0.5, 0.5, "https://a")]);
        p.on_pointer_move(10.0, 20.0);
        let frame = p.render(AFTER_INTRO, square());
        match frame.scene {
            Scene::Map {
                stamps,
                tooltip_anchor,
                viewport,
            } => {
                assert_eq!(stamps.len(), 1);
                assert_eq!(stamps[0].variant, StampVariant::Color);
                assert_eq!(tooltip_anchor, Some((10.0, 20.0)));
                assert_eq!(viewport.draw_width, 1000.0);
            }
            other => panic!("expected map, got {other:?}"),
        }
        assert_eq!(frame.cursor, Cursor::Arrow);
        assert!(!p.needs_animation(AFTER_INTRO));
    }

    #[test]
    fn hover_swaps_image_sets_cursor_and_dismisses_tooltip() {
        let mut p = desktop(vec![spec(0.5, 0.5, "https://a"), spec(0.1, 0.1, "https://b")]);
        p.on_pointer_move(500.0, 500.0);
        let frame = p.render(AFTER_INTRO, square());
        assert_eq!(frame.cursor, Cursor::Pointer);
        let Scene::Map {
            stamps,
            tooltip_anchor,
            ..
        } = frame.scene
        else {
            panic!("expected map");
        };
        assert_eq!(stamps[0].variant, StampVariant::Mono);
        assert_eq!(stamps[1].variant, StampVariant::Color);
        assert_eq!(tooltip_anchor, None);

        p.on_pointer_move(900.0, 900.0);
        let frame = p.render(AFTER_INTRO + 16.0, square());
        assert_eq!(frame.cursor, Cursor::Arrow);
        let Scene::Map { tooltip_anchor, .. } = frame.scene else {
            panic!("expected map");
        };
        assert_eq!(tooltip_anchor, None, "tooltip stays dismissed");
    }

    #[test]
    fn touch_devices_skip_hover_visuals_and_tooltip() {
        let mut p = Presentation::new(catalog(vec![spec(0.5, 0.5, "https://a")]), 0.0, true);
        p.set_map_aspect(1.0);
        p.on_pointer_move(500.0, 500.0);
        let frame = p.render(AFTER_INTRO, square());
        assert_eq!(frame.cursor, Cursor::Arrow);
        let Scene::Map {
            stamps,
            tooltip_anchor,
            ..
        } = frame.scene
        else {
            panic!("expected map");
        };
        assert_eq!(stamps[0].variant, StampVariant::Color);
        assert_eq!(tooltip_anchor, None);
        assert!(p.stamps()[0].hovered);
    }

    #[test]
    fn click_navigates_to_first_listed_overlap() {
        let mut p = desktop(vec![
            spec(0.50, 0.5, "https://first"),
            spec(0.54, 0.5, "https://second"),
        ]);
        p.render(AFTER_INTRO, square());
        let nav = p.on_click(AFTER_INTRO, 520.0, 500.0, PointerKind::Mouse);
        assert_eq!(
            nav,
            Some(Navigation {
                stamp_index: 0,
                url: "https://first".to_string()
            })
        );
        assert_eq!(p.on_click(AFTER_INTRO, 5.0, 5.0, PointerKind::Mouse), None);
    }

    #[test]
    fn click_ignores_cached_hover_state() {
        let mut p = desktop(vec![spec(0.5, 0.5, "https://a"), spec(0.1, 0.1, "https://b")]);
        p.on_pointer_move(500.0, 500.0);
        p.render(AFTER_INTRO, square());
        assert!(p.stamps()[0].hovered);
        let nav = p.on_click(AFTER_INTRO, 100.0, 100.0, PointerKind::Mouse);
        assert_eq!(nav.map(|n| n.stamp_index), Some(1));
    }

    #[test]
    fn touch_device_navigates_on_tap_only() {
        let mut p = Presentation::new(catalog(vec![spec(0.5, 0.5, "https://a")]), 0.0, true);
        p.set_map_aspect(1.0);
        p.render(AFTER_INTRO, square());
        assert_eq!(p.on_click(AFTER_INTRO, 500.0, 500.0, PointerKind::Mouse), None);
        assert_eq!(
            p.on_click(AFTER_INTRO, 500.0, 500.0, PointerKind::Touch)
                .map(|n| n.url),
            Some("https://a".to_string())
        );
    }

    #[test]
    fn blank_until_map_image_arrives() {
        let mut p = Presentation::new(catalog(vec![spec(0.5, 0.5, "https://a")]), 0.0, false);
        let frame = p.render(AFTER_INTRO, square());
        assert_eq!(frame.scene, Scene::Blank);
        assert_eq!(p.on_click(AFTER_INTRO, 500.0, 500.0, PointerKind::Mouse), None);
        p.set_map_aspect(f64::NAN);
        assert_eq!(p.render(AFTER_INTRO, square()).scene, Scene::Blank);
    }

    #[test]
    fn pointer_leave_clears_hover() {
        let mut p = desktop(vec![spec(0.5, 0.5, "https://a")]);
        p.on_pointer_move(500.0, 500.0);
        p.render(AFTER_INTRO, square());
        assert!(p.stamps()[0].hovered);
        p.on_pointer_leave();
        let cursor = p.render(AFTER_INTRO, square()).cursor;
        assert_eq!(cursor, Cursor::Arrow);
        assert!(!p.stamps()[0].hovered);
    }

    #[test]
    fn intro_is_measured_from_start_time() {
        let mut p = Presentation::new(catalog(vec![]), 1_000.0, false);
        p.set_map_aspect(1.0);
        assert!(p.intro_active(16_500.0));
        assert!(!p.intro_active(17_001.0));
    }

    #[test]
    fn animation_stops_once_intro_ends() {
        let p = desktop(vec![]);
        assert!(p.needs_animation(0.0));
        assert!(p.needs_animation(15_999.0));
        assert!(!p.needs_animation(AFTER_INTRO));
    }
}
