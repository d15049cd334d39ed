/// Letterbox ("contain") placement of the map image inside the canvas.
///
/// Recomputed every frame from the canvas size and the map image aspect ratio,
/// so it never goes stale across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center_x: f64,
    pub center_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

impl MapViewport {
    /// Fit an image of `image_aspect` (width / height) into the canvas without cropping.
    ///
    /// The image is centered horizontally and shifted vertically by `top_offset`.
    /// Degenerate input produces an empty mapping at the canvas center.
    pub fn fit(canvas_w: f64, canvas_h: f64, image_aspect: f64, top_offset: f64) -> Self {
        let center_x = canvas_w / 2.0;
        let center_y = canvas_h / 2.0 + top_offset;

        if canvas_w <= 0.0 || canvas_h <= 0.0 || !image_aspect.is_finite() || image_aspect <= 0.0
        {
            return Self {
                center_x,
                center_y,
                draw_width: 0.0,
                draw_height: 0.0,
            };
        }

        let canvas_aspect = canvas_w / canvas_h;
        let (draw_width, draw_height) = if canvas_aspect > image_aspect {
            (image_aspect * canvas_h, canvas_h)
        } else {
            (canvas_w, canvas_w / image_aspect)
        };

        Self {
            center_x,
            center_y,
            draw_width,
            draw_height,
        }
    }

    pub fn left(&self) -> f64 {
        self.center_x - self.draw_width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center_y - self.draw_height / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.draw_width <= 0.0 || self.draw_height <= 0.0
    }

    /// Convert normalized map coordinates (0..1 on each axis) to canvas pixels.
    pub fn map_point(&self, x_percent: f64, y_percent: f64) -> (f64, f64) {
        (
            self.left() + self.draw_width * x_percent,
            self.top() + self.draw_height * y_percent,
        )
    }
}
