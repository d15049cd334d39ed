use std::cell::{Cell, RefCell};
use std::rc::Rc;

use headstone_shared::catalog::FontAsset;
use headstone_shared::colors::{ACCENT, BACKGROUND, PAPER, alpha_unit, rgb_css, rgba_css};
use headstone_shared::intro::IntroLayout;
use headstone_shared::tooltip::{TOOLTIP_FONT_SIZE, TOOLTIP_MESSAGE, TooltipLayout};
use headstone_shared::{
    CanvasSize, Cursor, Frame, MapViewport, PointerKind, Presentation, Scene, Sketch, StampSprite,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent, TouchEvent};

use crate::assets::{AssetSources, SketchAssets, spawn_asset_loads};
use crate::render_loop::RenderScheduler;

const MAX_DEVICE_PIXEL_RATIO: f64 = 3.0;

struct ResizeBinding {
    window: web_sys::Window,
    _handler: Closure<dyn Fn()>,
}

thread_local! {
    static RESIZE_BINDING: RefCell<Option<ResizeBinding>> = const { RefCell::new(None) };
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// Backing-store size for a canvas of `css_w` x `css_h` CSS pixels.
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64) -> (u32, u32) {
    let scale = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    };
    (
        (css_w * scale).round().max(1.0) as u32,
        (css_h * scale).round().max(1.0) as u32,
    )
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (client_x - rect.left(), client_y - rect.top())
}

fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(url) {
        web_sys::console::warn_1(&format!("Navigation to {url} failed: {err:?}").into());
    }
}

fn bind_resize(scheduler: Rc<RenderScheduler>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    RESIZE_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old.window.remove_event_listener_with_callback(
                "resize",
                old._handler.as_ref().unchecked_ref(),
            );
        }
    });
    let handler = Closure::<dyn Fn()>::new(move || scheduler.mark_dirty());
    if window
        .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        RESIZE_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(ResizeBinding {
                window,
                _handler: handler,
            });
        });
    }
}

/// Full-window canvas hosting the sketch.
#[component]
pub fn StageCanvas(
    presentation: Rc<RefCell<Presentation>>,
    sources: AssetSources,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let assets = Rc::new(RefCell::new(SketchAssets::pending(sources.stamps.len())));
    let font = sources.font.clone();

    // Cached 2D context (invalidated on backing-store resize, which resets its state)
    let cached_ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
    let last_cursor: Rc<Cell<Option<Cursor>>> = Rc::new(Cell::new(None));

    let render_presentation = presentation.clone();
    let render_assets = assets.clone();
    let scheduler = Rc::new(RenderScheduler::new(move |now| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return false;
        };
        let canvas: &HtmlCanvasElement = &canvas;

        let w = canvas.client_width() as f64;
        let h = canvas.client_height() as f64;
        if w <= 0.0 || h <= 0.0 {
            return false;
        }
        let dpr = device_pixel_ratio();
        let (bw, bh) = backing_size(w, h, dpr);
        if canvas.width() != bw || canvas.height() != bh {
            canvas.set_width(bw);
            canvas.set_height(bh);
            *cached_ctx.borrow_mut() = None;
        }

        let ctx = {
            let mut ctx_cache = cached_ctx.borrow_mut();
            if ctx_cache.is_none() {
                let Some(ctx) = canvas
                    .get_context("2d")
                    .ok()
                    .flatten()
                    .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
                else {
                    return false;
                };
                // All drawing stays in CSS pixel coordinates
                ctx.scale(bw as f64 / w, bh as f64 / h).ok();
                *ctx_cache = Some(ctx);
            }
            let Some(ctx) = ctx_cache.clone() else {
                return false;
            };
            ctx
        };

        let mut sketch = render_presentation.borrow_mut();
        let frame = sketch.render(now, CanvasSize::new(w, h));
        draw_frame(&ctx, &frame, &render_assets.borrow(), &font, w, h);

        if last_cursor.get() != Some(frame.cursor) {
            let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", frame.cursor.css());
            last_cursor.set(Some(frame.cursor));
        }

        sketch.needs_animation(now)
    }));

    spawn_asset_loads(sources, assets, presentation.clone(), scheduler.clone());
    bind_resize(scheduler.clone());

    // First paint once the canvas is in the DOM
    Effect::new({
        let scheduler = scheduler.clone();
        move || {
            if canvas_ref.get().is_some() {
                scheduler.mark_dirty();
            }
        }
    });

    // --- Input handlers ---

    let on_pointer_move = {
        let presentation = presentation.clone();
        let scheduler = scheduler.clone();
        move |e: PointerEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let (x, y) = local_point(&canvas, e.client_x() as f64, e.client_y() as f64);
            presentation.borrow_mut().on_pointer_move(x, y);
            scheduler.mark_dirty();
        }
    };

    let on_pointer_leave = {
        let presentation = presentation.clone();
        let scheduler = scheduler.clone();
        move |_: PointerEvent| {
            presentation.borrow_mut().on_pointer_leave();
            scheduler.mark_dirty();
        }
    };

    let on_click = {
        let presentation = presentation.clone();
        move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let (x, y) = local_point(&canvas, e.client_x() as f64, e.client_y() as f64);
            let target = presentation
                .borrow_mut()
                .on_click(now_ms(), x, y, PointerKind::Mouse);
            if let Some(nav) = target {
                navigate(&nav.url);
            }
        }
    };

    let on_touch_start = {
        let presentation = presentation.clone();
        let scheduler = scheduler.clone();
        move |e: TouchEvent| {
            // Swallow the synthetic mouse events and page gestures that follow a tap.
            e.prevent_default();
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            let Some(touch) = e.changed_touches().get(0) else {
                return;
            };
            let (x, y) = local_point(&canvas, touch.client_x() as f64, touch.client_y() as f64);
            let target = {
                let mut sketch = presentation.borrow_mut();
                sketch.on_pointer_move(x, y);
                sketch.on_click(now_ms(), x, y, PointerKind::Touch)
            };
            scheduler.mark_dirty();
            if let Some(nav) = target {
                navigate(&nav.url);
            }
        }
    };

    view! {
        <canvas
            node_ref=canvas_ref
            style="position: fixed; inset: 0; width: 100vw; height: 100vh; display: block; touch-action: none;"
            on:pointermove=on_pointer_move
            on:pointerleave=on_pointer_leave
            on:click=on_click
            on:touchstart=on_touch_start
        />
    }
}

// --- Frame drawing (Canvas 2D) ---

fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    frame: &Frame<'_>,
    assets: &SketchAssets,
    font: &FontAsset,
    w: f64,
    h: f64,
) {
    ctx.set_fill_style_str(&rgb_css(BACKGROUND));
    ctx.fill_rect(0.0, 0.0, w, h);

    match &frame.scene {
        Scene::Intro {
            text,
            alpha,
            layout,
        } => draw_intro(ctx, text, *alpha, layout, font),
        Scene::Map {
            viewport,
            stamps,
            tooltip_anchor,
        } => {
            draw_map(ctx, viewport, stamps, assets);
            if let Some((x, y)) = *tooltip_anchor {
                draw_tooltip(ctx, x, y, font);
            }
        }
        Scene::Blank => {}
    }
}

fn measure(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
}

fn draw_intro(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    alpha: f64,
    layout: &IntroLayout,
    font: &FontAsset,
) {
    ctx.set_font(&font.css(layout.font_size));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let (r, g, b) = PAPER;
    ctx.set_fill_style_str(&rgba_css(r, g, b, alpha_unit(alpha)));

    let lines = layout.fit_lines(text, |s| measure(ctx, s));
    let center_x = layout.center_x();
    for (line, y) in lines.iter().zip(layout.line_positions(lines.len())) {
        ctx.fill_text(line, center_x, y).ok();
    }
}

fn draw_map(
    ctx: &CanvasRenderingContext2d,
    viewport: &MapViewport,
    stamps: &[StampSprite],
    assets: &SketchAssets,
) {
    if let Some(map) = assets.map.as_ref() {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            map,
            viewport.left(),
            viewport.top(),
            viewport.draw_width,
            viewport.draw_height,
        )
        .ok();
    }

    for sprite in stamps {
        let Some(images) = assets.stamps.get(sprite.index) else {
            continue;
        };
        let Some(image) = images.for_variant(sprite.variant) else {
            continue;
        };
        let p = &sprite.placement;
        let sh = images
            .aspect_ratio()
            .map(|ratio| p.height_for(ratio))
            .unwrap_or(p.width);
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            p.center_x - p.width / 2.0,
            p.center_y - sh / 2.0,
            p.width,
            sh,
        )
        .ok();
    }
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
}

fn draw_tooltip(ctx: &CanvasRenderingContext2d, pointer_x: f64, pointer_y: f64, font: &FontAsset) {
    ctx.set_font(&font.css(TOOLTIP_FONT_SIZE));
    let layout = TooltipLayout::at_pointer(pointer_x, pointer_y, measure(ctx, TOOLTIP_MESSAGE));

    rounded_rect_path(
        ctx,
        layout.box_x,
        layout.box_y,
        layout.box_width,
        layout.box_height,
        layout.corner_radius,
    );
    ctx.set_fill_style_str(&rgb_css(PAPER));
    ctx.fill();

    ctx.set_text_align("left");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(&rgb_css(ACCENT));
    ctx.fill_text(TOOLTIP_MESSAGE, layout.text_x, layout.text_y)
        .ok();
}
