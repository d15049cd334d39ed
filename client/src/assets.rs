use std::cell::RefCell;
use std::rc::Rc;

use headstone_shared::catalog::{Catalog, FontAsset};
use headstone_shared::{Presentation, StampVariant};
use web_sys::HtmlImageElement;

use crate::render_loop::RenderScheduler;

/// Image paths to fetch, in catalog order.
#[derive(Clone, Debug)]
pub struct AssetSources {
    pub map: String,
    pub stamps: Vec<(String, String)>,
    pub font: FontAsset,
}

impl AssetSources {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            map: catalog.map.src.clone(),
            stamps: catalog
                .stamps
                .iter()
                .map(|s| (s.color_src.clone(), s.mono_src.clone()))
                .collect(),
            font: catalog.font.clone(),
        }
    }
}

#[derive(Clone, Default)]
pub struct StampImages {
    pub color: Option<HtmlImageElement>,
    pub mono: Option<HtmlImageElement>,
}

impl StampImages {
    /// Image for a variant; a missing monochrome image falls back to the color one.
    pub fn for_variant(&self, variant: StampVariant) -> Option<&HtmlImageElement> {
        match variant {
            StampVariant::Color => self.color.as_ref(),
            StampVariant::Mono => self.mono.as_ref().or(self.color.as_ref()),
        }
    }

    /// Height / width of the color image. Both variants are drawn at this ratio.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let img = self.color.as_ref()?;
        natural_ratio(img.natural_width(), img.natural_height())
    }
}

/// Decoded artwork. Slots fill in as downloads finish.
#[derive(Default)]
pub struct SketchAssets {
    pub map: Option<HtmlImageElement>,
    pub stamps: Vec<StampImages>,
}

impl SketchAssets {
    pub fn pending(stamp_count: usize) -> Self {
        Self {
            map: None,
            stamps: vec![StampImages::default(); stamp_count],
        }
    }
}

pub fn natural_ratio(width: u32, height: u32) -> Option<f64> {
    (width > 0 && height > 0).then(|| height as f64 / width as f64)
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

async fn load_image(src: &str) -> Result<HtmlImageElement, String> {
    let image = HtmlImageElement::new()
        .map_err(|err| format!("failed to create image element for {src}: {err:?}"))?;
    image.set_src(src);
    wasm_bindgen_futures::JsFuture::from(image.decode())
        .await
        .map_err(|err| format!("failed to decode {src}: {err:?}"))?;
    Ok(image)
}

async fn load_font(font: &FontAsset) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document to register fonts on".to_string())?;
    let face = web_sys::FontFace::new_with_str(&font.family, &format!("url({})", font.src))
        .map_err(|err| format!("failed to create font face {}: {err:?}", font.family))?;
    let promise = face
        .load()
        .map_err(|err| format!("failed to start loading {}: {err:?}", font.src))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|err| format!("failed to load {}: {err:?}", font.src))?;
    document
        .fonts()
        .add(&face)
        .map_err(|err| format!("failed to register {}: {err:?}", font.family))?;
    Ok(())
}

/// Start every download in parallel. Each arrival repaints; failures are logged
/// and leave their slot empty.
pub fn spawn_asset_loads(
    sources: AssetSources,
    assets: Rc<RefCell<SketchAssets>>,
    presentation: Rc<RefCell<Presentation>>,
    scheduler: Rc<RenderScheduler>,
) {
    {
        let assets = assets.clone();
        let scheduler = scheduler.clone();
        let src = sources.map.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match load_image(&src).await {
                Ok(image) => {
                    if let Some(ratio) = natural_ratio(image.natural_width(), image.natural_height())
                    {
                        presentation.borrow_mut().set_map_aspect(1.0 / ratio);
                    }
                    assets.borrow_mut().map = Some(image);
                    scheduler.mark_dirty();
                }
                Err(err) => warn(&format!("Map image unavailable: {err}")),
            }
        });
    }

    for (idx, (color_src, mono_src)) in sources.stamps.into_iter().enumerate() {
        for (src, variant) in [(color_src, StampVariant::Color), (mono_src, StampVariant::Mono)] {
            let assets = assets.clone();
            let scheduler = scheduler.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match load_image(&src).await {
                    Ok(image) => {
                        if let Some(slot) = assets.borrow_mut().stamps.get_mut(idx) {
                            match variant {
                                StampVariant::Color => slot.color = Some(image),
                                StampVariant::Mono => slot.mono = Some(image),
                            }
                        }
                        scheduler.mark_dirty();
                    }
                    Err(err) => warn(&format!("Stamp {idx} image unavailable: {err}")),
                }
            });
        }
    }

    let font = sources.font;
    wasm_bindgen_futures::spawn_local(async move {
        match load_font(&font).await {
            // Text drawn before this used the fallback face; repaint with the real one.
            Ok(()) => scheduler.mark_dirty(),
            Err(err) => warn(&format!("Falling back to monospace: {err}")),
        }
    });
}
