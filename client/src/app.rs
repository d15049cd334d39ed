use std::cell::RefCell;
use std::rc::Rc;

use headstone_shared::device::is_touch_user_agent;
use headstone_shared::{Catalog, Presentation};
use leptos::prelude::*;

use crate::assets::AssetSources;
use crate::canvas::{StageCanvas, now_ms};

fn user_agent() -> String {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default()
}

/// Root component: builds the presentation state once and hands it to the stage.
#[component]
pub fn App(catalog: Catalog) -> impl IntoView {
    let is_touch = is_touch_user_agent(&user_agent());
    let sources = AssetSources::from_catalog(&catalog);
    let presentation = Rc::new(RefCell::new(Presentation::new(catalog, now_ms(), is_touch)));

    view! { <StageCanvas presentation=presentation sources=sources /> }
}
