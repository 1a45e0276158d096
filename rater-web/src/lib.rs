#![forbid(unsafe_code)]
//! Browser side of the star-rating widget: a DOM `Surface`, event wiring,
//! the `raterJs` factory, a yew component, and the landing page script.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod binding;
pub mod components;
pub mod dom;
pub mod js_api;
pub mod page;
pub mod surface;

pub use binding::RaterBinding;
pub use surface::{DocumentLookup, DomSurface};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = page::install_when_ready() {
        dom::console_error(&format!("page setup failed: {err:#}"));
    }
}
