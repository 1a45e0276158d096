//! Landing page behavior: product-card ratings, description truncation,
//! navbar shrink on scroll, and the mobile nav toggle.
use rater_core::RaterOptions;

/// Longest description shown on a card before it is cut.
pub const DESCRIPTION_LIMIT: usize = 140;
pub const ELLIPSIS: &str = "...";
/// Scroll offset past which the navbar is shrunk.
pub const NAVBAR_SHRINK_OFFSET: f64 = 14.0;
/// Viewports narrower than this keep the full-size navbar.
pub const NAVBAR_MIN_VIEWPORT: f64 = 480.0;

pub const CARD_RATING_SELECTOR: &str = ".cards__rating";
pub const DESCRIPTION_SELECTOR: &str = ".desc";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const BRAND_SELECTOR: &str = ".brands";
pub const NAV_BUTTON_SELECTOR: &str = ".btn-nav";
pub const NAV_SELECTOR: &str = ".nav";

/// Cut `text` to `max_len` characters, ellipsis included. `None` when it fits.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> Option<String> {
    if text.chars().count() <= max_len {
        return None;
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    Some(cut)
}

#[must_use]
pub fn navbar_shrunk(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SHRINK_OFFSET
}

#[must_use]
pub const fn brand_font_size(shrunk: bool) -> &'static str {
    if shrunk { "2rem" } else { "3rem" }
}

#[must_use]
pub fn shrink_enabled(viewport_width: f64) -> bool {
    viewport_width >= NAVBAR_MIN_VIEWPORT
}

/// Read-only ratings shown on product cards.
#[must_use]
pub fn card_rating_options() -> RaterOptions {
    RaterOptions::default()
        .with_max(5)
        .with_rating(3.3)
        .with_read_only(true)
        .with_star_size(12.0)
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;

    use anyhow::{Context, Result, anyhow};
    use rater_core::{Rater, RaterHooks};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{Document, Event, Node, Window};

    use super::*;
    use crate::binding::RaterBinding;
    use crate::dom;
    use crate::surface::DomSurface;

    thread_local! {
        static CARD_RATERS: RefCell<Vec<RaterBinding>> = const { RefCell::new(Vec::new()) };
    }

    fn js_err(err: wasm_bindgen::JsValue) -> anyhow::Error {
        anyhow!(dom::js_error_message(&err))
    }

    /// Run every page behavior against the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser window is unavailable or a listener
    /// cannot be installed.
    pub fn install() -> Result<()> {
        let window = dom::window().context("window unavailable")?;
        let document = window.document().context("document unavailable")?;
        let bound = bind_card_ratings(&document);
        log::debug!("bound {bound} card ratings");
        truncate_all_descriptions(&document, DESCRIPTION_LIMIT);
        install_navbar_shrink(&window, &document).context("navbar shrink")?;
        install_nav_toggle(&document).context("nav toggle")?;
        Ok(())
    }

    /// Run [`install`] now, or once the document has finished parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is unavailable or the ready listener
    /// cannot be installed.
    pub fn install_when_ready() -> Result<()> {
        let document = dom::document().context("document unavailable")?;
        if document.ready_state() != "loading" {
            return install();
        }
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = install() {
                dom::console_error(&format!("page setup failed: {err:#}"));
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(js_err)?;
        Ok(())
    }

    pub fn bind_card_ratings(document: &Document) -> usize {
        let options = card_rating_options();
        let bindings: Vec<RaterBinding> = dom::query_html_all(document, CARD_RATING_SELECTOR)
            .into_iter()
            .filter_map(|element| {
                Rater::bind(DomSurface::new(element), &options, RaterHooks::new())
                    .map_err(|err| log::warn!("card rating skipped: {err}"))
                    .ok()
            })
            .map(RaterBinding::attach)
            .collect();
        let count = bindings.len();
        CARD_RATERS.with(|slot| slot.borrow_mut().extend(bindings));
        count
    }

    pub fn truncate_all_descriptions(document: &Document, max_len: usize) {
        for element in dom::query_html_all(document, DESCRIPTION_SELECTOR) {
            if let Some(cut) = truncate_text(&element.inner_text(), max_len) {
                element.set_inner_text(&cut);
            }
        }
    }

    fn install_navbar_shrink(window: &Window, document: &Document) -> Result<()> {
        let viewport = window
            .inner_width()
            .map_err(js_err)?
            .as_f64()
            .unwrap_or_default();
        if !shrink_enabled(viewport) {
            return Ok(());
        }
        let (Some(navbar), Some(brand)) = (
            dom::query_one(document, NAVBAR_SELECTOR),
            dom::query_html_all(document, BRAND_SELECTOR).into_iter().next(),
        ) else {
            log::debug!("navbar or brand missing; shrink disabled");
            return Ok(());
        };
        let win = window.clone();
        let on_scroll = Closure::wrap(Box::new(move |_: Event| {
            let shrunk = navbar_shrunk(win.scroll_y().unwrap_or_default());
            let _ = if shrunk {
                navbar.class_list().add_1("shrink")
            } else {
                navbar.class_list().remove_1("shrink")
            };
            let _ = brand
                .style()
                .set_property("font-size", brand_font_size(shrunk));
        }) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_scroll.forget();
        Ok(())
    }

    fn install_nav_toggle(document: &Document) -> Result<()> {
        let (Some(button), Some(nav)) = (
            dom::query_one(document, NAV_BUTTON_SELECTOR),
            dom::query_one(document, NAV_SELECTOR),
        ) else {
            log::debug!("nav button or menu missing; toggle disabled");
            return Ok(());
        };

        let menu = nav.clone();
        let on_toggle = Closure::wrap(Box::new(move |_: Event| {
            let _ = menu.class_list().toggle("open");
        }) as Box<dyn FnMut(Event)>);
        button
            .add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_toggle.forget();

        let on_outside = Closure::wrap(Box::new(move |e: Event| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !button.contains(target.as_ref()) {
                let _ = nav.class_list().remove_1("open");
            }
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("click", on_outside.as_ref().unchecked_ref())
            .map_err(js_err)?;
        on_outside.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{bind_card_ratings, install, install_when_ready, truncate_all_descriptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_left_alone() {
        assert_eq!(truncate_text("fits", 10), None);
        assert_eq!(truncate_text("exactly10!", 10), None);
    }

    #[test]
    fn long_text_keeps_room_for_ellipsis() {
        assert_eq!(truncate_text("abcdefghijk", 10).as_deref(), Some("abcdefg..."));
        let cut = truncate_text(&"x".repeat(200), DESCRIPTION_LIMIT).unwrap();
        assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
    }

    #[test]
    fn navbar_thresholds() {
        assert!(!navbar_shrunk(14.0));
        assert!(navbar_shrunk(14.5));
        assert_eq!(brand_font_size(true), "2rem");
        assert_eq!(brand_font_size(false), "3rem");
        assert!(shrink_enabled(480.0));
        assert!(!shrink_enabled(479.0));
    }
}
