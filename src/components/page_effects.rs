//! Client-side page behavior wired up once after the header and footer
//! fragments have settled: navbar scroll state, active nav link, smooth
//! scrolling for in-page anchors, scroll-reveal animation on marked
//! sections, and content-protection handlers.
//!
//! The content-protection handlers (context menu, devtools shortcuts) are
//! deterrence only. They are not a security boundary and nothing server-side
//! relies on them.

/// Scroll offset past which the navbar switches to its "scrolled" style.
pub const NAVBAR_SCROLL_THRESHOLD_PX: f64 = 50.0;

/// What a click on an in-page anchor link should do.
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorAction {
    /// Smooth-scroll to the element with this id on the current page.
    ScrollTo(String),
    /// Navigate to the home page with the anchor appended.
    RedirectHome(String),
}

/// Decide how to handle a click on an anchor link.
///
/// Anchors resolve on the home page; from any other page the click becomes a
/// redirect to the home page carrying the fragment.
pub fn anchor_action(current_path: &str, href: &str) -> Option<AnchorAction> {
    let fragment = href.split('#').nth(1)?;
    if fragment.is_empty() {
        return None;
    }

    if current_path.is_empty() || current_path == "/" {
        Some(AnchorAction::ScrollTo(fragment.to_string()))
    } else {
        Some(AnchorAction::RedirectHome(format!("/#{}", fragment)))
    }
}

/// Whether a nav link's target matches the current page path.
///
/// Fragments and query strings are ignored; a bare fragment link is never
/// marked active.
pub fn is_active_link(current_path: &str, href: &str) -> bool {
    let target = href.split(['#', '?']).next().unwrap_or_default();
    if target.is_empty() {
        return false;
    }

    fn normalize(p: &str) -> &str {
        if p.is_empty() {
            "/"
        } else {
            p
        }
    }
    normalize(target) == normalize(current_path)
}

/// Whether a keydown matches one of the suppressed devtools / view-source
/// shortcuts: F12, Ctrl+Shift+I/J/C, Ctrl+U, Ctrl+S.
pub fn is_blocked_shortcut(ctrl: bool, shift: bool, key: &str) -> bool {
    if key == "F12" {
        return true;
    }

    let key = key.to_uppercase();
    if ctrl && shift && matches!(key.as_str(), "I" | "J" | "C") {
        return true;
    }
    if ctrl && matches!(key.as_str(), "U" | "S") {
        return true;
    }

    false
}

/// Install all page effects. No-op on the server.
pub fn init_page_effects() {
    #[cfg(feature = "hydrate")]
    dom::init();
}

/// Blocking confirmation prompt. Always declines on the server.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        dom::confirm(message)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

/// Point every anchor marked `dynamic-contact-link` at the given destination.
/// No-op on the server.
pub fn apply_contact_links(href: &str) {
    #[cfg(feature = "hydrate")]
    dom::set_contact_links(href);
    #[cfg(not(feature = "hydrate"))]
    let _ = href;
}

#[cfg(feature = "hydrate")]
mod dom {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::{anchor_action, is_active_link, is_blocked_shortcut};
    use super::{AnchorAction, NAVBAR_SCROLL_THRESHOLD_PX};

    pub fn init() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        init_navbar_scroll(&window, &document);
        init_active_links(&window, &document);
        init_anchor_links(&window, &document);
        init_scroll_reveal(&document);
        init_content_protection(&document);
    }

    pub fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    pub fn set_contact_links(href: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(anchors) = document.query_selector_all("a.dynamic-contact-link") else {
            return;
        };
        for i in 0..anchors.length() {
            if let Some(el) = anchors.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            {
                let _ = el.set_attribute("href", href);
            }
        }
    }

    fn init_navbar_scroll(window: &web_sys::Window, document: &web_sys::Document) {
        let Ok(Some(nav)) = document.query_selector(".navbar") else {
            return;
        };

        let win = window.clone();
        let on_scroll = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev| {
            let scrolled = win.scroll_y().unwrap_or(0.0) > NAVBAR_SCROLL_THRESHOLD_PX;
            let classes = nav.class_list();
            if scrolled {
                let _ = classes.add_1("navbar-scrolled");
            } else {
                let _ = classes.remove_1("navbar-scrolled");
            }
        });

        let _ = window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        // Listener lives for the lifetime of the page.
        on_scroll.forget();
    }

    fn init_active_links(window: &web_sys::Window, document: &web_sys::Document) {
        let current_path = window.location().pathname().unwrap_or_default();
        let Ok(links) = document.query_selector_all(".navbar .nav-link") else {
            return;
        };

        for i in 0..links.length() {
            let Some(el) = links.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let href = el.get_attribute("href").unwrap_or_default();
            let classes = el.class_list();
            let _ = classes.remove_1("active");
            if is_active_link(&current_path, &href) {
                let _ = classes.add_1("active");
            }
        }
    }

    fn init_anchor_links(window: &web_sys::Window, document: &web_sys::Document) {
        let Ok(anchors) = document.query_selector_all("a[href^='#'], a[href^='/#']") else {
            return;
        };

        for i in 0..anchors.length() {
            let Some(el) = anchors.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let href = el.get_attribute("href").unwrap_or_default();

            let win = window.clone();
            let doc = document.clone();
            let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
                let current_path = win.location().pathname().unwrap_or_default();
                match anchor_action(&current_path, &href) {
                    Some(AnchorAction::ScrollTo(id)) => {
                        if let Some(target) = doc.get_element_by_id(&id) {
                            ev.prevent_default();
                            let options = web_sys::ScrollIntoViewOptions::new();
                            options.set_behavior(web_sys::ScrollBehavior::Smooth);
                            target.scroll_into_view_with_scroll_into_view_options(&options);
                        }
                    }
                    Some(AnchorAction::RedirectHome(url)) => {
                        ev.prevent_default();
                        let _ = win.location().set_href(&url);
                    }
                    None => {}
                }
            });

            let _ = el.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
            on_click.forget();
        }
    }

    fn init_scroll_reveal(document: &web_sys::Document) {
        let Ok(targets) = document.query_selector_all("[data-animate]") else {
            return;
        };
        if targets.length() == 0 {
            return;
        }

        let on_intersect = Closure::<dyn FnMut(Vec<web_sys::IntersectionObserverEntry>)>::new(
            |entries: Vec<web_sys::IntersectionObserverEntry>| {
                for entry in entries {
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1("revealed");
                    }
                }
            },
        );
        let Ok(observer) =
            web_sys::IntersectionObserver::new(on_intersect.as_ref().unchecked_ref())
        else {
            return;
        };

        for i in 0..targets.length() {
            if let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            {
                observer.observe(&el);
            }
        }
        // Observer and callback live for the lifetime of the page.
        on_intersect.forget();
        std::mem::forget(observer);
    }

    fn init_content_protection(document: &web_sys::Document) {
        let on_context_menu = Closure::<dyn FnMut(web_sys::Event)>::new(|ev: web_sys::Event| {
            ev.prevent_default();
        });
        let _ = document
            .add_event_listener_with_callback("contextmenu", on_context_menu.as_ref().unchecked_ref());
        on_context_menu.forget();

        let on_keydown =
            Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(|ev: web_sys::KeyboardEvent| {
                if is_blocked_shortcut(ev.ctrl_key(), ev.shift_key(), &ev.key()) {
                    ev.prevent_default();
                }
            });
        let _ = document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        on_keydown.forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_action_on_home_scrolls() {
        assert_eq!(
            anchor_action("/", "#contact"),
            Some(AnchorAction::ScrollTo("contact".to_string()))
        );
        assert_eq!(
            anchor_action("/", "/#about"),
            Some(AnchorAction::ScrollTo("about".to_string()))
        );
    }

    #[test]
    fn test_anchor_action_off_home_redirects() {
        assert_eq!(
            anchor_action("/merchants", "#contact"),
            Some(AnchorAction::RedirectHome("/#contact".to_string()))
        );
    }

    #[test]
    fn test_anchor_action_ignores_plain_links() {
        assert_eq!(anchor_action("/", "/merchants"), None);
        assert_eq!(anchor_action("/", "#"), None);
    }

    #[test]
    fn test_active_link_matches_path() {
        assert!(is_active_link("/merchants", "/merchants"));
        assert!(is_active_link("/", "/"));
        assert!(!is_active_link("/merchants", "/"));
    }

    #[test]
    fn test_active_link_ignores_fragment_and_query() {
        assert!(is_active_link("/merchants", "/merchants#top"));
        assert!(is_active_link("/merchants", "/merchants?ref=nav"));
        // A bare fragment link is a section link, never the active page.
        assert!(!is_active_link("/", "#contact"));
    }

    #[test]
    fn test_blocked_shortcuts() {
        assert!(is_blocked_shortcut(false, false, "F12"));
        assert!(is_blocked_shortcut(true, true, "i"));
        assert!(is_blocked_shortcut(true, true, "J"));
        assert!(is_blocked_shortcut(true, true, "C"));
        assert!(is_blocked_shortcut(true, false, "u"));
        assert!(is_blocked_shortcut(true, false, "S"));
    }

    #[test]
    fn test_ordinary_keys_not_blocked() {
        assert!(!is_blocked_shortcut(false, false, "a"));
        assert!(!is_blocked_shortcut(true, false, "C"));
        assert!(!is_blocked_shortcut(false, true, "I"));
        assert!(!is_blocked_shortcut(true, false, "V"));
    }
}
