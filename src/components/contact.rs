use leptos::prelude::*;

/// Read the site-wide contact link from the settings singleton.
///
/// Returns the empty string when the settings document is absent or its
/// link attribute is empty.
#[server]
pub async fn contact_link() -> Result<String, ServerFnError> {
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    let settings = state
        .settings_repo
        .get_settings()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(settings.contact_link)
}

/// The href to sweep onto the marked anchors, if any.
///
/// An absent settings document, an empty link, a failed read, or a read
/// still in flight all leave the static hrefs untouched.
pub fn href_to_apply(link: Option<Result<String, ServerFnError>>) -> Option<String> {
    match link {
        Some(Ok(href)) if !href.is_empty() => Some(href),
        _ => None,
    }
}

/// Applies the configured contact link to every anchor marked
/// `dynamic-contact-link`, including ones injected by the header and footer
/// fragments. Renders nothing itself.
#[component]
pub fn DynamicContactLinks() -> impl IntoView {
    let link = Resource::new(|| (), |_| contact_link());
    let location = leptos_router::hooks::use_location();

    // The sweep re-runs on every route change: client-side navigation
    // recreates the page's marked anchors with their static hrefs.
    Effect::new(move |_| {
        location.pathname.track();
        let result = link.get();
        if let Some(Err(err)) = &result {
            leptos::logging::error!("Error fetching contact link: {}", err);
        }
        if let Some(href) = href_to_apply(result) {
            crate::components::page_effects::apply_contact_links(&href);
        }
    });
}
