use leptos::prelude::*;
use std::path::PathBuf;

use crate::error::AppError;

/// Fragment names the chrome loader will serve.
const FRAGMENTS: &[&str] = &["header", "footer"];

/// Resolve a fragment name to its file under the site root.
///
/// Only the known fragment names resolve; anything else is rejected before
/// touching the filesystem.
pub fn fragment_path(site_root: &str, name: &str) -> Result<PathBuf, AppError> {
    if !FRAGMENTS.contains(&name) {
        return Err(AppError::BadRequest(format!("Unknown fragment: {}", name)));
    }

    let mut path = PathBuf::from(site_root);
    path.push("fragments");
    path.push(format!("{}.html", name));
    Ok(path)
}

/// Read one shared HTML fragment (header or footer) from the assets dir.
#[server]
pub async fn get_fragment(name: String) -> Result<String, ServerFnError> {
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    let path = fragment_path(state.leptos_options.site_root.as_ref(), &name)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ServerFnError::new(format!("Failed to load fragment {}: {}", name, e)))
}

/// Shared page chrome: header and footer fragments around the page body.
///
/// Each fragment loads independently; a failed fetch logs the error and
/// leaves its placeholder empty without affecting the other. Once both
/// loads settle, client-side page effects are initialized exactly once.
#[component]
pub fn SiteChrome(children: Children) -> impl IntoView {
    let header = Resource::new(|| (), |_| get_fragment("header".to_string()));
    let footer = Resource::new(|| (), |_| get_fragment("footer".to_string()));

    let initialized = StoredValue::new(false);
    Effect::new(move |_| {
        let settled = header.get().is_some() && footer.get().is_some();
        if settled && !initialized.get_value() {
            initialized.set_value(true);
            crate::components::page_effects::init_page_effects();
        }
    });

    let fragment_html = |result: Option<Result<String, ServerFnError>>, which: &'static str| {
        match result {
            Some(Ok(html)) => html,
            Some(Err(err)) => {
                leptos::logging::error!("Error loading {} fragment: {}", which, err);
                String::new()
            }
            None => String::new(),
        }
    };

    view! {
        <div id="header-placeholder">
            <Suspense fallback=|| ()>
                <div inner_html=move || fragment_html(header.get(), "header")></div>
            </Suspense>
        </div>
        <main>{children()}</main>
        <div id="footer-placeholder">
            <Suspense fallback=|| ()>
                <div inner_html=move || fragment_html(footer.get(), "footer")></div>
            </Suspense>
        </div>
    }
}
