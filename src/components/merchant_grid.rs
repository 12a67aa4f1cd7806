use leptos::prelude::*;

use crate::db::models::Merchant;

/// List publicly visible merchants, newest first.
///
/// Disabled merchants are filtered out by the repository query; they never
/// reach the public page.
#[server]
pub async fn public_merchants() -> Result<Vec<Merchant>, ServerFnError> {
    use crate::state::AppState;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    state
        .merchant_repo
        .list_enabled()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// The public merchant card grid.
///
/// Shows a loading indicator until the read completes, then either the
/// cards, an empty-state message, or an error message. Pages that do not
/// include this component never issue the merchant read.
#[component]
pub fn MerchantGrid() -> impl IntoView {
    let merchants = Resource::new(|| (), |_| public_merchants());

    view! {
        <div id="merchant-grid" class="merchant-grid">
            <Suspense fallback=|| {
                view! { <div id="merchant-loader" class="loader">"Loading merchants..."</div> }
            }>
                {move || {
                    merchants
                        .get()
                        .map(|result| match result {
                            Ok(list) if list.is_empty() => {
                                view! {
                                    <p class="grid-message">
                                        "No verified merchants are available at this time. Please check back later."
                                    </p>
                                }
                                    .into_any()
                            }
                            Ok(list) => {
                                list.into_iter()
                                    .map(|merchant| view! { <MerchantCard merchant/> })
                                    .collect_view()
                                    .into_any()
                            }
                            Err(err) => {
                                leptos::logging::error!("Error fetching merchants: {}", err);
                                view! {
                                    <p class="grid-message grid-error">
                                        "Could not load merchant information. Please try again later."
                                    </p>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn MerchantCard(merchant: Merchant) -> impl IntoView {
    view! {
        <a href=merchant.link target="_blank" rel="noopener" class="merchant-card">
            <div class="merchant-info">
                <h3>{merchant.name}</h3>
                <div class="verified-badge">"Verified Merchant"</div>
            </div>
            <span class="btn btn-gradient">"Get Key"</span>
        </a>
    }
}
