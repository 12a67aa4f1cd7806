//! Browser side of the live merchant subscription.
//!
//! Wraps `EventSource` over `/api/v1/merchants/stream`. Every message is one
//! complete snapshot of the merchant list; the caller replaces its view-model
//! wholesale and re-renders. Arrival order across concurrent writers is not
//! guaranteed; the next snapshot self-heals any transient inconsistency.

use crate::db::models::Merchant;

/// Handle to an open subscription. Dropping it does not close the stream;
/// call [`MerchantSubscription::close`] on sign-out.
pub struct MerchantSubscription {
    #[cfg(feature = "hydrate")]
    source: web_sys::EventSource,
}

impl MerchantSubscription {
    pub fn close(&self) {
        #[cfg(feature = "hydrate")]
        self.source.close();
    }
}

/// Open the subscription. `on_snapshot` runs once per full snapshot,
/// `on_error` on connection failure (including an unauthenticated session).
///
/// Returns `None` outside the browser.
pub fn subscribe(
    on_snapshot: impl Fn(Vec<Merchant>) + 'static,
    on_error: impl Fn() + 'static,
) -> Option<MerchantSubscription> {
    #[cfg(feature = "hydrate")]
    {
        hydrate_impl::subscribe(on_snapshot, on_error)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (on_snapshot, on_error);
        None
    }
}

#[cfg(feature = "hydrate")]
mod hydrate_impl {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use super::MerchantSubscription;
    use crate::db::models::Merchant;

    pub fn subscribe(
        on_snapshot: impl Fn(Vec<Merchant>) + 'static,
        on_error: impl Fn() + 'static,
    ) -> Option<MerchantSubscription> {
        let source = match web_sys::EventSource::new("/api/v1/merchants/stream") {
            Ok(source) => source,
            Err(err) => {
                leptos::logging::error!("Failed to open merchant stream: {:?}", err);
                on_error();
                return None;
            }
        };

        let on_message =
            Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
                let Some(data) = ev.data().as_string() else {
                    return;
                };
                match serde_json::from_str::<Vec<Merchant>>(&data) {
                    Ok(snapshot) => on_snapshot(snapshot),
                    Err(err) => {
                        leptos::logging::error!("Invalid merchant snapshot: {}", err);
                    }
                }
            });
        source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let on_stream_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev| {
            on_error();
        });
        source.set_onerror(Some(on_stream_error.as_ref().unchecked_ref()));
        on_stream_error.forget();

        Some(MerchantSubscription { source })
    }
}
