//! Live merchant subscription endpoint.
//!
//! `GET /api/v1/merchants/stream` is a server-sent-events stream: one full
//! snapshot of the merchant list on connect, then a fresh full snapshot
//! after every change to the collection. The admin panel consumes it with
//! `EventSource` and re-renders its list wholesale per snapshot.

#[cfg(feature = "ssr")]
pub async fn merchants_stream_handler(
    axum::extract::State(state): axum::extract::State<crate::state::AppState>,
    jar: axum_extra::extract::CookieJar,
) -> Result<impl axum::response::IntoResponse, crate::error::AppError> {
    use axum::response::sse::{Event, KeepAlive, Sse};
    use futures::StreamExt;

    // The stream is admin-only; the browser sends the session cookie along
    // with the EventSource request.
    crate::auth::session::session_from_jar(&jar)?;

    let snapshots = state.merchant_repo.watch().await?;

    let events = snapshots.map(|result| -> Result<Event, axum::Error> {
        match result {
            Ok(snapshot) => Event::default().json_data(&snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "merchant snapshot stream error");
                Ok(Event::default().event("error").data(e.to_string()))
            }
        }
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
