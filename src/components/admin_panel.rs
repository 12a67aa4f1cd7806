use leptos::prelude::*;

use crate::auth::models::{AdminUser, AuthState};
use crate::components::toast::{ToastHost, Toasts};
use crate::db::models::Merchant;
use crate::error::AppError;

type SessionResource = Resource<Result<Option<AdminUser>, ServerFnError>>;

// --- server functions -------------------------------------------------------

#[cfg(feature = "ssr")]
async fn require_admin() -> Result<AdminUser, ServerFnError> {
    let jar = leptos_axum::extract::<axum_extra::extract::CookieJar>().await?;
    crate::auth::session::session_from_jar(&jar).map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(feature = "ssr")]
fn app_state() -> Result<crate::state::AppState, ServerFnError> {
    use_context::<crate::state::AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))
}

/// Current session, if any. `None` is the signed-out state, not an error.
#[server]
pub async fn admin_session() -> Result<Option<AdminUser>, ServerFnError> {
    let jar = leptos_axum::extract::<axum_extra::extract::CookieJar>().await?;
    Ok(crate::auth::session::session_from_jar(&jar).ok())
}

/// Sign in and set the session cookie.
///
/// This only requests sign-in; the panel's state transition happens when the
/// session resource is re-queried afterwards.
#[server]
pub async fn admin_login(email: String, password: String) -> Result<AdminUser, ServerFnError> {
    let state = app_state()?;
    let user = crate::auth::session::authenticate(&state.admin, &email, &password).map_err(
        |e| match e {
            AppError::Auth(msg) => ServerFnError::new(msg),
            other => ServerFnError::new(other.to_string()),
        },
    )?;

    let cookie = crate::auth::session::session_cookie(&user)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );

    Ok(user)
}

/// Clear the session cookie.
#[server]
pub async fn admin_logout() -> Result<(), ServerFnError> {
    let cookie = axum_extra::extract::cookie::Cookie::build((
        crate::auth::session::SESSION_COOKIE,
        "",
    ))
    .path("/")
    .removal()
    .build();

    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );

    Ok(())
}

/// Read the global contact link for the settings form.
#[server]
pub async fn admin_get_settings() -> Result<String, ServerFnError> {
    require_admin().await?;
    let state = app_state()?;
    let settings = state
        .settings_repo
        .get_settings()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(settings.contact_link)
}

/// Merge-write the global contact link.
#[server]
pub async fn admin_save_settings(contact_link: String) -> Result<(), ServerFnError> {
    require_admin().await?;
    let state = app_state()?;
    state
        .settings_repo
        .set_contact_link(&contact_link)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Create a merchant: enabled by default, server-assigned creation time.
#[server]
pub async fn admin_create_merchant(name: String, link: String) -> Result<(), ServerFnError> {
    require_admin().await?;
    validate_merchant_input(&name, &link).map_err(|e| ServerFnError::new(e.to_string()))?;
    let state = app_state()?;
    state
        .merchant_repo
        .create(&name, &link)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(())
}

/// Update a merchant's name and link. The creation timestamp is untouched.
#[server]
pub async fn admin_update_merchant(
    id: String,
    name: String,
    link: String,
) -> Result<(), ServerFnError> {
    require_admin().await?;
    validate_merchant_input(&name, &link).map_err(|e| ServerFnError::new(e.to_string()))?;
    let state = app_state()?;
    state
        .merchant_repo
        .update_details(&id, &name, &link)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Flip a merchant's public visibility.
#[server]
pub async fn admin_set_enabled(id: String, enabled: bool) -> Result<(), ServerFnError> {
    require_admin().await?;
    let state = app_state()?;
    state
        .merchant_repo
        .set_enabled(&id, enabled)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Delete a merchant. The admin list updates through the live subscription.
#[server]
pub async fn admin_delete_merchant(id: String) -> Result<(), ServerFnError> {
    require_admin().await?;
    let state = app_state()?;
    state
        .merchant_repo
        .delete(&id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

// --- helpers ----------------------------------------------------------------

/// Check merchant form input before it reaches the store.
pub fn validate_merchant_input(name: &str, link: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Merchant name must not be empty".into()));
    }

    let url = url::Url::parse(link)
        .map_err(|_| AppError::BadRequest(format!("Invalid merchant link: {}", link)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::BadRequest(
            "Merchant link must be an http(s) URL".into(),
        ));
    }

    Ok(())
}

/// The message a failed server function carries, without transport framing.
pub fn server_error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(msg) => msg.clone(),
        other => other.to_string(),
    }
}

// --- components -------------------------------------------------------------

/// The admin panel: sign-in modal when signed out, management dashboard when
/// signed in. The transition between the two states is driven by re-querying
/// the session resource after login or logout settles.
#[component]
pub fn AdminPanel() -> impl IntoView {
    provide_context(Toasts::new());

    let session: SessionResource = Resource::new(|| (), |_| admin_session());
    let auth_state = Memo::new(move |_| match session.get() {
        Some(Ok(Some(user))) => AuthState::SignedIn(user),
        _ => AuthState::SignedOut,
    });

    view! {
        <section class="admin">
            <Show
                when=move || auth_state.get().is_signed_in()
                fallback=move || view! { <LoginModal session/> }
            >
                <AdminDashboard session/>
            </Show>
            <ToastHost/>
        </section>
    }
}

#[component]
fn LoginModal(session: SessionResource) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let login = Action::new(|credentials: &(String, String)| {
        let (email, password) = credentials.clone();
        async move { admin_login(email, password).await }
    });

    Effect::new(move |_| {
        if let Some(result) = login.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    session.refetch();
                }
                Err(err) => error.set(Some(server_error_message(&err))),
            }
        }
    });

    view! {
        <div class="modal login-modal">
            <form
                class="login-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    login.dispatch((email.get(), password.get()));
                }
            >
                <h2>"Admin Sign In"</h2>
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <input
                    type="email"
                    placeholder="Email"
                    required
                    prop:value=email
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    required
                    prop:value=password
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || login.pending().get()>
                    {move || if login.pending().get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn AdminDashboard(session: SessionResource) -> impl IntoView {
    let logout = Action::new(|_: &()| admin_logout());

    // Fire-and-forget: the panel leaves through the session re-query, not
    // through the request's own result.
    Effect::new(move |_| {
        if logout.value().get().is_some() {
            session.refetch();
        }
    });

    view! {
        <header class="admin-header">
            <h1>"Merchant Management"</h1>
            <button class="btn" on:click=move |_| {
                logout.dispatch(());
            }>"Sign Out"</button>
        </header>
        <SettingsForm/>
        <MerchantManager/>
    }
}

#[component]
fn SettingsForm() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    let contact_link = RwSignal::new(String::new());

    // Best-effort load on entering the signed-in state; failure toasts and
    // leaves the input blank.
    let initial = Resource::new(|| (), |_| admin_get_settings());
    Effect::new(move |_| match initial.get() {
        Some(Ok(link)) => contact_link.set(link),
        Some(Err(err)) => {
            leptos::logging::error!("Error loading global settings: {}", err);
            toasts.error("Error", "Could not load global settings.");
        }
        None => {}
    });

    let save = Action::new(|link: &String| {
        let link = link.clone();
        async move { admin_save_settings(link).await }
    });

    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(()) => toasts.success("Success", "Global contact link updated successfully!"),
                Err(err) => {
                    leptos::logging::error!("Error saving global settings: {}", err);
                    toasts.error("Error", "Failed to save settings.");
                }
            }
        }
    });

    view! {
        <form
            class="settings-form"
            on:submit=move |ev| {
                ev.prevent_default();
                save.dispatch(contact_link.get());
            }
        >
            <label for="contact-link">"Global contact link"</label>
            <input
                id="contact-link"
                type="url"
                placeholder="https://wa.me/..."
                prop:value=contact_link
                on:input=move |ev| contact_link.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || save.pending().get()>
                {move || if save.pending().get() { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}

#[component]
fn MerchantManager() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    // None = still loading; each snapshot from the live subscription
    // replaces the whole list.
    let merchants = RwSignal::new(Option::<Vec<Merchant>>::None);
    let load_failed = RwSignal::new(false);

    let subscription =
        StoredValue::new_local(Option::<crate::components::live::MerchantSubscription>::None);

    Effect::new(move |_| {
        if subscription.with_value(|s| s.is_some()) {
            return;
        }
        let opened = crate::components::live::subscribe(
            move |snapshot| {
                load_failed.set(false);
                merchants.set(Some(snapshot));
            },
            move || {
                // EventSource retries on its own; toast only on the first
                // failure to avoid a toast per reconnect attempt.
                if !load_failed.get_untracked() {
                    load_failed.set(true);
                    toasts.error("Error", "Could not load merchants.");
                }
            },
        );
        subscription.set_value(opened);
    });
    on_cleanup(move || {
        subscription.with_value(|s| {
            if let Some(subscription) = s {
                subscription.close();
            }
        });
    });

    // A single modal and form serve both add and edit. An empty id means add.
    let modal_open = RwSignal::new(false);
    let form_id = RwSignal::new(String::new());
    let form_name = RwSignal::new(String::new());
    let form_link = RwSignal::new(String::new());

    let save = Action::new(|input: &(String, String, String)| {
        let (id, name, link) = input.clone();
        async move {
            if id.is_empty() {
                admin_create_merchant(name, link).await
            } else {
                admin_update_merchant(id, name, link).await
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save.value().get() {
            match result {
                Ok(()) => {
                    let message = if form_id.get_untracked().is_empty() {
                        "New merchant added successfully!"
                    } else {
                        "Merchant updated successfully!"
                    };
                    toasts.success("Success", message);
                    // The modal closes only on success; the row appears via
                    // the live subscription.
                    modal_open.set(false);
                }
                Err(err) => {
                    leptos::logging::error!("Error saving merchant: {}", err);
                    toasts.error("Error", "Failed to save merchant.");
                }
            }
        }
    });

    let delete = Action::new(|id: &String| {
        let id = id.clone();
        async move { admin_delete_merchant(id).await }
    });

    Effect::new(move |_| {
        if let Some(result) = delete.value().get() {
            match result {
                Ok(()) => toasts.success("Success", "Merchant deleted successfully."),
                Err(err) => {
                    leptos::logging::error!("Error deleting merchant: {}", err);
                    toasts.error("Error", "Failed to delete merchant.");
                }
            }
        }
    });

    let on_edit = Callback::new(move |merchant: Merchant| {
        form_id.set(merchant.id_hex());
        form_name.set(merchant.name);
        form_link.set(merchant.link);
        modal_open.set(true);
    });

    let on_delete = Callback::new(move |id: String| {
        if crate::components::page_effects::confirm("Are you sure you want to delete this merchant?")
        {
            delete.dispatch(id);
        }
    });

    let open_add = move |_| {
        form_id.set(String::new());
        form_name.set(String::new());
        form_link.set(String::new());
        modal_open.set(true);
    };

    view! {
        <section class="merchant-manager">
            <div class="merchant-manager-header">
                <h2>"Merchants"</h2>
                <button class="btn btn-gradient" on:click=open_add>"Add Merchant"</button>
            </div>
            <div id="merchant-list" class="merchant-list">
                {move || {
                    if load_failed.get() {
                        return ().into_any();
                    }
                    match merchants.get() {
                        None => {
                            view! { <div id="merchant-loader" class="loader">"Loading merchants..."</div> }
                                .into_any()
                        }
                        Some(list) if list.is_empty() => {
                            view! {
                                <p class="grid-message">"No merchants found. Add one to get started."</p>
                            }
                                .into_any()
                        }
                        Some(list) => {
                            list.into_iter()
                                .map(|merchant| view! { <MerchantRow merchant on_edit on_delete/> })
                                .collect_view()
                                .into_any()
                        }
                    }
                }}
            </div>

            <Show when=move || modal_open.get()>
                <div class="modal">
                    <form
                        class="merchant-form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            save.dispatch((form_id.get(), form_name.get(), form_link.get()));
                        }
                    >
                        <h2>
                            {move || {
                                if form_id.get().is_empty() { "Add New Merchant" } else { "Edit Merchant" }
                            }}
                        </h2>
                        <input type="hidden" prop:value=form_id/>
                        <input
                            type="text"
                            placeholder="Merchant name"
                            required
                            prop:value=form_name
                            on:input=move |ev| form_name.set(event_target_value(&ev))
                        />
                        <input
                            type="url"
                            placeholder="https://merchant.example"
                            required
                            prop:value=form_link
                            on:input=move |ev| form_link.set(event_target_value(&ev))
                        />
                        <div class="modal-actions">
                            <button type="button" class="btn" on:click=move |_| modal_open.set(false)>
                                "Cancel"
                            </button>
                            <button type="submit" class="btn btn-gradient" disabled=move || save.pending().get()>
                                {move || if save.pending().get() { "Saving..." } else { "Save Merchant" }}
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn MerchantRow(
    merchant: Merchant,
    on_edit: Callback<Merchant>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    // Rows are recreated on every snapshot, so this starts from the stored
    // value each time. It only diverges during an in-flight toggle.
    let enabled = RwSignal::new(merchant.enabled);
    let id = merchant.id_hex();

    let toggle_id = id.clone();
    let on_toggle = move |ev| {
        let desired = event_target_checked(&ev);
        enabled.set(desired);
        let id = toggle_id.clone();
        leptos::task::spawn_local(async move {
            match admin_set_enabled(id, desired).await {
                Ok(()) => {
                    let message = if desired { "Merchant enabled." } else { "Merchant disabled." };
                    toasts.success("Success", message);
                }
                Err(err) => {
                    // Roll the optimistic toggle back to its prior value.
                    enabled.set(!desired);
                    leptos::logging::error!("Error updating merchant status: {}", err);
                    toasts.error("Error", "Failed to update merchant status.");
                }
            }
        });
    };

    let edit_merchant = merchant.clone();
    let delete_id = id.clone();

    view! {
        <div class="merchant-row" data-id=id>
            <div class="merchant-row-info">
                <strong>{merchant.name}</strong>
                <small class="text-truncate">{merchant.link}</small>
            </div>
            <div class="merchant-row-actions">
                <label
                    class="switch"
                    title=move || if enabled.get() { "Disable merchant" } else { "Enable merchant" }
                >
                    <input type="checkbox" prop:checked=move || enabled.get() on:change=on_toggle/>
                </label>
                <button
                    class="btn-icon"
                    title="Edit merchant"
                    on:click=move |_| on_edit.run(edit_merchant.clone())
                >
                    "Edit"
                </button>
                <button
                    class="btn-icon btn-danger"
                    title="Delete merchant"
                    on:click=move |_| on_delete.run(delete_id.clone())
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
