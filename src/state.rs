use std::sync::Arc;

use crate::auth::config::AdminConfig;
use crate::db::merchant_repository::MerchantRepository;
use crate::db::settings_repository::SettingsRepository;

/// Shared server state, injected into Axum handlers and server functions.
#[derive(Clone)]
pub struct AppState {
    pub merchant_repo: Arc<dyn MerchantRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub admin: AdminConfig,
    pub leptos_options: leptos::prelude::LeptosOptions,
}

impl axum::extract::FromRef<AppState> for leptos::prelude::LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}
