#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use vetrina::app::{shell, App};
    use vetrina::auth::config::AdminConfig;
    use vetrina::db::merchant_repository::{MerchantRepository, MongoMerchantRepository};
    use vetrina::db::settings_repository::{MongoSettingsRepository, SettingsRepository};

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vetrina=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Vetrina server...");

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    // Connect to MongoDB
    let mongo_uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongo_db_name =
        std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "vetrina".to_string());

    let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let mongo_db = mongo_client.database(&mongo_db_name);

    let merchant_repo: Arc<dyn MerchantRepository> =
        Arc::new(MongoMerchantRepository::new(&mongo_db));
    let settings_repo: Arc<dyn SettingsRepository> =
        Arc::new(MongoSettingsRepository::new(&mongo_db));

    tracing::info!("Connected to MongoDB at {}", mongo_uri);

    // Operator account for the admin panel
    let admin = AdminConfig::from_env().expect("Admin credentials not configured");

    if std::env::var("DEMO_MODE").map(|v| v == "true").unwrap_or(false) {
        if let Err(e) = vetrina::demo_seeder::seed_if_empty(merchant_repo.as_ref()).await {
            tracing::warn!(error = %e, "Demo seeding failed");
        }
    }

    // Build application state
    let app_state = vetrina::state::AppState {
        merchant_repo,
        settings_repo,
        admin,
        leptos_options: leptos_options.clone(),
    };

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    // Rate-limit the login endpoint; keyed by peer address.
    let governor_config = Arc::new(
        tower_governor::governor::GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Invalid rate limit configuration"),
    );

    // Build the Axum router
    let app = Router::new()
        // Auth routes
        .route(
            "/api/auth/login",
            axum::routing::post(vetrina::auth::session::login_handler)
                .layer(tower_governor::GovernorLayer::new(governor_config)),
        )
        .route(
            "/api/auth/me",
            axum::routing::get(vetrina::auth::session::me_handler),
        )
        .route(
            "/api/auth/logout",
            axum::routing::post(vetrina::auth::session::logout_handler),
        )
        // Live merchant subscription for the admin panel
        .route(
            "/api/v1/merchants/stream",
            axum::routing::get(vetrina::api::stream::merchants_stream_handler),
        )
        // Leptos server functions
        .route("/api/{*fn_name}", axum::routing::any(server_fn_handler))
        // Leptos SSR routes
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        // Static files (fragments, CSS, WASM bundle)
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    // Start the server
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}

#[cfg(feature = "ssr")]
async fn server_fn_handler(
    axum::extract::State(state): axum::extract::State<vetrina::state::AppState>,
    request: axum::extract::Request,
) -> impl axum::response::IntoResponse {
    leptos_axum::handle_server_fns_with_context(
        move || {
            leptos::prelude::provide_context(state.clone());
        },
        request,
    )
    .await
}

// When compiled for WASM (client-side), there's no main function.
// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {
    // This is intentionally empty.
    // Client-side hydration is handled by lib.rs::hydrate()
}
