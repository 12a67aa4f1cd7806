use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use vetrina::auth::config::{sha256_hex, AdminConfig};
use vetrina::db::merchant_repository::{MerchantRepository, MongoMerchantRepository};
use vetrina::db::settings_repository::{MongoSettingsRepository, SettingsRepository};
use vetrina::state::AppState;

pub const ADMIN_EMAIL: &str = "admin@vetrina.test";
pub const ADMIN_PASSWORD: &str = "test-password";

/// Holds the running MongoDB container and provides the Axum router for
/// integration tests.
///
/// The container is kept alive for as long as this struct lives. When
/// dropped, it is stopped and cleaned up automatically.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub router: Router,
    pub db: mongodb::Database,
    pub merchant_repo: Arc<dyn MerchantRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
}

impl TestEnv {
    /// Spin up MongoDB and build an Axum router wired to real repositories.
    pub async fn start() -> Self {
        // A single-node replica set: change streams are unavailable on a
        // standalone server.
        let mongo_container = Mongo::repl_set()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}/?directConnection=true", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let db = mongo_client.database("vetrina_test");

        let merchant_repo: Arc<dyn MerchantRepository> =
            Arc::new(MongoMerchantRepository::new(&db));
        let settings_repo: Arc<dyn SettingsRepository> =
            Arc::new(MongoSettingsRepository::new(&db));

        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("vetrina")
            .build();

        let app_state = AppState {
            merchant_repo: merchant_repo.clone(),
            settings_repo: settings_repo.clone(),
            admin: AdminConfig::new(ADMIN_EMAIL.to_string(), sha256_hex(ADMIN_PASSWORD)),
            leptos_options,
        };

        // API routes only, no Leptos SSR and no rate limiting.
        let router = Router::new()
            .route(
                "/api/auth/login",
                post(vetrina::auth::session::login_handler),
            )
            .route("/api/auth/me", get(vetrina::auth::session::me_handler))
            .route(
                "/api/auth/logout",
                post(vetrina::auth::session::logout_handler),
            )
            .route(
                "/api/v1/merchants/stream",
                get(vetrina::api::stream::merchants_stream_handler),
            )
            .with_state(app_state);

        Self {
            _mongo: mongo_container,
            router,
            db,
            merchant_repo,
            settings_repo,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }

    /// Helper: sign in with the test operator account.
    pub async fn login(&self, server: &axum_test::TestServer) -> axum_test::TestResponse {
        server
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD
            }))
            .await
    }
}
