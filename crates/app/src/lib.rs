//! Orgauth application composition root
//!
//! Selects the storage backend, wires the auth backend and composes the
//! identity domain router with the infrastructure routes.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use orgauth_auth::{AuthBackend, AuthConfig, IdentityLookup, PgIdentityLookup};
use orgauth_common::config::{Config, StorageBackend};
use orgauth_common::PasswordHasher;
use orgauth_identity::{
    InMemoryStore, IdentityState, OrganisationRepository, OrganisationStore, UserRepository,
    UserStore,
};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Store implementations behind the identity services
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub organisations: Arc<dyn OrganisationStore>,
    pub identities: Arc<dyn IdentityLookup>,
}

impl Stores {
    /// Process-local stores sharing one state
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            organisations: Arc::new(store.clone()),
            identities: Arc::new(store),
        }
    }

    /// Postgres repositories over one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            organisations: Arc::new(OrganisationRepository::new(pool.clone())),
            identities: Arc::new(PgIdentityLookup::new(pool)),
        }
    }

    /// Create stores based on configuration
    pub async fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        match config.storage {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let database_url = config.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL is required for the postgres storage backend")
                })?;
                let pool = connect_postgres(database_url).await?;
                Ok(Self::postgres(pool))
            }
        }
    }
}

/// Connect to Postgres and apply pending migrations
pub async fn connect_postgres(database_url: &str) -> Result<PgPool, anyhow::Error> {
    let pool = PgPool::connect(database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

    tracing::info!("Database connection established");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Database migration failed: {}", e))?;

    tracing::info!("Database migrations applied");
    Ok(pool)
}

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    let stores = Stores::from_config(&config).await?;
    Ok(build_app(
        AuthConfig::from(&config),
        stores,
        PasswordHasher::new(),
    ))
}

/// Compose the router from already-built collaborators
pub fn build_app(auth_config: AuthConfig, stores: Stores, hasher: PasswordHasher) -> Router {
    let auth = AuthBackend::new(auth_config, stores.identities);
    let identity_state = IdentityState::new(stores.users, stores.organisations, hasher, auth);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(welcome))
        .merge(orgauth_identity::routes().with_state(identity_state))
}

/// CORS for the given comma-separated origins; `*` allows any origin
pub fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if allowed_origins.trim() == "*" {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}

/// Reject request bodies over `MAX_BODY_BYTES`
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn welcome() -> &'static str {
    "Welcome to the Orgauth identity and organisation API"
}
