pub mod auth;
pub mod characters;
pub mod health;

use crate::config::{Config, StoreBackend};
use crate::db::{init_db, Repository};
use crate::error::AppError;
use crate::service::CharacterService;
use crate::store::{CharacterStore, MemoryStore, SqliteStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CharacterService>,
    pub config: Config,
}

impl AppState {
    pub fn new(service: Arc<CharacterService>, config: Config) -> Self {
        Self { service, config }
    }
}

/// Open the configured backend and wire the service over it.
pub async fn build_state(config: Config) -> Result<AppState, AppError> {
    let store: Arc<dyn CharacterStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            let path = config.database_path.as_deref().ok_or_else(|| {
                AppError::Config("DATABASE_PATH is required for the sqlite backend".into())
            })?;
            let pool = init_db(path).await?;
            let repo = Arc::new(Repository::new(pool));
            Arc::new(SqliteStore::new(repo, config.ownership_scope))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new(config.ownership_scope)),
    };

    tracing::info!(
        backend = config.store_backend.as_str(),
        scope = %config.ownership_scope,
        "Character store ready"
    );

    let service = Arc::new(CharacterService::new(store));
    Ok(AppState::new(service, config))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/v1/characters",
            get(characters::list_characters)
                .post(characters::create_character)
                .put(characters::update_character),
        )
        .route(
            "/v1/characters/:id",
            get(characters::get_character).delete(characters::delete_character),
        )
        .route("/v1/character-skills", post(characters::attach_skill))
        .route("/v1/weapons", post(characters::equip_weapon))
        .layer(cors)
        .with_state(state)
}
