use crate::{
    config::Config,
    error::{ApiError, Result},
    handlers,
    models,
    routes::{api_routes, openapi_route},
    services::{
        CatalogService, FavoritesService, FilterEngine, JsonFileStore, KeyValueStore,
        MealDbClient, MealProvider, SearchHistoryService, SearchSessions, SuggestionEngine,
    },
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::search::search_meals,
        handlers::search::get_suggestions,
        handlers::search::get_search_history,
        handlers::search::clear_search_history,
        handlers::meals::get_meal,
        handlers::meals::get_random_meal,
        handlers::meals::get_categories,
        handlers::meals::get_areas,
        handlers::meals::get_ingredients,
        handlers::meals::get_category_meals,
        handlers::meals::get_area_meals,
        handlers::meals::get_ingredient_meals,
        handlers::favorites::list_favorites,
        handlers::favorites::add_favorite,
        handlers::favorites::remove_favorite,
        handlers::favorites::clear_favorites,
    ),
    components(schemas(
        models::Meal,
        models::IngredientSlot,
        models::IngredientLine,
        models::Category,
        models::Area,
        models::Ingredient,
        models::SearchFilters,
        models::DietaryRestriction,
        models::DifficultyLevel,
        models::SearchHistory,
        models::SearchSuggestion,
        models::SuggestionType,
        models::SearchRequest,
        models::SearchResponse,
        models::SuggestionsResponse,
        models::HistoryResponse,
        models::HealthResponse,
        models::ErrorResponse,
    )),
    tags(
        (name = "Search", description = "Filtered meal search, suggestions and history"),
        (name = "Catalog", description = "Recipe catalog browsing"),
        (name = "Favorites", description = "Saved meals"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Shared services handed to every worker
#[derive(Clone)]
pub struct AppServices {
    pub sessions: SearchSessions,
    pub history: SearchHistoryService,
    pub suggestions: SuggestionEngine,
    pub catalog: CatalogService,
    pub favorites: FavoritesService,
}

impl AppServices {
    pub fn new(
        provider: Arc<dyn MealProvider>,
        store: Arc<dyn KeyValueStore>,
        suggestion_min_chars: usize,
    ) -> Self {
        let history = SearchHistoryService::new(store.clone());
        let engine = FilterEngine::new(provider.clone(), history.clone());

        Self {
            sessions: SearchSessions::new(engine),
            suggestions: SuggestionEngine::new(history.clone())
                .with_min_chars(suggestion_min_chars),
            history,
            catalog: CatalogService::new(provider),
            favorites: FavoritesService::new(store),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = MealDbClient::new(&config.mealdb_base_url, config.request_timeout())?;
        let store = JsonFileStore::new(&config.data_dir);
        info!(
            "Using catalog at {} and data directory {}",
            config.mealdb_base_url,
            store.root().display()
        );

        Ok(Self::new(
            Arc::new(provider),
            Arc::new(store),
            config.suggestion_min_chars,
        ))
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.sessions.clone()))
            .app_data(web::Data::new(self.history.clone()))
            .app_data(web::Data::new(self.suggestions.clone()))
            .app_data(web::Data::new(self.catalog.clone()))
            .app_data(web::Data::new(self.favorites.clone()));
    }
}

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address).map_err(|e| {
            ApiError::InternalError(format!("Failed to bind {}: {}", bind_address, e))
        })?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let services = AppServices::from_config(&self.config)?;

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .configure(|cfg| services.configure(cfg))
                .service(api_routes())
                .service(openapi_route())
        })
        .listen(listener)
        .map_err(|e| ApiError::InternalError(format!("Failed to start server: {}", e)))?
        .run()
        .await
        .map_err(|e| ApiError::InternalError(format!("Server error: {}", e)))?;

        Ok(())
    }
}
