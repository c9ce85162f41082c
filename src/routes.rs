use actix_web::{web, HttpResponse, Scope};
use utoipa::OpenApi;

use crate::app::ApiDoc;
use crate::handlers::{favorites_config, health_check, meals_config, search_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .configure(search_config)
        .configure(meals_config)
        .configure(favorites_config)
}

/// Configure OpenAPI documentation JSON endpoint
pub fn openapi_route() -> actix_web::Resource {
    web::resource("/api-docs/openapi.json").route(web::get().to(|| async {
        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json"))
            .json(ApiDoc::openapi())
    }))
}
