use crate::{error::ApiError, models::Meal, services::FavoritesService};
use actix_web::{web, HttpResponse};

pub fn favorites_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/favorites")
            .route(web::get().to(list_favorites))
            .route(web::post().to(add_favorite))
            .route(web::delete().to(clear_favorites)),
    )
    .service(web::resource("/favorites/{id}").route(web::delete().to(remove_favorite)));
}

#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "Favorites",
    responses((status = 200, description = "Favorite meals in the order they were added", body = [Meal]))
)]
pub async fn list_favorites(favorites: web::Data<FavoritesService>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "favorites": favorites.list().await,
    }))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    tag = "Favorites",
    request_body = Meal,
    responses(
        (status = 201, description = "Meal added"),
        (status = 200, description = "Meal was already a favorite"),
    )
)]
pub async fn add_favorite(
    meal: web::Json<Meal>,
    favorites: web::Data<FavoritesService>,
) -> Result<HttpResponse, ApiError> {
    if meal.id.trim().is_empty() {
        return Err(ApiError::InvalidInput("Meal id cannot be empty".to_string()));
    }

    let added = favorites.add(meal.into_inner()).await?;
    let body = serde_json::json!({ "added": added });
    if added {
        Ok(HttpResponse::Created().json(body))
    } else {
        Ok(HttpResponse::Ok().json(body))
    }
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{id}",
    tag = "Favorites",
    params(("id" = String, Path, description = "Meal id")),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 404, description = "Meal is not a favorite"),
    )
)]
pub async fn remove_favorite(
    path: web::Path<String>,
    favorites: web::Data<FavoritesService>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if favorites.remove(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound(format!("Meal {} is not a favorite", id)))
    }
}

#[utoipa::path(
    delete,
    path = "/api/favorites",
    tag = "Favorites",
    responses((status = 204, description = "All favorites removed"))
)]
pub async fn clear_favorites(
    favorites: web::Data<FavoritesService>,
) -> Result<HttpResponse, ApiError> {
    favorites.clear().await?;
    Ok(HttpResponse::NoContent().finish())
}
