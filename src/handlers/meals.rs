use crate::{
    error::ApiError,
    models::{Area, Category, ErrorResponse, Ingredient, Meal, SearchResponse},
    services::CatalogService,
};
use actix_web::{web, HttpResponse};

pub fn meals_config(cfg: &mut web::ServiceConfig) {
    // "/meals/random" must be registered before "/meals/{id}"
    cfg.service(web::resource("/meals/random").route(web::get().to(get_random_meal)))
        .service(web::resource("/meals/{id}").route(web::get().to(get_meal)))
        .service(web::resource("/categories").route(web::get().to(get_categories)))
        .service(
            web::resource("/categories/{name}/meals").route(web::get().to(get_category_meals)),
        )
        .service(web::resource("/areas").route(web::get().to(get_areas)))
        .service(web::resource("/areas/{name}/meals").route(web::get().to(get_area_meals)))
        .service(web::resource("/ingredients").route(web::get().to(get_ingredients)))
        .service(
            web::resource("/ingredients/{name}/meals").route(web::get().to(get_ingredient_meals)),
        );
}

#[utoipa::path(
    get,
    path = "/api/meals/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Catalog meal id")
    ),
    responses(
        (status = 200, description = "Meal details", body = Meal),
        (status = 404, description = "Meal not found", body = ErrorResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
pub async fn get_meal(
    path: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    let meal = catalog.meal_by_id(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(meal))
}

#[utoipa::path(
    get,
    path = "/api/meals/random",
    tag = "Catalog",
    responses(
        (status = 200, description = "A random meal", body = Meal),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
pub async fn get_random_meal(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    let meal = catalog.random_meal().await?;
    Ok(HttpResponse::Ok().json(meal))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses((status = 200, description = "All meal categories", body = [Category]))
)]
pub async fn get_categories(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "categories": catalog.categories().await?,
    })))
}

#[utoipa::path(
    get,
    path = "/api/areas",
    tag = "Catalog",
    responses((status = 200, description = "All cuisines/areas", body = [Area]))
)]
pub async fn get_areas(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "areas": catalog.areas().await?,
    })))
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "Catalog",
    responses((status = 200, description = "All known ingredients", body = [Ingredient]))
)]
pub async fn get_ingredients(catalog: web::Data<CatalogService>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ingredients": catalog.ingredients().await?,
    })))
}

#[utoipa::path(
    get,
    path = "/api/categories/{name}/meals",
    tag = "Catalog",
    params(("name" = String, Path, description = "Category name, e.g. Seafood")),
    responses(
        (status = 200, description = "Meals in the category", body = SearchResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
pub async fn get_category_meals(
    path: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    let meals = catalog.meals_by_category(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::from(meals)))
}

#[utoipa::path(
    get,
    path = "/api/areas/{name}/meals",
    tag = "Catalog",
    params(("name" = String, Path, description = "Area name, e.g. Italian")),
    responses(
        (status = 200, description = "Meals from the area", body = SearchResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
pub async fn get_area_meals(
    path: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    let meals = catalog.meals_by_area(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::from(meals)))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{name}/meals",
    tag = "Catalog",
    params(("name" = String, Path, description = "Main ingredient, e.g. Chicken")),
    responses(
        (status = 200, description = "Meals using the ingredient", body = SearchResponse),
        (status = 502, description = "Catalog unavailable", body = ErrorResponse),
    )
)]
pub async fn get_ingredient_meals(
    path: web::Path<String>,
    catalog: web::Data<CatalogService>,
) -> Result<HttpResponse, ApiError> {
    let meals = catalog.meals_by_ingredient(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::from(meals)))
}
