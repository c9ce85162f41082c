use crate::{
    error::ApiError,
    models::{
        ErrorResponse, HistoryResponse, SearchRequest, SearchResponse, SuggestionQuery,
        SuggestionsResponse,
    },
    services::{SearchHistoryService, SearchSessions, SuggestionEngine},
};
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;

/// Header carrying an opaque client session id for latest-search-wins semantics
pub const SESSION_HEADER: &str = "X-Search-Session";

pub fn search_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/search").route(web::post().to(search_meals)))
        .service(web::resource("/suggestions").route(web::get().to(get_suggestions)))
        .service(
            web::resource("/history")
                .route(web::get().to(get_search_history))
                .route(web::delete().to(clear_search_history)),
        );
}

/// Search meals
///
/// Combines a free-text name search with category, area and ingredient facets,
/// applies dietary restrictions and records non-blank queries in the search
/// history. A blank query without facets returns an empty list.
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "Search",
    request_body = SearchRequest,
    params(
        ("X-Search-Session" = Option<String>, Header, description = "Session id; a newer search in the same session supersedes older ones")
    ),
    responses(
        (status = 200, description = "Combined, filtered and deduplicated meals", body = SearchResponse),
        (status = 409, description = "Superseded by a newer search in the same session", body = ErrorResponse),
        (status = 502, description = "A facet lookup failed", body = ErrorResponse),
    )
)]
pub async fn search_meals(
    req: HttpRequest,
    request: web::Json<SearchRequest>,
    sessions: web::Data<SearchSessions>,
) -> Result<HttpResponse, ApiError> {
    let session_id = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty());

    let meals = sessions
        .search(session_id, &request.query, &request.filters)
        .await?;

    info!("Search '{}' returned {} meals", request.query, meals.len());
    Ok(HttpResponse::Ok().json(SearchResponse::from(meals)))
}

/// Suggestions for a partially typed query
#[utoipa::path(
    get,
    path = "/api/suggestions",
    tag = "Search",
    params(
        ("q" = String, Query, description = "Partial query")
    ),
    responses(
        (status = 200, description = "Recent searches followed by trending terms", body = SuggestionsResponse),
    )
)]
pub async fn get_suggestions(
    params: web::Query<SuggestionQuery>,
    suggestions: web::Data<SuggestionEngine>,
) -> HttpResponse {
    let suggestions = suggestions.suggestions(&params.q).await;
    HttpResponse::Ok().json(SuggestionsResponse { suggestions })
}

#[utoipa::path(
    get,
    path = "/api/history",
    tag = "Search",
    responses(
        (status = 200, description = "Search history, most recent first", body = HistoryResponse),
    )
)]
pub async fn get_search_history(history: web::Data<SearchHistoryService>) -> HttpResponse {
    let history = history.load().await;
    HttpResponse::Ok().json(HistoryResponse { history })
}

#[utoipa::path(
    delete,
    path = "/api/history",
    tag = "Search",
    responses(
        (status = 204, description = "Search history cleared"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn clear_search_history(
    history: web::Data<SearchHistoryService>,
) -> Result<HttpResponse, ApiError> {
    history.clear().await?;
    Ok(HttpResponse::NoContent().finish())
}
