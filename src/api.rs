use axum::{
    body::Body,
    extract::{Extension, State},
    http::{HeaderName, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::ai::Suggester;
use crate::catalog::Product;
use crate::error::CommandError;
use crate::language::DEFAULT_LANGUAGE;
use crate::list::ShoppingListItem;
use crate::service::CommandService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CommandService>,
    pub suggester: Suggester,
}

impl AppState {
    pub fn new(service: Arc<CommandService>, suggester: Suggester) -> Self {
        Self { service, suggester }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ProductsResponse<'a> {
    products: &'a [Product],
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    shopping_list: Vec<ShoppingListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommandRequest {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestRequest {
    #[serde(default)]
    shopping_list: Option<Vec<ShoppingListItem>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SuggestResponse {
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    name: String,
    quantity: i64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

#[derive(Clone, Debug)]
struct RequestContext {
    request_id: String,
}

pub fn router(state: AppState) -> Router {
    let request_id_layer = middleware::from_fn(assign_request_id);
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
        .route("/shopping-list", get(get_list))
        .route("/shopping-list/update", post(update_item))
        .route("/command", post(run_command))
        .route("/suggest", post(suggest))
        .with_state(state)
        .layer(request_id_layer)
        .layer(CorsLayer::permissive())
}

async fn health() -> Response {
    let response = HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn list_products(State(state): State<AppState>) -> Response {
    let products = state.service.catalog().products();
    (StatusCode::OK, Json(ProductsResponse { products })).into_response()
}

async fn get_list(State(state): State<AppState>) -> Response {
    let response = ListResponse {
        shopping_list: state.service.lists().snapshot().await,
        message: None,
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn run_command(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Json(payload): Json<CommandRequest>,
) -> Response {
    let command = payload.command.unwrap_or_default();
    let lang = payload
        .lang
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let mut result = match state.service.resolve_command(&command, &lang).await {
        Ok(result) => result,
        Err(err) => return command_error_response(&request, err),
    };
    result.suggestions = state
        .suggester
        .suggest(&result.shopping_list, &result.search_results)
        .await;

    tracing::debug!(
        request_id = %request.request_id,
        lang = %lang,
        outcome = ?result.outcome,
        item_count = result.shopping_list.len(),
        "Handled command"
    );
    (StatusCode::OK, Json(result)).into_response()
}

async fn suggest(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Json(payload): Json<SuggestRequest>,
) -> Response {
    let list = payload.shopping_list.unwrap_or_default();
    let suggestions = state.suggester.suggest(&list, &[]).await;
    tracing::debug!(
        request_id = %request.request_id,
        count = suggestions.len(),
        "Produced suggestions"
    );
    (StatusCode::OK, Json(SuggestResponse { suggestions })).into_response()
}

async fn update_item(
    State(state): State<AppState>,
    Extension(request): Extension<RequestContext>,
    Json(payload): Json<UpdateRequest>,
) -> Response {
    let (found, shopping_list) = match state
        .service
        .set_quantity(&payload.name, payload.quantity)
        .await
    {
        Ok(updated) => updated,
        Err(err) => return command_error_response(&request, err),
    };

    let message = (!found).then(|| format!("Item \"{}\" not found", payload.name));
    tracing::debug!(
        request_id = %request.request_id,
        found,
        quantity = payload.quantity,
        "Updated list item via API"
    );
    let response = ListResponse {
        shopping_list,
        message,
    };
    (StatusCode::OK, Json(response)).into_response()
}

async fn assign_request_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
    });
    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut response = next.run(req).await;
    let status = response.status();

    let header_value = match request_id.parse() {
        Ok(value) => value,
        Err(_) => {
            return response;
        }
    };
    response
        .headers_mut()
        .insert(HeaderName::from_static("x-request-id"), header_value);

    tracing::debug!(
        request_id,
        method = %method,
        uri = %uri,
        status = %status,
        "API request completed"
    );
    response
}

fn command_error_response(request: &RequestContext, err: CommandError) -> Response {
    match err {
        CommandError::Persistence(err) => {
            tracing::error!(
                request_id = %request.request_id,
                error = %err,
                details = ?err,
                "Failed to persist shopping list"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "persistence_failed",
                }),
            )
                .into_response()
        }
    }
}
