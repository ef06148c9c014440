use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use shared::validation::rules::{as_int, at_least, entry_in, in_range};
use shared::validation::step::BoxedStep;
use shared::validation::Validator;
use shared::{PokemonSorting, SortOrder, ValidationFailed};

use crate::{
    error::{ApiError, ApiResult},
    metrics,
    models::{PokemonListParams, PokemonListResponse},
    pokemon_repository,
    state::AppState,
};

const DEFAULT_PAGE_SIZE: i32 = 40;
const DEFAULT_PAGE: i32 = 0;

fn map_query_rejection(err: QueryRejection) -> ApiError {
    ApiError::bad_request(
        "InvalidQuery",
        format!("Invalid query parameters: {}", err.body_text()),
    )
}

fn db_internal_error(operation: &str, err: sqlx::Error) -> ApiError {
    tracing::error!(operation = operation, error = ?err, "database operation failed");
    ApiError::internal("An unexpected database error occurred")
}

fn page_size_steps(step: BoxedStep<String>) -> BoxedStep<i32> {
    in_range(as_int(step), 1..=200)
}

fn page_steps(step: BoxedStep<String>) -> BoxedStep<i32> {
    at_least(as_int(step), 0)
}

fn reject(error: ValidationFailed) -> ApiError {
    metrics::observe_validation_rejection(error.failures().len());
    tracing::debug!(
        failures = error.failures().len(),
        "rejected listing request"
    );
    ApiError::from(error)
}

/// Paginated Pokémon listing
pub async fn get_pokemon_list(
    State(state): State<AppState>,
    params: Result<Query<PokemonListParams>, QueryRejection>,
) -> ApiResult<Json<PokemonListResponse>> {
    let Query(params) = params.map_err(map_query_rejection)?;

    metrics::VALIDATION_RUNS_TOTAL.inc();
    let mut validator = Validator::new();
    let page_size = validator.register_optional("pageSize", params.page_size, page_size_steps);
    let page = validator.register_optional("page", params.page, page_steps);
    let sort = validator.register_optional("sort", params.sort, entry_in::<PokemonSorting>);
    let order = validator.register_optional("order", params.order, entry_in::<SortOrder>);

    validator.run().await.map_err(reject)?;

    let list = pokemon_repository::get_pokemon_list(
        &state.db,
        page_size.value().unwrap_or(DEFAULT_PAGE_SIZE),
        page.value().unwrap_or(DEFAULT_PAGE),
        sort.value().unwrap_or(PokemonSorting::Id),
        order.value().unwrap_or(SortOrder::Ascending),
    )
    .await
    .map_err(|err| db_internal_error("get pokemon list", err))?;

    metrics::POKEMON_PAGES_SERVED.inc();
    metrics::POKEMON_ROWS_RETURNED.inc_by(list.list.len() as u64);

    Ok(Json(list.into()))
}
