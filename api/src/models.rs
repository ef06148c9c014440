use serde::{Deserialize, Serialize};
use shared::{PokemonList, PokemonListItem, Type};

/// Raw query parameters for `GET /v1/pokemon`.
///
/// Everything stays a string here; the validation pipeline owns coercion so
/// a malformed value becomes a field failure instead of a deserialize error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonListParams {
    pub page_size: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonListResponse {
    pub has_next: bool,
    pub page_size: i32,
    pub page: i32,
    pub pokemon: Vec<PokemonListItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonListItemResponse {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub primary_type: Type,
    pub secondary_type: Option<Type>,
}

impl From<PokemonListItem> for PokemonListItemResponse {
    fn from(item: PokemonListItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            image_url: item.sprite_path,
            primary_type: item.primary_type,
            secondary_type: item.secondary_type,
        }
    }
}

impl From<PokemonList> for PokemonListResponse {
    fn from(list: PokemonList) -> Self {
        Self {
            has_next: list.has_next,
            page_size: list.page_size,
            page: list.page,
            pokemon: list.list.into_iter().map(Into::into).collect(),
        }
    }
}
