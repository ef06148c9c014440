use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::AllowedOptions;

/// A Pokémon type, stored as the Postgres enum `pokemon_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pokemon_type")]
pub enum Type {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Stellar,
    Unknown,
    Shadow,
}

/// Column the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokemonSorting {
    /// National dex id.
    Id,
    /// In-game ordering (forms grouped with their species).
    Natural,
}

impl AllowedOptions for PokemonSorting {
    const OPTIONS: &'static [&'static str] = &["id", "natural"];

    fn from_option(name: &str) -> Option<Self> {
        match name {
            "id" => Some(PokemonSorting::Id),
            "natural" => Some(PokemonSorting::Natural),
            _ => None,
        }
    }
}

/// Direction the listing is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl AllowedOptions for SortOrder {
    const OPTIONS: &'static [&'static str] = &["ascending", "descending"];

    fn from_option(name: &str) -> Option<Self> {
        match name {
            "ascending" => Some(SortOrder::Ascending),
            "descending" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

/// One row of the paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PokemonListItem {
    pub id: i32,
    pub name: String,
    pub sprite_path: Option<String>,
    pub primary_type: Type,
    pub secondary_type: Option<Type>,
}

/// One page of the listing plus the page bookkeeping the response needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonList {
    pub has_next: bool,
    pub page_size: i32,
    pub page: i32,
    pub list: Vec<PokemonListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorting_options_cover_every_member() {
        for name in PokemonSorting::OPTIONS {
            assert!(PokemonSorting::from_option(name).is_some(), "{name}");
        }
        assert_eq!(PokemonSorting::from_option("bogus"), None);
    }

    #[test]
    fn test_sort_order_options_cover_every_member() {
        for name in SortOrder::OPTIONS {
            assert!(SortOrder::from_option(name).is_some(), "{name}");
        }
        assert_eq!(SortOrder::from_option("asc"), None);
    }

    #[test]
    fn test_type_serializes_as_member_name() {
        assert_eq!(serde_json::to_string(&Type::Fire).unwrap(), "\"Fire\"");
        assert_eq!(
            serde_json::from_str::<Type>("\"Fairy\"").unwrap(),
            Type::Fairy
        );
    }
}
