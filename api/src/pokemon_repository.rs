use std::time::Instant;

use shared::{PokemonList, PokemonListItem, PokemonSorting, SortOrder};
use sqlx::PgPool;

use crate::metrics;

fn sort_column(sorting: PokemonSorting) -> &'static str {
    match sorting {
        PokemonSorting::Id => "p.id",
        PokemonSorting::Natural => "p.natural_order",
    }
}

fn direction(ordering: SortOrder) -> &'static str {
    match ordering {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    }
}

/// Fetch one page of the listing, plus one extra row to detect whether a
/// next page exists.
pub async fn get_pokemon_list(
    db: &PgPool,
    page_size: i32,
    page: i32,
    sorting: PokemonSorting,
    ordering: SortOrder,
) -> Result<PokemonList, sqlx::Error> {
    let query = format!(
        "SELECT
            p.id AS id,
            p.name AS name,
            pos.sprite_path AS sprite_path,
            p.primarytype AS primary_type,
            p.secondarytype AS secondary_type
        FROM pokemon p
        JOIN pokemon_sprite ps ON ps.pokemon_id = p.id
        JOIN pokemon_official_sprite pos ON pos.sprite_path = ps.path
        WHERE pos.is_shiny = FALSE
        ORDER BY {} {}
        LIMIT $1
        OFFSET $2",
        sort_column(sorting),
        direction(ordering),
    );

    let started = Instant::now();
    let result = sqlx::query_as::<_, PokemonListItem>(&query)
        .bind(i64::from(page_size) + 1)
        .bind(i64::from(page) * i64::from(page_size))
        .fetch_all(db)
        .await;
    metrics::observe_db_query("get_pokemon_list", started.elapsed().as_secs_f64());

    let mut list = result.map_err(|err| {
        metrics::DB_QUERY_ERRORS.inc();
        err
    })?;

    let has_next = list.len() > page_size as usize;
    list.truncate(page_size as usize);

    Ok(PokemonList {
        has_next,
        page_size,
        page,
        list,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_mapping() {
        assert_eq!(sort_column(PokemonSorting::Id), "p.id");
        assert_eq!(sort_column(PokemonSorting::Natural), "p.natural_order");
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(direction(SortOrder::Ascending), "ASC");
        assert_eq!(direction(SortOrder::Descending), "DESC");
    }
}
