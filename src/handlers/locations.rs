use axum::{extract::State, response::Json};

use crate::{
    database::Database,
    error::AppError,
    models::{LocationChange, LocationKind, LocationSets},
};

pub(crate) async fn load_location_sets(db: &Database) -> Result<LocationSets, AppError> {
    let rows = sqlx::query_as::<_, (String, String)>("SELECT kind, value FROM locations ORDER BY id")
        .fetch_all(db)
        .await?;

    let mut sets = LocationSets::default();
    for (kind, value) in rows {
        match kind.as_str() {
            "horizontal" => sets.horizontal.push(value),
            "vertical" => sets.vertical.push(value),
            other => log::warn!("ignoring location row with unknown kind '{}'", other),
        }
    }
    Ok(sets)
}

// Handler to list both registry sets
pub async fn get_locations(State(db): State<Database>) -> Result<Json<LocationSets>, AppError> {
    Ok(Json(load_location_sets(&db).await?))
}

// Handler to register a new column or row value. A blank or already-present
// value is a no-op, not an error: the caller just gets the current sets
// back. Duplicate detection is case-insensitive for both kinds, and column
// values are upper-cased at entry like the generator form does.
pub async fn add_location(
    State(db): State<Database>,
    Json(change): Json<LocationChange>,
) -> Result<Json<LocationSets>, AppError> {
    let value = change.value.trim();
    if !value.is_empty() {
        let value = match change.kind {
            LocationKind::Horizontal => value.to_uppercase(),
            LocationKind::Vertical => value.to_string(),
        };

        let present = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM locations WHERE kind = $1 AND LOWER(value) = LOWER($2))",
        )
        .bind(change.kind.as_str())
        .bind(&value)
        .fetch_one(&db)
        .await?;

        if !present {
            sqlx::query("INSERT INTO locations (kind, value) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(change.kind.as_str())
                .bind(&value)
                .execute(&db)
                .await?;
        }
    }

    Ok(Json(load_location_sets(&db).await?))
}

// Handler to drop a value from the registry. Refused while any SKU still
// sits in that column or row. Matching is case-insensitive, like the rest
// of the registry.
pub async fn remove_location(
    State(db): State<Database>,
    Json(change): Json<LocationChange>,
) -> Result<Json<LocationSets>, AppError> {
    let value = change.value.trim();

    let in_use_query = format!(
        "SELECT EXISTS (SELECT 1 FROM skus WHERE LOWER({}) = LOWER($1))",
        change.kind.sku_column()
    );
    let in_use = sqlx::query_scalar::<_, bool>(&in_use_query)
        .bind(value)
        .fetch_one(&db)
        .await?;

    if in_use {
        return Err(AppError::LocationInUse(format!(
            "location '{}' is still referenced by existing SKUs",
            value
        )));
    }

    sqlx::query("DELETE FROM locations WHERE kind = $1 AND LOWER(value) = LOWER($2)")
        .bind(change.kind.as_str())
        .bind(value)
        .execute(&db)
        .await?;

    Ok(Json(load_location_sets(&db).await?))
}
