use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    database::Database,
    error::AppError,
    handlers::locations::load_location_sets,
    models::{GenerateRequest, GeneratedSku, NewSkuRequest, SkuRecord, UpdateSkuRequest},
    sku_code,
};

// Handler to list every saved SKU, oldest first
pub async fn get_skus(State(db): State<Database>) -> Result<Json<Vec<SkuRecord>>, AppError> {
    let skus = sqlx::query_as::<_, SkuRecord>("SELECT * FROM skus ORDER BY created_at, id")
        .fetch_all(&db)
        .await?;

    Ok(Json(skus))
}

#[derive(Deserialize)]
pub struct CheckSkuQuery {
    sku: String,
}

#[derive(Serialize)]
pub struct CheckSkuResponse {
    pub exists: bool,
}

// Existence probe the frontend runs before saving. Advisory only: the real
// guarantee is the UNIQUE constraint checked again at insert time.
pub async fn check_sku(
    State(db): State<Database>,
    Query(query): Query<CheckSkuQuery>,
) -> Result<Json<CheckSkuResponse>, AppError> {
    let exists = code_exists(&db, &query.sku).await?;
    Ok(Json(CheckSkuResponse { exists }))
}

// Handler to format a candidate code from the next free serial. Nothing is
// reserved here; two clients can both see the same candidate and the save
// path sorts out who wins.
pub async fn generate_sku(
    State(db): State<Database>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GeneratedSku>, AppError> {
    sku_code::validate_fields(&req.category, &req.column, &req.row, None)?;

    // Baseline is the maximum persisted serial, not the last-returned row:
    // the store does not promise insertion-order reads.
    let serials = sqlx::query_scalar::<_, i32>("SELECT serial_number FROM skus")
        .fetch_all(&db)
        .await?;

    let serial = sku_code::next_serial(sku_code::highest_serial(serials));
    let now = Utc::now();
    let (month, year) = sku_code::month_year(&now);
    let sku = sku_code::format_sku(&req.column, &req.row, serial, &req.category, month, year);

    Ok(Json(GeneratedSku {
        sku,
        serial_number: serial,
        date_code: sku_code::date_code(month, year),
    }))
}

// Handler to persist a generated SKU
pub async fn save_sku(
    State(db): State<Database>,
    Json(req): Json<NewSkuRequest>,
) -> Result<(StatusCode, Json<SkuRecord>), AppError> {
    sku_code::validate_fields(
        &req.category,
        &req.column,
        &req.row,
        req.description.as_deref(),
    )?;

    let code = req.sku.trim().to_string();
    if code.is_empty() {
        return Err(AppError::Validation("SKU code is required".to_string()));
    }

    let serial_number = match req.serial_number {
        Some(serial) => serial,
        None => sku_code::parse_serial(&code).ok_or_else(|| {
            AppError::Validation(format!("no serial number found in SKU code '{}'", code))
        })?,
    };

    let date_code = req.date_code.clone().unwrap_or_else(|| {
        let (month, year) = sku_code::month_year(&Utc::now());
        sku_code::date_code(month, year)
    });

    // Helper closure to parse string to Option<Decimal>
    let parse_decimal = |s: &Option<String>| -> Option<Decimal> {
        s.as_deref().and_then(|val| Decimal::from_str(val.trim()).ok())
    };

    // Pre-check so the common duplicate case is caught before any write. A
    // concurrent save can still slip through; the insert below hits the
    // UNIQUE constraint and surfaces as the same DuplicateCode error.
    if code_exists(&db, &code).await? {
        return Err(AppError::DuplicateCode(code));
    }

    let record = sqlx::query_as::<_, SkuRecord>(
        r#"
        INSERT INTO skus (
            bin_column, bin_row, category, subcategory, cost, price,
            description, sku, serial_number, date_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&req.column)
    .bind(&req.row)
    .bind(&req.category)
    .bind(&req.subcategory)
    .bind(parse_decimal(&req.cost))
    .bind(parse_decimal(&req.price))
    .bind(&req.description)
    .bind(&code)
    .bind(serial_number)
    .bind(&date_code)
    .fetch_one(&db)
    .await?;

    log::info!("saved SKU {} (serial {})", record.sku, record.serial_number);

    Ok((StatusCode::CREATED, Json(record)))
}

// Handler to edit the mutable fields of a SKU: location, description,
// status. The code, category, serial and date code never change.
pub async fn update_sku(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSkuRequest>,
) -> Result<Json<SkuRecord>, AppError> {
    let column = req.column.trim();
    let row = req.row.trim();

    if column.is_empty() != row.is_empty() {
        return Err(AppError::Validation(
            "column and row must both be set, or both left empty".to_string(),
        ));
    }
    sku_code::validate_description(req.description.as_deref())?;

    let (column, row) = if column.is_empty() {
        (String::new(), String::new())
    } else {
        // Assigning a location: both values must already be registered.
        let sets = load_location_sets(&db).await?;
        sku_code::resolve_location(column, row, &sets.horizontal, &sets.vertical)?
    };

    let record = sqlx::query_as::<_, SkuRecord>(
        r#"
        UPDATE skus
        SET bin_column = $1,
            bin_row = $2,
            description = COALESCE($3, description),
            status = COALESCE($4, status)
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&column)
    .bind(&row)
    .bind(&req.description)
    .bind(&req.status)
    .bind(id)
    .fetch_optional(&db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("no SKU with id {}", id)))?;

    Ok(Json(record))
}

async fn code_exists(db: &Database, code: &str) -> Result<bool, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM skus WHERE sku = $1)")
        .bind(code)
        .fetch_one(db)
        .await?;
    Ok(exists)
}
