use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted SKU. The bin location lives in `bin_column`/`bin_row` on the
/// table (Postgres reserves `column`) but goes over the wire as
/// `column`/`row`, matching what the frontend has always sent.
///
/// `sku`, `category`, `serial_number` and `date_code` are immutable after
/// creation; edits may only touch the location, description and status.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    pub id: Uuid,
    #[sqlx(rename = "bin_column")]
    pub column: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub cost: Option<Decimal>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub sku: String,
    pub serial_number: i32,
    pub date_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    // Last so the sqlx `FromRow` derive's `row` binding doesn't shadow the
    // source row for fields read after it (sqlx derive hygiene bug).
    #[sqlx(rename = "bin_row")]
    pub row: String,
}

/// Payload for `POST /api/saveSKU`. Cost and price arrive as strings because
/// the UI submits number inputs verbatim; they are parsed leniently and
/// dropped when unparseable. `serialNumber` and `dateCode` are optional —
/// when absent they are recovered from the code and the current clock.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkuRequest {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub row: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub cost: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub sku: String,
    pub serial_number: Option<i32>,
    pub date_code: Option<String>,
}

/// Payload for `PUT /api/updateSKU/:id`. Only the mutable fields; an
/// omitted `description` or `status` keeps the stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkuRequest {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub row: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Payload for `POST /api/generateSKU`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub row: String,
    pub category: String,
}

/// A candidate code handed back to the user. Nothing is reserved; the code
/// only becomes real when saved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSku {
    pub sku: String,
    pub serial_number: i32,
    pub date_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_serializes_with_frontend_field_names() {
        let record = SkuRecord {
            id: Uuid::nil(),
            column: "A".to_string(),
            row: "1".to_string(),
            category: "cat1".to_string(),
            subcategory: None,
            cost: None,
            price: None,
            description: None,
            sku: "A1-0001-0325-CAT1".to_string(),
            serial_number: 1,
            date_code: "0325".to_string(),
            status: "Active".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["column"], "A");
        assert_eq!(value["row"], "1");
        assert_eq!(value["sku"], "A1-0001-0325-CAT1");
        assert_eq!(value["serialNumber"], 1);
        assert_eq!(value["dateCode"], "0325");
        assert_eq!(value["status"], "Active");
    }

    #[test]
    fn save_payload_tolerates_missing_optional_fields() {
        let req: NewSkuRequest = serde_json::from_str(
            r#"{"category": "cat1", "sku": "A1-0001-0325-CAT1", "cost": ""}"#,
        )
        .unwrap();
        assert_eq!(req.column, "");
        assert_eq!(req.row, "");
        assert_eq!(req.cost.as_deref(), Some(""));
        assert!(req.serial_number.is_none());
        assert!(req.date_code.is_none());
    }
}
