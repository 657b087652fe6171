use serde::{Deserialize, Serialize};

/// Which of the two registry sets a value belongs to. Horizontal values are
/// bin columns, vertical values are bin rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Horizontal,
    Vertical,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Horizontal => "horizontal",
            LocationKind::Vertical => "vertical",
        }
    }

    /// The skus column that references this kind of location, for the
    /// in-use check before removal.
    pub fn sku_column(&self) -> &'static str {
        match self {
            LocationKind::Horizontal => "bin_column",
            LocationKind::Vertical => "bin_row",
        }
    }
}

/// Body of `POST /api/addLocation` and `POST /api/removeLocation`. The kind
/// field is called `type` on the wire, as the frontend has always sent it.
#[derive(Debug, Deserialize)]
pub struct LocationChange {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub value: String,
}

/// Response of `GET /api/getLocations`: both registry sets in insertion
/// order.
#[derive(Debug, Default, Serialize)]
pub struct LocationSets {
    pub horizontal: Vec<String>,
    pub vertical: Vec<String>,
}
