use serde::{Deserialize, Serialize};

/// Core part attributes. `location` is the bin code the part lives in
/// (e.g. `"3F"`), or a free-form multi-occupant label containing `"bin"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartInfo {
    pub part_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub count: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_type: Option<String>,
}

/// Descriptive attributes that never participate in ledger decisions.
///
/// `in_use` is `None` when the part is available; a consuming flow sets it
/// to a label naming what the stock was taken for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasheet_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_use: Option<String>,
}

/// A catalogued component. Identity is the normalized part number; the
/// catalogue holds at most one active record per identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub part_info: PartInfo,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Component {
    pub fn new(part_number: impl Into<String>, count: i64) -> Self {
        Self {
            part_info: PartInfo {
                part_number: part_number.into(),
                manufacturer_number: None,
                location: None,
                count,
                part_type: None,
            },
            metadata: Metadata::default(),
        }
    }

    /// Identity key: trimmed, case-folded part number.
    pub fn normalized_part_number(&self) -> String {
        normalize_part_number(&self.part_info.part_number)
    }
}

pub fn normalize_part_number(part_number: &str) -> String {
    part_number.trim().to_lowercase()
}

/// One row of a parsed bill of materials. Produced by an external BOM
/// reader (see [`crate::lookup::BomSource`]); the ledger consumes these
/// without ever touching the source file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomRow {
    pub digikey: String,
    pub quantity: i64,
    pub found: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_count: Option<i64>,
}
