//! Persisted state document, schema v1.
//!
//! One JSON document holds both logical records (`purchases`, the
//! uncommitted draft, and `submittedData`, the committed ledger) so a commit
//! lands as a single write. The document carries a kind marker and a schema
//! version, checked before the full parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, LineItem, LineItemId};

use crate::error::StoreError;

/// Document kind marker.
pub const STATE_KIND: &str = "larder.state";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// A numeric wire value. Older clients wrote quantities and prices as JSON
/// strings; both forms decode, but only through a strict parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Strict parse to a finite number. Anything else is a malformed record;
    /// NaN never comes out of here.
    pub fn parse(&self, field: &'static str) -> Result<f64, DomainError> {
        match self {
            RawNumber::Number(n) if n.is_finite() => Ok(*n),
            RawNumber::Number(n) => Err(DomainError::malformed(field, n.to_string())),
            RawNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| DomainError::malformed(field, s.clone())),
        }
    }
}

/// One line item as stored. Every field the original clients could omit or
/// mistype is tolerated structurally and checked during decode instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LineItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "pricePerKg", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<RawNumber>,
    #[serde(default)]
    pub quantity: Option<RawNumber>,
    #[serde(default)]
    pub price: Option<RawNumber>,
}

impl StoredLineItem {
    /// Canonical stored form of a domain item (all numerics as numbers).
    pub fn encode(item: &LineItem) -> Self {
        Self {
            id: Some(item.id),
            name: Some(item.name.clone()),
            unit_price: item.unit_price.map(RawNumber::Number),
            quantity: Some(RawNumber::Number(item.quantity)),
            price: Some(RawNumber::Number(item.price)),
        }
    }

    /// Decode into a validated domain item. Records written before ids
    /// existed get a fresh one.
    pub fn decode(&self) -> Result<LineItem, DomainError> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => return Err(DomainError::malformed("name", "missing")),
        };
        let quantity = require(&self.quantity, "quantity")?.parse("quantity")?;
        let price = require(&self.price, "price")?.parse("price")?;
        let unit_price = match &self.unit_price {
            Some(raw) => Some(raw.parse("pricePerKg")?),
            None => None,
        };
        let id = self.id.unwrap_or_else(LineItemId::new);
        LineItem::with_id(id, name, unit_price, quantity, price)
    }
}

fn require<'a>(
    raw: &'a Option<RawNumber>,
    field: &'static str,
) -> Result<&'a RawNumber, DomainError> {
    raw.as_ref()
        .ok_or_else(|| DomainError::malformed(field, "missing"))
}

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub kind: String,
    pub schema_version: u32,
    pub updated_at: DateTime<Utc>,
    pub purchases: Vec<StoredLineItem>,
    #[serde(rename = "submittedData")]
    pub submitted: Vec<StoredLineItem>,
}

impl PersistedState {
    /// A fresh, empty document (store initialization).
    pub fn empty() -> Self {
        Self::from_parts(&[], &[])
    }

    /// Canonical document for the given lists.
    pub fn from_parts(purchases: &[LineItem], submitted: &[LineItem]) -> Self {
        Self {
            kind: STATE_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            updated_at: Utc::now(),
            purchases: purchases.iter().map(StoredLineItem::encode).collect(),
            submitted: submitted.iter().map(StoredLineItem::encode).collect(),
        }
    }

    /// Serialize to the canonical newline-free form.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::Encode)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    schema_version: u32,
}

/// Parse a state document, checking the envelope before the full decode.
pub fn parse_document(text: &str) -> Result<PersistedState, StoreError> {
    let envelope: Envelope = serde_json::from_str(text).map_err(StoreError::Decode)?;
    if envelope.kind != STATE_KIND {
        return Err(StoreError::InvalidKind {
            found: envelope.kind,
        });
    }
    if envelope.schema_version != SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(envelope.schema_version));
    }
    serde_json::from_str(text).map_err(StoreError::Decode)
}

/// A record excluded at load time by strict decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Which document list the record sat in.
    pub section: &'static str,
    /// Zero-based position within that list.
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

/// Result of decoding one document list.
#[derive(Debug, Clone, Default)]
pub struct DecodedRecords {
    pub items: Vec<LineItem>,
    pub rejected: Vec<RejectedRecord>,
}

/// Decode a list record by record. Failures are excluded and reported, not
/// propagated; good records around them survive.
pub fn decode_records(records: &[StoredLineItem], section: &'static str) -> DecodedRecords {
    let mut decoded = DecodedRecords::default();
    for (index, record) in records.iter().enumerate() {
        match record.decode() {
            Ok(item) => decoded.items.push(item),
            Err(err) => decoded.rejected.push(RejectedRecord {
                section,
                index,
                name: record.name.clone(),
                reason: err.to_string(),
            }),
        }
    }
    decoded
}
