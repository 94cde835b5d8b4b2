use chrono::{DateTime, Utc};
use role_gate::Action;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ResourceType;

/// Keys the server owns on every document; client bodies cannot set them.
pub const RESERVED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Events,
    Offers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Events => "events",
            Collection::Offers => "offers",
        }
    }

    /// Action required to create or update a document
    pub fn write_action(&self) -> Action {
        match self {
            Collection::Products => Action::ManageProducts,
            Collection::Events => Action::ManageEvents,
            Collection::Offers => Action::ManageOffers,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            Collection::Products => ResourceType::Product,
            Collection::Events => ResourceType::Event,
            Collection::Offers => ResourceType::Offer,
        }
    }

    /// Listing order: events soonest first, everything else newest first.
    pub fn order_clause(&self) -> &'static str {
        match self {
            Collection::Events => "data->>'eventDate' ASC NULLS LAST, created_at ASC",
            Collection::Products | Collection::Offers => "created_at DESC",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored document as returned to clients: its fields plus id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        let fields = match row.data {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Self {
            id: row.id,
            fields,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Drop server-owned keys from a client body.
pub fn strip_reserved(mut body: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_KEYS {
        body.remove(key);
    }
    body
}
