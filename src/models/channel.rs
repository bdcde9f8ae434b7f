use crate::{db::Db, errors::StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::Row;
use std::fmt;

/// A channel that has not been persisted yet. The id is assigned by the
/// store on insert, never by the caller.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub attributes: Map<String, Value>,
    pub group_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    pub attributes: Map<String, Value>,
    pub group_id: i64,
}

impl NewChannel {
    pub fn new(name: impl Into<String>, group_id: i64) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
            group_id,
        }
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Writes the record inside a single transaction and returns it with its
    /// assigned id. A dropped transaction rolls back, so any failure leaves
    /// the table untouched. A `(group_id, name)` duplicate surfaces as
    /// `StoreError::Conflict`; a missing group fails the foreign key check.
    pub async fn insert(self, db: &Db) -> Result<Channel, StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        let attributes_json = Value::Object(self.attributes.clone()).to_string();

        let mut tx = db.0.begin().await?;
        let res = sqlx::query("INSERT INTO channels(name, attributes, group_id) VALUES (?, ?, ?)")
            .bind(&self.name)
            .bind(&attributes_json)
            .bind(self.group_id)
            .execute(&mut *tx)
            .await?;
        let id = res.last_insert_rowid();
        tx.commit().await?;

        Ok(Channel {
            id,
            name: self.name,
            attributes: self.attributes,
            group_id: self.group_id,
        })
    }
}

impl Channel {
    pub async fn fetch(db: &Db, id: i64) -> Result<Option<Channel>, StoreError> {
        let row = sqlx::query("SELECT id, name, attributes, group_id FROM channels WHERE id = ?")
            .bind(id)
            .fetch_optional(&db.0)
            .await?;
        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };
        let attributes = match row.get::<Option<String>, _>("attributes") {
            Some(raw) => match serde_json::from_str::<Value>(&raw)? {
                Value::Object(map) => map,
                _ => return Err(StoreError::InvalidAttributes(serde::de::Error::custom(
                    "attributes column is not a JSON object",
                ))),
            },
            None => Map::new(),
        };
        Ok(Some(Channel {
            id: row.get("id"),
            name: row.get("name"),
            attributes,
            group_id: row.get("group_id"),
        }))
    }

    /// Snapshot of the record as a JSON object. Pure read.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "attributes": self.attributes,
            "group_id": self.group_id,
        })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde_json's default map is ordered by key, so this is deterministic
        write!(
            f,
            "Channel(id={}, name={}, group_id={}, attributes={})",
            self.id,
            self.name,
            self.group_id,
            Value::Object(self.attributes.clone())
        )
    }
}
