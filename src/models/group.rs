use crate::{db::Db, errors::StoreError};
use serde::{Deserialize, Serialize};
use sqlx::Row;

/// Upstream collaborator. Groups are owned elsewhere; this module only needs
/// to resolve them by exact name.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

impl Group {
    pub async fn find_by_name(db: &Db, name: &str) -> Result<Option<Group>, StoreError> {
        let row = sqlx::query("SELECT id, name FROM groups WHERE name = ?")
            .bind(name)
            .fetch_optional(&db.0)
            .await?;
        Ok(row.map(|r| Group {
            id: r.get("id"),
            name: r.get("name"),
        }))
    }
}
