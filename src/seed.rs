use crate::{db::Db, errors::StoreError, models::channel::NewChannel, models::group::Group};
use std::collections::HashMap;

// Home page channels
pub const HOME_PAGE_CHANNELS: &[(&str, &str)] = &[
    ("Announcements", "General"),
    ("Events", "General"),
    ("FAQ", "Support"),
    ("Help Desk", "Support"),
];

// Shared interest channels
pub const SHARED_INTEREST_CHANNELS: &[(&str, &str)] = &[
    ("Penpal Letters", "Limitless Connections"),
    ("Game vs Poway", "DNHS Football"),
    ("Game vs Westview", "DNHS Football"),
    ("Math", "School Subjects"),
    ("English", "School Subjects"),
    ("Artist", "Music"),
    ("Music Genre", "Music"),
    ("Humor", "Satire"),
    ("Memes", "Satire"),
    ("Irony", "Satire"),
    ("Cyber Patriots", "Activity Hub"),
    ("Robotics", "Activity Hub"),
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
}

/// Ensures the sample groups exist so a fresh database is seedable end to
/// end. Existing rows are left alone.
pub async fn seed_groups(db: &Db) -> Result<(), StoreError> {
    for (_, group_name) in HOME_PAGE_CHANNELS.iter().chain(SHARED_INTEREST_CHANNELS) {
        sqlx::query("INSERT OR IGNORE INTO groups(name) VALUES (?)")
            .bind(group_name)
            .execute(&db.0)
            .await?;
    }
    Ok(())
}

/// Resolves every referenced group name to its id up front. A missing group
/// is a hard error here, before any channel is constructed.
pub async fn resolve_groups(
    db: &Db,
    names: &[&str],
) -> Result<HashMap<String, i64>, StoreError> {
    let mut resolved = HashMap::new();
    for name in names {
        if resolved.contains_key(*name) {
            continue;
        }
        let group = Group::find_by_name(db, name)
            .await?
            .ok_or_else(|| StoreError::UnknownGroup(name.to_string()))?;
        resolved.insert(group.name, group.id);
    }
    Ok(resolved)
}

/// Persists one channel per pair, in list order. A uniqueness conflict on a
/// single row is logged and skipped; any other error aborts the rest of the
/// batch.
pub async fn seed_channels(
    db: &Db,
    pairs: &[(&str, i64)],
) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();
    for (name, group_id) in pairs {
        match NewChannel::new(*name, *group_id).insert(db).await {
            Ok(channel) => {
                log::info!("record created: {channel}");
                report.created += 1;
            }
            Err(StoreError::Conflict) => {
                log::warn!("record exists, skipping: {name}");
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}

/// One-shot seeding routine: ensure sample groups, resolve their ids, then
/// insert the sample channels.
pub async fn run(db: &Db) -> Result<SeedReport, StoreError> {
    seed_groups(db).await?;

    let pairs: Vec<(&str, &str)> = HOME_PAGE_CHANNELS
        .iter()
        .chain(SHARED_INTEREST_CHANNELS)
        .copied()
        .collect();
    let group_names: Vec<&str> = pairs.iter().map(|(_, g)| *g).collect();
    let groups = resolve_groups(db, &group_names).await?;

    let mut resolved = Vec::with_capacity(pairs.len());
    for (channel_name, group_name) in &pairs {
        let group_id = groups
            .get(*group_name)
            .copied()
            .ok_or_else(|| StoreError::UnknownGroup(group_name.to_string()))?;
        resolved.push((*channel_name, group_id));
    }
    seed_channels(db, &resolved).await
}
