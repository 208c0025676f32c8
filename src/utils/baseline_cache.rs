use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::Arc;
use std::time::Duration;

use crate::model::baseline::SectorCost;

/// baseline id => its sector list.
///
/// This is the working copy the selection toggle mutates optimistically;
/// on a failed persist the pre-toggle snapshot is written back.
pub static SECTOR_CACHE: Lazy<Cache<u64, Arc<Vec<SectorCost>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(3600)) // 1h TTL
        .build()
});

/// Current working copy for a baseline, if cached
pub async fn cached_sectors(baseline_id: u64) -> Option<Arc<Vec<SectorCost>>> {
    SECTOR_CACHE.get(&baseline_id).await
}

/// Replace the working copy for a baseline
pub async fn store_sectors(baseline_id: u64, sectors: Vec<SectorCost>) {
    SECTOR_CACHE.insert(baseline_id, Arc::new(sectors)).await;
}

/// Drop the working copy; the next read reloads from the database
pub async fn invalidate(baseline_id: u64) {
    SECTOR_CACHE.invalidate(&baseline_id).await;
}

/// Load one baseline's sectors from the database and cache them
pub async fn load_sectors(
    pool: &MySqlPool,
    baseline_id: u64,
) -> Result<Arc<Vec<SectorCost>>, sqlx::Error> {
    let sectors = sqlx::query_as::<_, SectorCost>(
        r#"
        SELECT name, cost_centavos, active
        FROM baseline_sectors
        WHERE baseline_id = ?
        ORDER BY id
        "#,
    )
    .bind(baseline_id)
    .fetch_all(pool)
    .await?;

    let sectors = Arc::new(sectors);
    SECTOR_CACHE.insert(baseline_id, sectors.clone()).await;
    Ok(sectors)
}

/// Cached sector list, falling back to the database on a miss
pub async fn sectors_or_load(
    pool: &MySqlPool,
    baseline_id: u64,
) -> Result<Arc<Vec<SectorCost>>, sqlx::Error> {
    if let Some(sectors) = cached_sectors(baseline_id).await {
        return Ok(sectors);
    }
    load_sectors(pool, baseline_id).await
}

/// Warm the cache with the most recent baselines (streamed + batched)
pub async fn warmup_sector_cache(
    pool: &MySqlPool,
    recent: u32,
    batch_size: usize,
) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (u64,)>(
        r#"
        SELECT id
        FROM baselines
        ORDER BY created_at DESC
        LIMIT ?
        "#,
    )
    .bind(recent)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let (baseline_id,) = row?;
        batch.push(baseline_id);
        total_count += 1;

        if batch.len() >= batch_size {
            load_batch(pool, &batch).await;
            batch.clear();
        }
    }

    // Load any remaining baselines
    if !batch.is_empty() {
        load_batch(pool, &batch).await;
    }

    log::info!(
        "Baseline sector cache warmup complete: {} baselines",
        total_count
    );

    Ok(())
}

/// Load a batch of baselines concurrently
async fn load_batch(pool: &MySqlPool, baseline_ids: &[u64]) {
    let futures: Vec<_> = baseline_ids
        .iter()
        .map(|id| load_sectors(pool, *id))
        .collect();

    for result in futures::future::join_all(futures).await {
        if let Err(e) = result {
            log::warn!("Failed to warm baseline sectors: {}", e);
        }
    }
}
