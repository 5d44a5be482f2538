use tracing::{debug, info};

use super::{repo::LocationStore, repo_types::LocationSample};
use crate::error::{AppError, AppResult};

pub const MAX_RECENT: i64 = 10;

fn check_coordinate(name: &str, value: Option<f64>, bound: f64) -> AppResult<f64> {
    let value = value.ok_or_else(|| AppError::validation(format!("{name} is required")))?;
    if !value.is_finite() {
        return Err(AppError::validation(format!("{name} must be a finite number")));
    }
    if !(-bound..=bound).contains(&value) {
        return Err(AppError::validation(format!(
            "{name} must be between -{bound} and {bound}"
        )));
    }
    Ok(value)
}

pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> AppResult<(f64, f64)> {
    Ok((
        check_coordinate("latitude", latitude, 90.0)?,
        check_coordinate("longitude", longitude, 180.0)?,
    ))
}

pub async fn submit(
    store: &dyn LocationStore,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> AppResult<LocationSample> {
    let (latitude, longitude) = validate_coordinates(latitude, longitude)?;
    let sample = store.insert(latitude, longitude).await?;
    info!(location_id = %sample.id, latitude, longitude, "location stored");
    Ok(sample)
}

/// Returns at most `limit` rows; `limit` is clamped to `0..=MAX_RECENT` and `None` means the maximum.
pub async fn list_recent(store: &dyn LocationStore, limit: Option<i64>) -> AppResult<Vec<LocationSample>> {
    let limit = limit.unwrap_or(MAX_RECENT).clamp(0, MAX_RECENT);
    let rows = store.recent(limit).await?;
    debug!(limit, returned = rows.len(), "recent locations");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn valid_points_are_stored_and_listed_first() {
        let store = MemoryStore::default();
        for (lat, lon) in [
            (0.0, 0.0),
            (90.0, 180.0),
            (-90.0, -180.0),
            (37.77, -122.41),
        ] {
            let sample = submit(&store, Some(lat), Some(lon)).await.unwrap();
            let recent = list_recent(&store, None).await.unwrap();
            assert_eq!(recent[0].id, sample.id);
            assert_eq!(recent[0].latitude, lat);
            assert_eq!(recent[0].longitude, lon);
        }
    }

    #[tokio::test]
    async fn invalid_points_are_rejected_and_not_persisted() {
        let store = MemoryStore::default();
        for (lat, lon) in [
            (Some(91.0), Some(0.0)),
            (Some(0.0), Some(181.0)),
            (Some(-90.5), Some(0.0)),
            (Some(0.0), Some(-180.01)),
            (Some(f64::NAN), Some(0.0)),
            (Some(0.0), Some(f64::INFINITY)),
            (Some(f64::NEG_INFINITY), Some(0.0)),
            (None, Some(0.0)),
            (Some(0.0), None),
        ] {
            let err = submit(&store, lat, lon).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{lat:?},{lon:?}");
        }
        assert!(list_recent(&store, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_is_capped_and_strictly_descending() {
        let store = MemoryStore::default();
        for i in 0..15 {
            submit(&store, Some(i as f64), Some(0.0)).await.unwrap();
        }
        let recent = list_recent(&store, Some(10)).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].latitude, 14.0);
        assert!(recent.windows(2).all(|w| w[0].created_at > w[1].created_at));

        assert_eq!(list_recent(&store, Some(50)).await.unwrap().len(), 10);
        assert_eq!(list_recent(&store, Some(3)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn recent_never_exceeds_requested_limit() {
        let store = MemoryStore::default();
        for i in 0..3 {
            submit(&store, Some(i as f64), Some(0.0)).await.unwrap();
        }
        assert!(list_recent(&store, Some(0)).await.unwrap().is_empty());
        assert!(list_recent(&store, Some(-5)).await.unwrap().is_empty());
        assert_eq!(list_recent(&store, Some(2)).await.unwrap().len(), 2);
        assert_eq!(list_recent(&store, None).await.unwrap().len(), 3);
    }
}
