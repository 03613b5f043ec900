use super::*;
use crate::domain::value_objects::ImageKind;
use crate::infrastructure::storage::LocalImageFiles;
use chrono::DateTime;
use serde_json::json;

async fn store() -> SqliteApplicationStore {
    store_with(Arc::new(LocalImageFiles::new())).await
}

async fn store_with(files: Arc<dyn ImageFileStore>) -> SqliteApplicationStore {
    let pool = ConnectionPool::from_memory().await.unwrap();
    pool.migrate().await.unwrap();
    SqliteApplicationStore::new(pool, files)
}

/// Millisecond-precision timestamps so a stored row round-trips equal.
fn application(id: &str) -> MeteringApplication {
    let at = DateTime::from_timestamp_millis(1_755_000_000_000).unwrap();
    MeteringApplication {
        id: ApplicationId::new(id.to_string()).unwrap(),
        electrician_id: ElectricianId::new("EL-19880001".to_string()).unwrap(),
        status: LifecycleStatus::Pending,
        remarks: None,
        fields: FieldMap::from_value(json!({"plot_no": "12", "meter_no": "M-9"})).unwrap(),
        sync_status: SyncStatus::Unsynced,
        created_at: at,
        updated_at: at,
    }
}

fn image(url: &str, reference: &str) -> ApplicationImage {
    ApplicationImage {
        image_url: url.to_string(),
        reference_id: ApplicationId::new(reference.to_string()).unwrap(),
        kind: ImageKind::new("Meterbase".to_string()).unwrap(),
        sync_status: SyncStatus::Unsynced,
        created_at: DateTime::from_timestamp_millis(1_755_000_000_000).unwrap(),
    }
}

struct FailingFiles;

impl ImageFileStore for FailingFiles {
    fn read(&self, _path: &str) -> Result<Option<Vec<u8>>, AppError> {
        Ok(None)
    }

    fn remove(&self, _path: &str) -> Result<(), AppError> {
        Err(AppError::Storage("disk unavailable".to_string()))
    }
}

#[tokio::test]
async fn insert_and_fetch_round_trip() {
    let store = store().await;
    let original = application("APID-000112345678");

    store.insert_application(&original).await.unwrap();
    let fetched = store.application(&original.id).await.unwrap().unwrap();

    assert_eq!(fetched, original);
}

#[tokio::test]
async fn duplicate_id_is_a_constraint_violation() {
    let store = store().await;
    let app = application("APID-000112345678");

    store.insert_application(&app).await.unwrap();
    let err = store.insert_application(&app).await.unwrap_err();

    assert!(matches!(err, AppError::Constraint(_)));
}

#[tokio::test]
async fn applications_for_owner_are_newest_first() {
    let store = store().await;
    let mut older = application("APID-000100000001");
    older.created_at = DateTime::from_timestamp_millis(1_000).unwrap();
    let mut newer = application("APID-000100000002");
    newer.created_at = DateTime::from_timestamp_millis(2_000).unwrap();
    let mut foreign = application("APID-000200000003");
    foreign.electrician_id = ElectricianId::new("EL-19880002".to_string()).unwrap();

    store.insert_application(&older).await.unwrap();
    store.insert_application(&newer).await.unwrap();
    store.insert_application(&foreign).await.unwrap();

    let owner = ElectricianId::new("EL-19880001".to_string()).unwrap();
    let listed = store.applications_for_owner(&owner).await.unwrap();

    let ids: Vec<&str> = listed.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["APID-000100000002", "APID-000100000001"]);
}

#[tokio::test]
async fn owner_status_index_pairs_ids_with_statuses() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();

    let owner = ElectricianId::new("EL-19880001".to_string()).unwrap();
    let index = store.owner_status_index(&owner).await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index[0].0.as_str(), "APID-000112345678");
    assert_eq!(index[0].1, LifecycleStatus::Pending);
}

#[tokio::test]
async fn updating_fields_overwrites_and_dirties_the_row() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store.mark_application_synced(&app.id).await.unwrap();

    let replacement = FieldMap::from_value(json!({"plot_no": "14"})).unwrap();
    let matched = store
        .update_application_fields(&app.id, &replacement)
        .await
        .unwrap();
    assert!(matched);

    let row = store.application(&app.id).await.unwrap().unwrap();
    assert_eq!(row.fields.get("plot_no"), Some(&json!("14")));
    assert!(row.fields.get("meter_no").is_none());
    assert_eq!(row.sync_status, SyncStatus::Unsynced);
    assert!(row.updated_at > app.updated_at);
}

#[tokio::test]
async fn updating_fields_of_a_missing_row_matches_nothing() {
    let store = store().await;
    let absent = ApplicationId::new("APID-000199999999".to_string()).unwrap();
    let fields = FieldMap::from_value(json!({"plot_no": "14"})).unwrap();

    let matched = store
        .update_application_fields(&absent, &fields)
        .await
        .unwrap();
    assert!(!matched);
}

#[tokio::test]
async fn remote_correction_replaces_status_and_remarks_only() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store.mark_application_synced(&app.id).await.unwrap();

    let matched = store
        .apply_remote_correction(&app.id, LifecycleStatus::Approved, Some("ok"))
        .await
        .unwrap();
    assert!(matched);

    let row = store.application(&app.id).await.unwrap().unwrap();
    assert_eq!(row.status, LifecycleStatus::Approved);
    assert_eq!(row.remarks.as_deref(), Some("ok"));
    assert_eq!(row.sync_status, SyncStatus::Unsynced);
    assert_eq!(row.fields, app.fields);
}

#[tokio::test]
async fn remote_correction_without_a_local_row_is_a_no_op() {
    let store = store().await;
    let absent = ApplicationId::new("APID-000199999999".to_string()).unwrap();

    let matched = store
        .apply_remote_correction(&absent, LifecycleStatus::Rejected, None)
        .await
        .unwrap();
    assert!(!matched);
}

#[tokio::test]
async fn endorsement_transitions_exactly_once() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();

    assert!(store.endorse_application(&app.id).await.unwrap());
    let row = store.application(&app.id).await.unwrap().unwrap();
    assert_eq!(row.status, LifecycleStatus::Endorsed);
    assert_eq!(row.sync_status, SyncStatus::Unsynced);

    assert!(!store.endorse_application(&app.id).await.unwrap());

    let absent = ApplicationId::new("APID-000199999999".to_string()).unwrap();
    assert!(!store.endorse_application(&absent).await.unwrap());
}

#[tokio::test]
async fn deleting_an_application_cascades_rows_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("mb_01.jpg");
    let second = dir.path().join("sig_02.png");
    std::fs::write(&first, b"jpeg").unwrap();
    std::fs::write(&second, b"png").unwrap();

    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store
        .insert_images(&[
            image(first.to_str().unwrap(), app.id.as_str()),
            image(second.to_str().unwrap(), app.id.as_str()),
        ])
        .await
        .unwrap();

    store.delete_application(&app.id).await.unwrap();

    assert!(store.application(&app.id).await.unwrap().is_none());
    assert!(store
        .images_for_application(&app.id)
        .await
        .unwrap()
        .is_empty());
    assert!(!first.exists());
    assert!(!second.exists());
}

#[tokio::test]
async fn a_file_failure_rolls_the_whole_delete_back() {
    let store = store_with(Arc::new(FailingFiles)).await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store
        .insert_images(&[image("/data/images/mb_01.jpg", app.id.as_str())])
        .await
        .unwrap();

    let err = store.delete_application(&app.id).await.unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));

    assert!(store.application(&app.id).await.unwrap().is_some());
    assert_eq!(
        store.images_for_application(&app.id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn image_batches_insert_all_or_nothing() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();

    let duplicate = [
        image("/data/images/mb_01.jpg", app.id.as_str()),
        image("/data/images/mb_01.jpg", app.id.as_str()),
    ];
    let err = store.insert_images(&duplicate).await.unwrap_err();
    assert!(matches!(err, AppError::Constraint(_)));

    assert!(store
        .images_for_application(&app.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_an_image_survives_a_file_failure() {
    let store = store_with(Arc::new(FailingFiles)).await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store
        .insert_images(&[image("/data/images/mb_01.jpg", app.id.as_str())])
        .await
        .unwrap();

    store.delete_image("/data/images/mb_01.jpg").await.unwrap();

    assert!(store
        .images_for_application(&app.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unsynced_listings_skip_clean_rows() {
    let store = store().await;
    let dirty = application("APID-000100000001");
    let clean = application("APID-000100000002");
    store.insert_application(&dirty).await.unwrap();
    store.insert_application(&clean).await.unwrap();
    store.mark_application_synced(&clean.id).await.unwrap();

    store
        .insert_images(&[
            image("/data/images/mb_01.jpg", dirty.id.as_str()),
            image("/data/images/sig_02.png", clean.id.as_str()),
        ])
        .await
        .unwrap();
    store
        .mark_image_synced("/data/images/sig_02.png")
        .await
        .unwrap();

    let applications = store.unsynced_applications().await.unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].id, dirty.id);

    let images = store.unsynced_images().await.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_url, "/data/images/mb_01.jpg");
}

#[tokio::test]
async fn sync_counts_cover_the_application_and_its_images() {
    let store = store().await;
    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    store
        .insert_images(&[
            image("/data/images/mb_01.jpg", app.id.as_str()),
            image("/data/images/sig_02.png", app.id.as_str()),
        ])
        .await
        .unwrap();

    let counts = store.sync_counts(&app.id).await.unwrap();
    assert_eq!((counts.synced, counts.total), (0, 3));

    store.mark_application_synced(&app.id).await.unwrap();
    store
        .mark_image_synced("/data/images/mb_01.jpg")
        .await
        .unwrap();

    let counts = store.sync_counts(&app.id).await.unwrap();
    assert_eq!((counts.synced, counts.total), (2, 3));

    let absent = ApplicationId::new("APID-000199999999".to_string()).unwrap();
    let counts = store.sync_counts(&absent).await.unwrap();
    assert_eq!((counts.synced, counts.total), (0, 0));
}

#[tokio::test]
async fn pending_flag_tracks_dirty_rows_of_both_tables() {
    let store = store().await;
    assert!(!store.has_pending_rows().await.unwrap());

    let app = application("APID-000112345678");
    store.insert_application(&app).await.unwrap();
    assert!(store.has_pending_rows().await.unwrap());

    store.mark_application_synced(&app.id).await.unwrap();
    assert!(!store.has_pending_rows().await.unwrap());

    store
        .insert_images(&[image("/data/images/mb_01.jpg", app.id.as_str())])
        .await
        .unwrap();
    assert!(store.has_pending_rows().await.unwrap());

    store
        .mark_image_synced("/data/images/mb_01.jpg")
        .await
        .unwrap();
    assert!(!store.has_pending_rows().await.unwrap());
}
