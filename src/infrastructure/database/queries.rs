pub(super) const INSERT_APPLICATION: &str = r#"
    INSERT INTO applications (
        application_id,
        electrician_id,
        status,
        remarks,
        fields,
        sync_status,
        created_at,
        updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub(super) const SELECT_APPLICATION_BY_ID: &str = r#"
    SELECT application_id, electrician_id, status, remarks, fields,
           sync_status, created_at, updated_at
    FROM applications
    WHERE application_id = ?1
"#;

pub(super) const SELECT_APPLICATIONS_BY_OWNER: &str = r#"
    SELECT application_id, electrician_id, status, remarks, fields,
           sync_status, created_at, updated_at
    FROM applications
    WHERE electrician_id = ?1
    ORDER BY created_at DESC
"#;

pub(super) const SELECT_OWNER_STATUS_INDEX: &str = r#"
    SELECT application_id, status
    FROM applications
    WHERE electrician_id = ?1
"#;

pub(super) const SELECT_UNSYNCED_APPLICATIONS: &str = r#"
    SELECT application_id, electrician_id, status, remarks, fields,
           sync_status, created_at, updated_at
    FROM applications
    WHERE sync_status = ?1
    ORDER BY created_at ASC
"#;

pub(super) const UPDATE_APPLICATION_FIELDS: &str = r#"
    UPDATE applications
    SET fields = ?2,
        sync_status = ?3,
        updated_at = ?4
    WHERE application_id = ?1
"#;

pub(super) const APPLY_REMOTE_CORRECTION: &str = r#"
    UPDATE applications
    SET status = ?2,
        remarks = ?3,
        sync_status = ?4,
        updated_at = ?5
    WHERE application_id = ?1
"#;

pub(super) const ENDORSE_APPLICATION: &str = r#"
    UPDATE applications
    SET status = ?2,
        sync_status = ?3,
        updated_at = ?4
    WHERE application_id = ?1
      AND status != ?2
"#;

pub(super) const UPDATE_APPLICATION_SYNC_STATUS: &str = r#"
    UPDATE applications
    SET sync_status = ?2
    WHERE application_id = ?1
"#;

pub(super) const DELETE_APPLICATION: &str = r#"
    DELETE FROM applications
    WHERE application_id = ?1
"#;

pub(super) const INSERT_IMAGE: &str = r#"
    INSERT INTO images (
        image_url,
        reference_id,
        image_type,
        sync_status,
        created_at
    ) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub(super) const SELECT_IMAGES_BY_REFERENCE: &str = r#"
    SELECT image_url, reference_id, image_type, sync_status, created_at
    FROM images
    WHERE reference_id = ?1
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_UNSYNCED_IMAGES: &str = r#"
    SELECT image_url, reference_id, image_type, sync_status, created_at
    FROM images
    WHERE sync_status = ?1
    ORDER BY created_at ASC
"#;

pub(super) const SELECT_IMAGE_URLS_BY_REFERENCE: &str = r#"
    SELECT image_url
    FROM images
    WHERE reference_id = ?1
"#;

pub(super) const UPDATE_IMAGE_SYNC_STATUS: &str = r#"
    UPDATE images
    SET sync_status = ?2
    WHERE image_url = ?1
"#;

pub(super) const DELETE_IMAGE: &str = r#"
    DELETE FROM images
    WHERE image_url = ?1
"#;

pub(super) const DELETE_IMAGES_BY_REFERENCE: &str = r#"
    DELETE FROM images
    WHERE reference_id = ?1
"#;

pub(super) const SELECT_SYNC_COUNTS: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM applications WHERE application_id = ?1)
      + (SELECT COUNT(*) FROM images WHERE reference_id = ?1) AS total,
        (SELECT COUNT(*) FROM applications WHERE application_id = ?1 AND sync_status = ?2)
      + (SELECT COUNT(*) FROM images WHERE reference_id = ?1 AND sync_status = ?2) AS synced
"#;

pub(super) const SELECT_HAS_PENDING: &str = r#"
    SELECT EXISTS(SELECT 1 FROM applications WHERE sync_status = ?1)
        OR EXISTS(SELECT 1 FROM images WHERE sync_status = ?1)
"#;
