use serde::{Deserialize, Serialize};

/// Per-kind tally of one upload pass. Failed and skipped rows stay
/// `Unsynced` and are retried on the next pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub applications_synced: u32,
    pub applications_failed: u32,
    pub images_synced: u32,
    pub images_failed: u32,
    pub images_skipped: u32,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.applications_failed == 0 && self.images_failed == 0
    }
}

/// Synced-over-total rows for one application and its images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    pub synced: u32,
    pub total: u32,
}

impl SyncCounts {
    /// Advisory completion indicator polled by UI collaborators. An
    /// application with no linked rows reads 0, not 100.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.synced as f64) * 100.0 / (self.total as f64)).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_zero_without_rows() {
        assert_eq!(SyncCounts { synced: 0, total: 0 }.percentage(), 0);
    }

    #[test]
    fn percentage_is_hundred_when_everything_synced() {
        assert_eq!(SyncCounts { synced: 4, total: 4 }.percentage(), 100);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(SyncCounts { synced: 1, total: 3 }.percentage(), 33);
        assert_eq!(SyncCounts { synced: 2, total: 3 }.percentage(), 67);
        assert_eq!(SyncCounts { synced: 1, total: 4 }.percentage(), 25);
    }

    #[test]
    fn report_is_clean_only_without_failures() {
        let mut report = UploadReport {
            applications_synced: 2,
            images_synced: 3,
            images_skipped: 1,
            ..Default::default()
        };
        assert!(report.is_clean());

        report.images_failed = 1;
        assert!(!report.is_clean());
    }
}
