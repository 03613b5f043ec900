pub mod application;
pub mod image;
pub mod sync_report;

pub use application::MeteringApplication;
pub use image::ApplicationImage;
pub use sync_report::{SyncCounts, UploadReport};
