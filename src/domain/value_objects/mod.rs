pub mod application_id;
pub mod electrician_id;
pub mod field_map;
pub mod image_kind;
pub mod lifecycle_status;
pub mod sync_status;

pub use application_id::ApplicationId;
pub use electrician_id::ElectricianId;
pub use field_map::{diff_objects, FieldMap};
pub use image_kind::ImageKind;
pub use lifecycle_status::LifecycleStatus;
pub use sync_status::SyncStatus;
