#![allow(unused_imports)]

pub mod entities;
pub mod value_objects;

pub use entities::{ApplicationImage, MeteringApplication, SyncCounts, UploadReport};
pub use value_objects::{
    ApplicationId, ElectricianId, FieldMap, ImageKind, LifecycleStatus, SyncStatus,
};
