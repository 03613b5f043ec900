pub mod application_store;
pub mod image_files;
pub mod remote_gateway;

pub use application_store::ApplicationStore;
pub use image_files::ImageFileStore;
pub use remote_gateway::{RemoteApplication, RemoteGateway, RemoteStatus};
