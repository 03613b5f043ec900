pub mod image_files;

pub use image_files::LocalImageFiles;
