pub mod client;

pub use client::{UploadRequest, Uploader};
