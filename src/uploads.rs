//! Photos uploaded with a complaint.
//!
//! Bytes stay in memory for the life of the process. A complaint refers to
//! a photo by its opaque path `/uploads/{handle}`, which is also the route
//! that serves it.

use std::collections::HashMap;
use std::sync::RwLock;

use actix_web::web::Bytes;
use rand::Rng;

pub const UPLOAD_PATH_PREFIX: &str = "/uploads/";

/// Content types a citizen may upload.
pub const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub content_type: String,
    pub data: Bytes,
}

pub trait ImageBlobStore: Send + Sync {
    /// Keep `image` and return the reference a complaint stores for it.
    fn put(&self, image: StoredImage) -> String;

    fn get(&self, handle: &str) -> Option<StoredImage>;

    fn contains(&self, handle: &str) -> bool {
        self.get(handle).is_some()
    }
}

/// Handle part of an upload reference, if `src` is one.
pub fn handle_from_ref(src: &str) -> Option<&str> {
    src.strip_prefix(UPLOAD_PATH_PREFIX)
        .filter(|h| !h.is_empty() && h.bytes().all(|b| b.is_ascii_hexdigit()))
}

pub fn upload_ref(handle: &str) -> String {
    format!("{UPLOAD_PATH_PREFIX}{handle}")
}

#[derive(Default)]
pub struct InMemoryImageStore {
    blobs: RwLock<HashMap<String, StoredImage>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn fresh_handle() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

impl ImageBlobStore for InMemoryImageStore {
    fn put(&self, image: StoredImage) -> String {
        let handle = fresh_handle();
        log::info!("Stored upload {handle} ({}, {} bytes)", image.content_type, image.data.len());
        self.blobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(handle.clone(), image);
        upload_ref(&handle)
    }

    fn get(&self, handle: &str) -> Option<StoredImage> {
        self.blobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(handle)
            .cloned()
    }
}
