use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::data::ImageRef;

const IMAGE_META_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(size) => size,
    None => panic!("cache size must be non-zero"),
};

pub struct WebApiCache {
    image_meta: Mutex<LruCache<String, ImageRef>>,
}

impl WebApiCache {
    pub fn new() -> Self {
        Self {
            image_meta: Mutex::new(LruCache::new(IMAGE_META_CACHE_SIZE)),
        }
    }

    pub fn get_image_meta(&self, handle: &str) -> Option<ImageRef> {
        self.image_meta.lock().get(handle).cloned()
    }

    pub fn set_image_meta(&self, handle: String, meta: ImageRef) {
        self.image_meta.lock().put(handle, meta);
    }

    pub fn forget_image_meta(&self, handle: &str) {
        self.image_meta.lock().pop(handle);
    }
}
