use indexmap::IndexMap;
use tracing::debug;

use crate::models::{Image, ImageId};

/// Image lookup by base name and by exact file name. Buckets keep the
/// library's image order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameIndex {
    by_base_name: IndexMap<String, Vec<ImageId>>,
    by_file_name: IndexMap<String, Vec<ImageId>>,
}

impl NameIndex {
    pub fn build(images: &[Image]) -> Self {
        let mut index = Self::default();
        for (idx, image) in images.iter().enumerate() {
            let id = ImageId(idx);
            index
                .by_base_name
                .entry(image.base_name().to_string())
                .or_default()
                .push(id);
            index
                .by_file_name
                .entry(image.image_name().to_string())
                .or_default()
                .push(id);
        }
        debug!(
            base_names = index.by_base_name.len(),
            file_names = index.by_file_name.len(),
            "built name index"
        );
        index
    }

    /// Every image sharing `base_name`, e.g. a raw original and its edits.
    pub fn base_images(&self, base_name: &str) -> &[ImageId] {
        self.by_base_name
            .get(base_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn file_images(&self, file_name: &str) -> &[ImageId] {
        self.by_file_name
            .get(file_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First image with this exact file name.
    pub fn named_image(&self, file_name: &str) -> Option<ImageId> {
        self.file_images(file_name).first().copied()
    }

    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.by_base_name.keys().map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.by_file_name.keys().map(String::as_str)
    }
}
