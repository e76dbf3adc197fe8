use indexmap::IndexMap;
use tracing::debug;

use crate::models::{FaceGroup, Image, ImageId};

/// Group images by face name, in order of first appearance. An image
/// tagged twice with the same face is listed once.
pub(crate) fn build_face_groups(images: &[Image]) -> Vec<FaceGroup> {
    let mut groups: IndexMap<&str, FaceGroup> = IndexMap::new();
    for (idx, image) in images.iter().enumerate() {
        let id = ImageId(idx);
        for face in &image.faces {
            let group = groups
                .entry(face.as_str())
                .or_insert_with(|| FaceGroup::new(face));
            if group.images.last() != Some(&id) {
                group.images.push(id);
            }
        }
    }
    debug!(groups = groups.len(), "built face groups");
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collection;

    fn tagged(faces: &[&str]) -> Image {
        Image {
            key: String::new(),
            caption: String::new(),
            comment: String::new(),
            date: None,
            mod_date: None,
            image_path: String::new(),
            original_path: None,
            thumb_path: None,
            rating: None,
            gps: None,
            keywords: Vec::new(),
            faces: faces.iter().map(|f| f.to_string()).collect(),
            face_rectangles: Vec::new(),
            roll: None,
            media_type: None,
            rotation_is_only_edit: false,
            albums: Vec::new(),
        }
    }

    #[test]
    fn groups_by_name() {
        let images = vec![tagged(&["Alice", "Bob"]), tagged(&["Alice"])];
        let groups = build_face_groups(&images);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name(), "Alice");
        assert_eq!(groups[0].images(), &[ImageId(0), ImageId(1)]);
        assert_eq!(groups[1].name(), "Bob");
        assert_eq!(groups[1].size(), 1);
    }

    #[test]
    fn repeated_builds_agree() {
        let images = vec![tagged(&["Bob"]), tagged(&["Alice", "Bob"])];
        assert_eq!(build_face_groups(&images), build_face_groups(&images));
    }

    #[test]
    fn duplicate_tag_on_one_image_counts_once() {
        let images = vec![tagged(&["Alice", "Alice"])];
        let groups = build_face_groups(&images);
        assert_eq!(groups[0].size(), 1);
    }

    #[test]
    fn no_faces_no_groups() {
        assert!(build_face_groups(&[tagged(&[])]).is_empty());
    }
}
