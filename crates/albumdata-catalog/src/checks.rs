use tracing::debug;

use crate::album_type::AlbumType;
use crate::library::Library;
use crate::models::{Collection, Container};

/// Albums that count as a proper home for an image, besides regular ones.
fn is_collection_album(album: &Container) -> bool {
    (album.is_smart() && album.name.ends_with(" Collection"))
        || album.name == "People"
        || album.name == "Unorganized"
}

impl Library {
    /// One message per event, and per regular album, with more than
    /// `max_size` images. Sorted.
    pub fn check_album_sizes(&self, max_size: usize) -> Vec<String> {
        let mut messages = Vec::new();
        for event in self.events() {
            if event.size() > max_size {
                messages.push(format!("{}: event too large ({})", event.name, event.size()));
            }
        }
        for album in self.albums() {
            if album.album_type == AlbumType::Regular && album.size() > max_size {
                messages.push(format!("{}: album too large ({})", album.name, album.size()));
            }
        }
        messages.sort();
        debug!(max_size, found = messages.len(), "checked album sizes");
        messages
    }

    /// Check that every visible image lives in exactly one regular album
    /// named after its event, or in one of the collection albums. Sorted.
    pub fn check_in_albums(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for image in self.images() {
            if image.is_hidden() {
                continue;
            }
            let caption = image.caption();
            let event = self.event_of(image);
            if event.is_none() {
                match image.roll {
                    Some(roll) => messages.push(format!("{caption}: event {roll} not found.")),
                    None => messages.push(format!("{caption}: no event.")),
                }
            }

            let mut regular = Vec::new();
            let mut in_album = false;
            for album in image.albums().iter().filter_map(|&id| self.container(id)) {
                if album.album_type == AlbumType::Regular {
                    regular.push(album.name.as_str());
                    in_album = true;
                } else if is_collection_album(album) {
                    in_album = true;
                }
            }

            if !in_album {
                messages.push(format!("{caption}: not in any album."));
            }
            match regular.as_slice() {
                [album_name] => {
                    if let Some(event) = event.filter(|event| event.name != *album_name) {
                        messages.push(format!(
                            "{caption}: in wrong album ({} vs. {album_name}).",
                            event.name
                        ));
                    }
                }
                [] => {}
                names => messages.push(format!(
                    "{caption}: in more than one album: {}",
                    names.join(" ")
                )),
            }
        }
        messages.sort();
        debug!(found = messages.len(), "checked album membership");
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Producer;
    use crate::library::tests::{document, sample_library};

    fn trip_library(extra_albums: serde_json::Value) -> Library {
        let mut albums = vec![serde_json::json!(
            {"AlbumName": "Trip", "Album Type": "1", "AlbumId": 2, "KeyList": ["A"]}
        )];
        if let serde_json::Value::Array(extra) = extra_albums {
            albums.extend(extra);
        }
        let doc = document(serde_json::json!({
            "Application Version": "3.4.5",
            "Master Image List": {
                "A": {"Caption": "A", "ImagePath": "/a.jpg", "Roll": 1},
                "B": {"Caption": "B", "ImagePath": "/b.jpg", "Roll": 1},
            },
            "List of Albums": albums,
            "List of Rolls": [{"AlbumName": "Trip", "AlbumId": 1, "KeyList": ["A", "B"]}],
        }));
        Library::from_document(&doc, Producer::Aperture).unwrap()
    }

    #[test]
    fn trip_scenario() {
        let library = trip_library(serde_json::json!([]));
        assert_eq!(library.check_in_albums(), vec!["B: not in any album."]);
        assert_eq!(library.check_album_sizes(1), vec!["Trip: event too large (2)"]);
        assert!(library.check_album_sizes(2).is_empty());
    }

    #[test]
    fn oversized_regular_albums_only() {
        let library = trip_library(serde_json::json!([
            {"AlbumName": "Smart", "Album Type": "2", "KeyList": ["A", "B"]},
            {"AlbumName": "Big", "Album Type": "Regular", "KeyList": ["A", "B"]},
        ]));
        assert_eq!(
            library.check_album_sizes(1),
            vec!["Big: album too large (2)", "Trip: event too large (2)"]
        );
    }

    #[test]
    fn wrong_and_duplicate_albums() {
        let library = trip_library(serde_json::json!([
            {"AlbumName": "Other", "Album Type": "1", "KeyList": ["A", "B"]},
        ]));
        assert_eq!(
            library.check_in_albums(),
            vec![
                "A: in more than one album: Trip Other",
                "B: in wrong album (Trip vs. Other).",
            ]
        );
    }

    #[test]
    fn collection_albums_count_as_membership() {
        let library = trip_library(serde_json::json!([
            {"AlbumName": "Family Collection", "Album Type": "Smart", "KeyList": ["B"]},
        ]));
        assert!(library.check_in_albums().is_empty());

        let library = trip_library(serde_json::json!([
            {"AlbumName": "People", "Album Type": "Special", "KeyList": ["B"]},
        ]));
        assert!(library.check_in_albums().is_empty());

        let library = trip_library(serde_json::json!([
            {"AlbumName": "Favourites", "Album Type": "Smart", "KeyList": ["B"]},
        ]));
        assert_eq!(library.check_in_albums(), vec!["B: not in any album."]);
    }

    #[test]
    fn hidden_images_are_skipped() {
        let doc = document(serde_json::json!({
            "Application Version": "8.0",
            "List of Keywords": {"1": "Hidden"},
            "Master Image List": {
                "A": {"ImagePath": "/a.jpg", "Roll": 1, "Keywords": [1]},
            },
            "List of Rolls": [{"RollName": "Trip", "RollID": 1, "KeyList": ["A"]}],
        }));
        let library = Library::from_document(&doc, Producer::IPhoto).unwrap();
        assert!(library.check_in_albums().is_empty());
    }

    #[test]
    fn missing_event_is_reported() {
        let doc = document(serde_json::json!({
            "Application Version": "8.0",
            "Master Image List": {
                "A": {"ImagePath": "/a.jpg", "Roll": 9},
                "B": {"ImagePath": "/b.jpg"},
            },
        }));
        let library = Library::from_document(&doc, Producer::IPhoto).unwrap();
        assert_eq!(
            library.check_in_albums(),
            vec![
                "a.jpg: event 9 not found.",
                "a.jpg: not in any album.",
                "b.jpg: no event.",
                "b.jpg: not in any album.",
            ]
        );
    }

    #[test]
    fn sample_library_checks() {
        let library = sample_library();
        assert_eq!(library.check_in_albums(), vec!["B: not in any album."]);
        assert_eq!(
            library.check_album_sizes(0),
            vec!["Trip: album too large (1)", "Trip: event too large (2)"]
        );
    }
}
