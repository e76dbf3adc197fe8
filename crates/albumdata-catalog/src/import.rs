use std::collections::HashMap;

use tracing::debug;

use albumdata_core::{Record, paths};
use albumdata_metadata::time::apple_time;
use albumdata_metadata::{FaceRect, GpsLocation};

use crate::anomaly::{Anomaly, Diagnostics};
use crate::models::Image;

pub const LIST_OF_KEYWORDS: &str = "List of Keywords";
pub const LIST_OF_FACES: &str = "List of Faces";

const CAPTION: &str = "Caption";
const COMMENT: &str = "Comment";
const DATE: &str = "DateAsTimerInterval";
const MOD_DATE: &str = "ModDateAsTimerInterval";
const IMAGE_PATH: &str = "ImagePath";
const ORIGINAL_PATH: &str = "OriginalPath";
const THUMB_PATH: &str = "ThumbPath";
const RATING: &str = "Rating";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const KEYWORDS: &str = "Keywords";
const FACES: &str = "Faces";
const FACE_KEY: &str = "face key";
const RECTANGLE: &str = "rectangle";
const ROLL: &str = "Roll";
const MEDIA_TYPE: &str = "MediaType";
const ROTATION_IS_ONLY_EDIT: &str = "RotationIsOnlyEdit";

/// Keyword and face-name lookup tables shared by every image record.
#[derive(Debug, Default)]
pub struct Vocabulary {
    keywords: HashMap<String, String>,
    face_names: HashMap<String, String>,
}

impl Vocabulary {
    pub fn from_document(document: Record<'_>) -> Self {
        let mut vocabulary = Self::default();

        if let Some(keywords) = document.record(LIST_OF_KEYWORDS) {
            for (id, name) in keywords.entries() {
                if let Some(name) = name.as_str() {
                    vocabulary.keywords.insert(id.to_string(), name.to_string());
                }
            }
        }

        if let Some(faces) = document.record(LIST_OF_FACES) {
            for (_, entry) in faces.entries() {
                let Some(entry) = entry.as_record() else {
                    continue;
                };
                if let (Some(key), Some(name)) = (entry.token("key"), entry.str("name")) {
                    vocabulary.face_names.insert(key, name.to_string());
                }
            }
        }

        debug!(
            keywords = vocabulary.keywords.len(),
            faces = vocabulary.face_names.len(),
            "loaded vocabulary"
        );
        vocabulary
    }

    pub fn keyword(&self, id: &str) -> Option<&str> {
        self.keywords.get(id).map(String::as_str)
    }

    /// Name for a face key. Blank names count as unresolved.
    pub fn face_name(&self, key: &str) -> Option<&str> {
        self.face_names
            .get(key)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Build one image from its `Master Image List` record.
pub(crate) fn build_image(
    key: &str,
    record: Record<'_>,
    vocabulary: &Vocabulary,
    diagnostics: &mut Diagnostics,
) -> Image {
    let image_path = record.str(IMAGE_PATH).unwrap_or_default().to_string();
    let label = if image_path.is_empty() {
        key.to_string()
    } else {
        paths::file_name(&image_path).to_string()
    };
    if image_path.is_empty() {
        diagnostics.report(Anomaly::MissingImagePath {
            image: label.clone(),
        });
    }

    let date = if record.has(DATE) {
        record.real(DATE).and_then(apple_time)
    } else {
        None
    };

    let rating = match record.int(RATING) {
        None => {
            if let Some(value) = record.get(RATING) {
                diagnostics.report(Anomaly::UnreadableRating {
                    image: label.clone(),
                    value: format!("{value:?}"),
                });
            }
            None
        }
        Some(0) => None,
        Some(r @ 1..=5) => Some(r as u8),
        Some(r) => {
            diagnostics.report(Anomaly::InvalidRating {
                image: label.clone(),
                rating: r,
            });
            None
        }
    };

    let gps = match (record.real(LATITUDE), record.real(LONGITUDE)) {
        (Some(latitude), Some(longitude)) => match GpsLocation::new(latitude, longitude) {
            Ok(location) => Some(location),
            Err(err) => {
                debug!(%err, image = %label, "dropping location");
                diagnostics.report(Anomaly::InvalidLocation {
                    image: label.clone(),
                });
                None
            }
        },
        _ => None,
    };

    let mut keywords = Vec::new();
    for id in record.array(KEYWORDS).unwrap_or_default() {
        match id.as_token().as_deref().and_then(|id| vocabulary.keyword(id)) {
            Some(keyword) => keywords.push(keyword.to_string()),
            None => debug!(image = %label, ?id, "unknown keyword id"),
        }
    }

    let mut faces = Vec::new();
    let mut face_rectangles = Vec::new();
    for entry in record.array(FACES).unwrap_or_default() {
        let Some(entry) = entry.as_record() else {
            continue;
        };
        let face_key = entry.token(FACE_KEY).unwrap_or_default();
        let Some(name) = vocabulary.face_name(&face_key) else {
            diagnostics.report(Anomaly::UnresolvedFace {
                image: label.clone(),
                face_key,
            });
            continue;
        };
        faces.push(name.to_string());
        face_rectangles.push(face_rectangle(&label, entry.str(RECTANGLE), diagnostics));
    }

    Image {
        key: key.to_string(),
        caption: record.str(CAPTION).unwrap_or_default().trim().to_string(),
        comment: record.str(COMMENT).unwrap_or_default().trim().to_string(),
        date,
        mod_date: record.real(MOD_DATE).and_then(apple_time),
        image_path,
        original_path: record.str(ORIGINAL_PATH).map(String::from),
        thumb_path: record.str(THUMB_PATH).map(String::from),
        rating,
        gps,
        keywords,
        faces,
        face_rectangles,
        roll: record.int(ROLL),
        media_type: record.str(MEDIA_TYPE).map(String::from),
        rotation_is_only_edit: record.bool(ROTATION_IS_ONLY_EDIT).unwrap_or(false),
        albums: Vec::new(),
    }
}

fn face_rectangle(label: &str, raw: Option<&str>, diagnostics: &mut Diagnostics) -> FaceRect {
    match raw.map(FaceRect::parse) {
        Some(Ok(rect)) => rect,
        _ => {
            diagnostics.report(Anomaly::MalformedRectangle {
                image: label.to_string(),
                rectangle: raw.unwrap_or_default().to_string(),
            });
            FaceRect::DEFAULT
        }
    }
}
