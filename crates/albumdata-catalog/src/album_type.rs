use std::fmt;

use serde::{Serialize, Serializer};

/// Name of the iPhoto master album, which carries no album type.
pub const MASTER_ALBUM_NAME: &str = "Photos";

/// Numeric album types above this value are Aperture's synthetic albums
/// (94 Photos, 95 Flagged, 96 Library Album, 97 Projects, 98 Aperture,
/// 99 Aperture Library). Their type is the album's own name.
pub const SYNTHETIC_TYPE_THRESHOLD: u32 = 90;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AlbumType {
    Regular,
    Smart,
    Special,
    Event,
    Library,
    Folder,
    Master,
    Face,
    Unknown,
    /// Any other producer-specific type: iPhoto's `Flagged`, `Published`,
    /// `Shelf`, `SpecialRoll`, ..., or an Aperture synthetic album name.
    Named(String),
}

impl AlbumType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Regular" => AlbumType::Regular,
            "Smart" => AlbumType::Smart,
            "Special" => AlbumType::Special,
            "Event" => AlbumType::Event,
            "Library" => AlbumType::Library,
            "Folder" => AlbumType::Folder,
            "Master" => AlbumType::Master,
            "Face" => AlbumType::Face,
            "Unknown" => AlbumType::Unknown,
            other => AlbumType::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AlbumType::Regular => "Regular",
            AlbumType::Smart => "Smart",
            AlbumType::Special => "Special",
            AlbumType::Event => "Event",
            AlbumType::Library => "Library",
            AlbumType::Folder => "Folder",
            AlbumType::Master => "Master",
            AlbumType::Face => "Face",
            AlbumType::Unknown => "Unknown",
            AlbumType::Named(name) => name,
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AlbumType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Why a raw type token could not be normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeIssue {
    Missing,
    Unrecognized(String),
}

/// Map a raw `Album Type` token to an [`AlbumType`].
///
/// Never fails: tokens that cannot be interpreted come back as
/// [`AlbumType::Unknown`] together with the issue so the caller can report it.
pub fn normalize_album_type(token: Option<&str>, name: &str) -> (AlbumType, Option<TypeIssue>) {
    let token = token.map(str::trim).filter(|t| !t.is_empty());

    let Some(token) = token else {
        if name == MASTER_ALBUM_NAME {
            return (AlbumType::Master, None);
        }
        return (AlbumType::Unknown, Some(TypeIssue::Missing));
    };

    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return (AlbumType::from_name(token), None);
    }

    let numeric = match token.parse::<u32>() {
        Ok(n) => n,
        // Too many digits for u32, still a synthetic id
        Err(_) => return (AlbumType::from_name(name), None),
    };

    let album_type = match numeric {
        1 => AlbumType::Regular,
        2 => AlbumType::Smart,
        3 => AlbumType::Special,
        4 => AlbumType::Event,
        5 => AlbumType::Library,
        6 => AlbumType::Folder,
        n if n > SYNTHETIC_TYPE_THRESHOLD => AlbumType::from_name(name),
        _ => {
            return (
                AlbumType::Unknown,
                Some(TypeIssue::Unrecognized(token.to_string())),
            );
        }
    };
    (album_type, None)
}
