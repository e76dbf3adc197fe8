use chrono::{DateTime, Utc};
use serde::Serialize;

use albumdata_core::paths;
use albumdata_metadata::{FaceRect, GpsLocation};

use crate::album_type::AlbumType;

/// Keyword that hides an image from the membership checks.
pub const HIDDEN_KEYWORD: &str = "Hidden";

/// Position of an image in its library. Only meaningful for the library that
/// handed it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ImageId(pub(crate) usize);

/// Synthetic identity of an event, album or the root container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContainerId(pub(crate) usize);

impl ContainerId {
    pub const ROOT: ContainerId = ContainerId(0);
}

#[derive(Clone, Debug, Serialize)]
pub struct Image {
    pub key: String,
    pub(crate) caption: String,
    pub comment: String,
    pub date: Option<DateTime<Utc>>,
    pub mod_date: Option<DateTime<Utc>>,
    pub image_path: String,
    pub original_path: Option<String>,
    pub thumb_path: Option<String>,
    pub rating: Option<u8>,
    pub gps: Option<GpsLocation>,
    pub keywords: Vec<String>,
    /// Face names, parallel to `face_rectangles`.
    pub faces: Vec<String>,
    pub face_rectangles: Vec<FaceRect>,
    /// `RollID` of the owning event.
    pub roll: Option<i64>,
    pub media_type: Option<String>,
    pub rotation_is_only_edit: bool,
    pub(crate) albums: Vec<ContainerId>,
}

impl Image {
    /// Caption, or the file name when the caption is blank.
    pub fn caption(&self) -> &str {
        if self.caption.is_empty() {
            self.image_name()
        } else {
            &self.caption
        }
    }

    pub fn image_name(&self) -> &str {
        paths::file_name(&self.image_path)
    }

    pub fn base_name(&self) -> &str {
        paths::base_name(&self.image_path)
    }

    /// Albums this image was added to, in assembly order.
    ///
    /// Events never appear here; reach an image's event through
    /// [`Image::roll`] or `Library::event_of`.
    pub fn albums(&self) -> &[ContainerId] {
        &self.albums
    }

    pub fn is_hidden(&self) -> bool {
        self.keywords.iter().any(|k| k == HIDDEN_KEYWORD)
    }

    pub fn is_movie(&self) -> bool {
        self.media_type.as_deref() == Some("Movie")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ContainerKind {
    Root,
    Event,
    Album {
        /// `None` when the raw parent reference did not resolve.
        parent: Option<ContainerId>,
    },
}

/// An event, an album, or the implicit root.
#[derive(Clone, Debug, Serialize)]
pub struct Container {
    pub id: ContainerId,
    pub kind: ContainerKind,
    /// `AlbumId` for albums, `RollID` for events.
    pub album_id: Option<i64>,
    pub name: String,
    pub album_type: AlbumType,
    pub comment: Option<String>,
    pub master: bool,
    /// Event date from the record, or for albums the earliest member date.
    pub date: Option<DateTime<Utc>>,
    pub(crate) images: Vec<ImageId>,
    pub(crate) children: Vec<ContainerId>,
}

impl Container {
    pub(crate) fn root() -> Self {
        Self {
            id: ContainerId::ROOT,
            kind: ContainerKind::Root,
            album_id: None,
            name: String::new(),
            album_type: AlbumType::Named("Root".to_string()),
            comment: None,
            master: false,
            date: None,
            images: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ContainerId> {
        match self.kind {
            ContainerKind::Album { parent } => parent,
            ContainerKind::Event => Some(ContainerId::ROOT),
            ContainerKind::Root => None,
        }
    }

    pub fn is_event(&self) -> bool {
        self.kind == ContainerKind::Event
    }

    pub fn is_album(&self) -> bool {
        matches!(self.kind, ContainerKind::Album { .. })
    }
}

/// Synthetic album of every image tagged with one face name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FaceGroup {
    pub name: String,
    pub album_type: AlbumType,
    pub(crate) images: Vec<ImageId>,
}

impl FaceGroup {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            album_type: AlbumType::Face,
            images: Vec::new(),
        }
    }
}

/// Behaviour shared by events, albums and face groups.
pub trait Collection {
    fn name(&self) -> &str;
    fn album_type(&self) -> &AlbumType;
    fn images(&self) -> &[ImageId];
    fn comment(&self) -> Option<&str>;

    fn size(&self) -> usize {
        self.images().len()
    }

    fn is_folder(&self) -> bool {
        *self.album_type() == AlbumType::Folder
    }

    fn is_smart(&self) -> bool {
        *self.album_type() == AlbumType::Smart
    }

    /// Suggested export folder: the first comment line starting with `@`.
    fn folder_hint(&self) -> Option<&str> {
        self.comment()?
            .split('\n')
            .find_map(|line| line.strip_prefix('@'))
    }

    fn comment_without_hints(&self) -> String {
        self.comment()
            .map(|comment| {
                comment
                    .split('\n')
                    .filter(|line| !line.starts_with('@'))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.name(), self.album_type())
    }
}

impl Collection for Container {
    fn name(&self) -> &str {
        &self.name
    }

    fn album_type(&self) -> &AlbumType {
        &self.album_type
    }

    fn images(&self) -> &[ImageId] {
        &self.images
    }

    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl Collection for FaceGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn album_type(&self) -> &AlbumType {
        &self.album_type
    }

    fn images(&self) -> &[ImageId] {
        &self.images
    }

    fn comment(&self) -> Option<&str> {
        None
    }
}
