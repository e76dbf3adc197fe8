use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use albumdata_core::Record;
use albumdata_metadata::time::apple_time;

use crate::album_type::{AlbumType, TypeIssue, normalize_album_type};
use crate::anomaly::{Anomaly, Diagnostics};
use crate::models::{Collection, Container, ContainerId, ContainerKind, Image, ImageId};

const ALBUM_NAME: &str = "AlbumName";
const ALBUM_TYPE: &str = "Album Type";
const ALBUM_ID: &str = "AlbumId";
const PARENT: &str = "Parent";
const MASTER: &str = "Master";
const KEY_LIST: &str = "KeyList";
const COMMENTS: &str = "Comments";
const ROLL_NAME: &str = "RollName";
const ROLL_ID: &str = "RollID";
const ROLL_DATE: &str = "RollDateAsTimerInterval";

/// The assembled object graph. Container 0 is always the root.
#[derive(Debug)]
pub(crate) struct Graph {
    pub(crate) images: Vec<Image>,
    pub(crate) images_by_key: IndexMap<String, ImageId>,
    pub(crate) containers: Vec<Container>,
    pub(crate) albums: Vec<ContainerId>,
    pub(crate) events: Vec<ContainerId>,
    pub(crate) events_by_id: IndexMap<i64, ContainerId>,
    pub(crate) anomalies: Vec<Anomaly>,
}

/// Turns raw records into entities and wires the references between them.
///
/// Images must be added before the containers that list them, and albums
/// before their children: parent ids are only resolved against albums that
/// already exist, so parent links always point backwards and never cycle.
pub(crate) struct Assembler {
    images: Vec<Image>,
    images_by_key: IndexMap<String, ImageId>,
    containers: Vec<Container>,
    albums: Vec<ContainerId>,
    albums_by_id: IndexMap<i64, ContainerId>,
    events: Vec<ContainerId>,
    events_by_id: IndexMap<i64, ContainerId>,
    diagnostics: Diagnostics,
    now: DateTime<Utc>,
}

impl Assembler {
    /// `now` is the fallback date of albums without dated images.
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        Self {
            images: Vec::new(),
            images_by_key: IndexMap::new(),
            containers: vec![Container::root()],
            albums: Vec::new(),
            albums_by_id: IndexMap::new(),
            events: Vec::new(),
            events_by_id: IndexMap::new(),
            diagnostics: Diagnostics::default(),
            now,
        }
    }

    pub(crate) fn diagnostics(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub(crate) fn add_image(&mut self, image: Image) -> ImageId {
        let id = ImageId(self.images.len());
        self.images_by_key.insert(image.key.clone(), id);
        self.images.push(image);
        id
    }

    pub(crate) fn add_album(&mut self, record: Record<'_>) -> ContainerId {
        let name = record.str(ALBUM_NAME).unwrap_or_default().to_string();
        let (album_type, issue) = normalize_album_type(record.token(ALBUM_TYPE).as_deref(), &name);
        match issue {
            Some(TypeIssue::Missing) => self.diagnostics.report(Anomaly::MissingAlbumType {
                container: name.clone(),
            }),
            Some(TypeIssue::Unrecognized(token)) => {
                self.diagnostics.report(Anomaly::UnknownAlbumType {
                    container: name.clone(),
                    token,
                })
            }
            None => {}
        }

        let id = ContainerId(self.containers.len());
        let images = if album_type == AlbumType::Folder {
            Vec::new()
        } else {
            self.resolve_images(&name, record)
        };
        for &image in &images {
            self.images[image.0].albums.push(id);
        }

        let date = images
            .iter()
            .filter_map(|image| self.images[image.0].date)
            .min()
            .unwrap_or(self.now);

        let parent = if record.has(PARENT) {
            let found = record
                .int(PARENT)
                .and_then(|parent_id| self.albums_by_id.get(&parent_id).copied());
            if found.is_none() {
                self.diagnostics.report(Anomaly::MissingParent {
                    album: name.clone(),
                    parent: record.token(PARENT).unwrap_or_default(),
                });
            }
            found
        } else {
            Some(ContainerId::ROOT)
        };
        if let Some(parent) = parent {
            self.containers[parent.0].children.push(id);
        }

        let album_id = record.int(ALBUM_ID);
        if let Some(album_id) = album_id {
            if self.albums_by_id.insert(album_id, id).is_some() {
                self.diagnostics.report(Anomaly::DuplicateId {
                    container: name.clone(),
                    id: album_id,
                });
            }
        }

        debug!(album = %name, %album_type, images = images.len(), "built album");
        self.containers.push(Container {
            id,
            kind: ContainerKind::Album { parent },
            album_id,
            name,
            album_type,
            comment: record.str(COMMENTS).map(String::from),
            master: record.has(MASTER),
            date: Some(date),
            images,
            children: Vec::new(),
        });
        self.albums.push(id);
        id
    }

    /// Events hang directly off the root, whatever their record says.
    pub(crate) fn add_event(&mut self, record: Record<'_>) -> ContainerId {
        let name = record
            .str(ROLL_NAME)
            .or_else(|| record.str(ALBUM_NAME))
            .unwrap_or_default()
            .to_string();
        let album_id = record.int(ROLL_ID).or_else(|| record.int(ALBUM_ID));

        let id = ContainerId(self.containers.len());
        let images = self.resolve_images(&name, record);
        self.containers[ContainerId::ROOT.0].children.push(id);

        match album_id {
            Some(roll_id) => {
                if self.events_by_id.insert(roll_id, id).is_some() {
                    self.diagnostics.report(Anomaly::DuplicateId {
                        container: name.clone(),
                        id: roll_id,
                    });
                }
            }
            None => debug!(event = %name, "event without id"),
        }

        debug!(event = %name, images = images.len(), "built event");
        self.containers.push(Container {
            id,
            kind: ContainerKind::Event,
            album_id,
            name,
            album_type: AlbumType::Event,
            comment: record.str(COMMENTS).map(String::from),
            master: false,
            date: record.real(ROLL_DATE).and_then(apple_time),
            images,
            children: Vec::new(),
        });
        self.events.push(id);
        id
    }

    fn resolve_images(&mut self, name: &str, record: Record<'_>) -> Vec<ImageId> {
        let mut images = Vec::new();
        for key in record.array(KEY_LIST).unwrap_or_default() {
            let Some(key) = key.as_token() else {
                debug!(container = %name, ?key, "skipping non-scalar key");
                continue;
            };
            match self.images_by_key.get(&key) {
                Some(&image) => images.push(image),
                None => self.diagnostics.report(Anomaly::MissingImage {
                    container: name.to_string(),
                    key,
                }),
            }
        }
        images
    }

    /// Report images whose owning event never showed up.
    fn check_events(&mut self) {
        for image in &self.images {
            let resolved = image
                .roll
                .is_some_and(|roll| self.events_by_id.contains_key(&roll));
            if !resolved {
                self.diagnostics.report(Anomaly::MissingEvent {
                    image: image.caption().to_string(),
                    roll: image.roll,
                });
            }
        }
    }

    pub(crate) fn finish(mut self) -> Graph {
        self.check_events();
        let root = &self.containers[ContainerId::ROOT.0];
        debug!(
            children = root.children().len(),
            size = root.size(),
            "assembled root"
        );
        Graph {
            images: self.images,
            images_by_key: self.images_by_key,
            containers: self.containers,
            albums: self.albums,
            events: self.events,
            events_by_id: self.events_by_id,
            anomalies: self.diagnostics.into_inner(),
        }
    }
}
