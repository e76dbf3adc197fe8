use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use albumdata_core::Value;

use crate::anomaly::Anomaly;
use crate::assemble::{Assembler, Graph};
use crate::error::LibraryError;
use crate::faces::build_face_groups;
use crate::import::{Vocabulary, build_image};
use crate::index::NameIndex;
use crate::models::{Collection, Container, ContainerId, FaceGroup, Image, ImageId};

const APPLICATION_VERSION: &str = "Application Version";
const MASTER_IMAGE_LIST: &str = "Master Image List";
const LIST_OF_ALBUMS: &str = "List of Albums";
const LIST_OF_ROLLS: &str = "List of Rolls";

/// Application that wrote the album data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Producer {
    IPhoto,
    Aperture,
}

impl Producer {
    /// `ApertureData.xml` (or a converted `ApertureData.json`) comes from
    /// Aperture, anything else is treated as iPhoto's `AlbumData.xml`.
    pub fn from_data_file_name(name: &str) -> Self {
        let stem = albumdata_core::paths::base_name(name);
        if stem == "ApertureData" {
            Producer::Aperture
        } else {
            Producer::IPhoto
        }
    }

    pub fn supported_version_prefixes(self) -> &'static [&'static str] {
        match self {
            Producer::IPhoto => &["6.", "7.", "8.", "9."],
            Producer::Aperture => &["3."],
        }
    }

    pub fn check_version(self, version: &str) -> Result<(), LibraryError> {
        if self
            .supported_version_prefixes()
            .iter()
            .any(|prefix| version.starts_with(prefix))
        {
            Ok(())
        } else {
            Err(LibraryError::UnsupportedVersion {
                producer: self,
                version: version.to_string(),
            })
        }
    }
}

impl fmt::Display for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::IPhoto => f.write_str("iPhoto"),
            Producer::Aperture => f.write_str("Aperture"),
        }
    }
}

/// A photo library read from iPhoto or Aperture album data.
///
/// Images, events and albums are built and cross-referenced when the library
/// is created. The name index and face groups are computed on first use.
#[derive(Debug)]
pub struct Library {
    producer: Producer,
    application_version: String,
    graph: Graph,
    name_index: OnceLock<NameIndex>,
    face_groups: OnceLock<Vec<FaceGroup>>,
}

impl Library {
    pub fn from_document(document: &Value, producer: Producer) -> Result<Self, LibraryError> {
        let document = document.as_record().ok_or(LibraryError::NotADictionary)?;

        let application_version = document
            .str(APPLICATION_VERSION)
            .unwrap_or_default()
            .to_string();
        producer.check_version(&application_version)?;
        info!(%producer, version = %application_version, "reading album data");

        let vocabulary = Vocabulary::from_document(document);
        let mut assembler = Assembler::new(Utc::now());

        if let Some(images) = document.record(MASTER_IMAGE_LIST) {
            for (key, record) in images.entries() {
                let Some(record) = record.as_record() else {
                    warn!(key, "image entry is not a dictionary");
                    continue;
                };
                let image = build_image(key, record, &vocabulary, assembler.diagnostics());
                assembler.add_image(image);
            }
        }

        for album in document.array(LIST_OF_ALBUMS).unwrap_or_default() {
            match album.as_record() {
                Some(record) => {
                    assembler.add_album(record);
                }
                None => warn!("album entry is not a dictionary"),
            }
        }

        for roll in document.array(LIST_OF_ROLLS).unwrap_or_default() {
            match roll.as_record() {
                Some(record) => {
                    assembler.add_event(record);
                }
                None => warn!("event entry is not a dictionary"),
            }
        }

        let graph = assembler.finish();
        info!(
            images = graph.images.len(),
            events = graph.events.len(),
            albums = graph.albums.len(),
            anomalies = graph.anomalies.len(),
            "album data loaded"
        );

        Ok(Self {
            producer,
            application_version,
            graph,
            name_index: OnceLock::new(),
            face_groups: OnceLock::new(),
        })
    }

    pub fn producer(&self) -> Producer {
        self.producer
    }

    pub fn application_version(&self) -> &str {
        &self.application_version
    }

    /// Recoverable problems found while reading, in discovery order.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.graph.anomalies
    }

    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.graph.images.iter()
    }

    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.graph.images.get(id.0)
    }

    pub fn image_by_key(&self, key: &str) -> Option<&Image> {
        self.graph
            .images_by_key
            .get(key)
            .and_then(|&id| self.image(id))
    }

    /// Resolve a collection's member list to images.
    pub fn images_of<'a>(&'a self, collection: &'a impl Collection) -> impl Iterator<Item = &'a Image> {
        collection
            .images()
            .iter()
            .filter_map(|&id| self.image(id))
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.graph.containers.get(id.0)
    }

    /// The implicit container holding every event and top-level album.
    pub fn root(&self) -> &Container {
        &self.graph.containers[ContainerId::ROOT.0]
    }

    pub fn events(&self) -> impl Iterator<Item = &Container> {
        self.graph
            .events
            .iter()
            .map(|&id| &self.graph.containers[id.0])
    }

    /// Event by its `RollID`.
    pub fn event(&self, roll_id: i64) -> Option<&Container> {
        self.graph
            .events_by_id
            .get(&roll_id)
            .and_then(|&id| self.container(id))
    }

    pub fn event_of(&self, image: &Image) -> Option<&Container> {
        self.event(image.roll?)
    }

    pub fn albums(&self) -> impl Iterator<Item = &Container> {
        self.graph
            .albums
            .iter()
            .map(|&id| &self.graph.containers[id.0])
    }

    /// Every container below `id`, depth first, parents before children.
    pub fn descendants(&self, id: ContainerId) -> Vec<ContainerId> {
        let mut found = Vec::new();
        let mut stack: Vec<ContainerId> = match self.container(id) {
            Some(container) => container.children().iter().rev().copied().collect(),
            None => return found,
        };
        while let Some(next) = stack.pop() {
            found.push(next);
            if let Some(container) = self.container(next) {
                stack.extend(container.children().iter().rev().copied());
            }
        }
        found
    }

    /// One group per face name, in image order. An image tagged twice with
    /// the same name is listed once in that group.
    pub fn face_groups(&self) -> &[FaceGroup] {
        self.face_groups
            .get_or_init(|| build_face_groups(&self.graph.images))
    }

    pub fn face_group(&self, name: &str) -> Option<&FaceGroup> {
        self.face_groups().iter().find(|group| group.name == name)
    }

    pub fn name_index(&self) -> &NameIndex {
        self.name_index
            .get_or_init(|| NameIndex::build(&self.graph.images))
    }

    /// Discard the cached name index and build a fresh one.
    pub fn rebuild_name_index(&mut self) -> &NameIndex {
        let index = NameIndex::build(&self.graph.images);
        self.name_index = OnceLock::from(index);
        self.name_index()
    }

    /// Images sharing a base name, such as an original and its edits.
    pub fn base_images(&self, base_name: &str) -> Vec<&Image> {
        self.name_index()
            .base_images(base_name)
            .iter()
            .filter_map(|&id| self.image(id))
            .collect()
    }

    /// First image with this exact file name.
    pub fn named_image(&self, file_name: &str) -> Option<&Image> {
        self.name_index()
            .named_image(file_name)
            .and_then(|id| self.image(id))
    }

    /// Every known path of every image (main, thumbnail, original) mapped to
    /// its image.
    pub fn images_by_path(&self) -> HashMap<&str, &Image> {
        let mut map = HashMap::new();
        for image in self.images() {
            map.insert(image.image_path.as_str(), image);
            if let Some(thumb) = &image.thumb_path {
                map.insert(thumb.as_str(), image);
            }
            if let Some(original) = &image.original_path {
                map.insert(original.as_str(), image);
            }
        }
        map
    }
}
