pub mod album_type;
pub mod anomaly;
mod assemble;
mod checks;
pub mod error;
mod faces;
pub mod import;
pub mod index;
pub mod library;
pub mod models;

pub use album_type::{AlbumType, normalize_album_type};
pub use anomaly::Anomaly;
pub use error::LibraryError;
pub use index::NameIndex;
pub use library::{Library, Producer};
pub use models::{Collection, Container, ContainerId, ContainerKind, FaceGroup, Image, ImageId};
