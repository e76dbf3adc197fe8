use std::fmt;

use tracing::warn;

/// A recoverable data problem found while building the library. The graph
/// is still complete; the offending reference or value is simply absent.
#[derive(Clone, Debug, PartialEq)]
pub enum Anomaly {
    MissingImage { container: String, key: String },
    MissingParent { album: String, parent: String },
    MissingAlbumType { container: String },
    UnknownAlbumType { container: String, token: String },
    DuplicateId { container: String, id: i64 },
    MissingImagePath { image: String },
    MalformedRectangle { image: String, rectangle: String },
    UnresolvedFace { image: String, face_key: String },
    InvalidRating { image: String, rating: i64 },
    UnreadableRating { image: String, value: String },
    InvalidLocation { image: String },
    MissingEvent { image: String, roll: Option<i64> },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingImage { container, key } => {
                write!(f, "{container}: image with id {key} does not exist")
            }
            Anomaly::MissingParent { album, parent } => {
                write!(f, "album {album}: parent with id {parent} not found")
            }
            Anomaly::MissingAlbumType { container } => write!(f, "no album type for {container}"),
            Anomaly::UnknownAlbumType { container, token } => {
                write!(f, "unknown album type {token} for {container}")
            }
            Anomaly::DuplicateId { container, id } => {
                write!(f, "{container}: id {id} already in use, replacing earlier entry")
            }
            Anomaly::MissingImagePath { image } => write!(f, "image {image}: no image path"),
            Anomaly::MalformedRectangle { image, rectangle } => {
                write!(f, "image {image}: failed to parse face rectangle {rectangle:?}")
            }
            Anomaly::UnresolvedFace { image, face_key } => {
                write!(f, "image {image}: no name for face key {face_key}")
            }
            Anomaly::InvalidRating { image, rating } => {
                write!(f, "image {image}: rating {rating} out of range")
            }
            Anomaly::UnreadableRating { image, value } => {
                write!(f, "image {image}: rating {value} is not a whole number")
            }
            Anomaly::InvalidLocation { image } => write!(f, "image {image}: invalid GPS location"),
            Anomaly::MissingEvent { image, roll: Some(roll) } => {
                write!(f, "image {image}: event {roll} not found")
            }
            Anomaly::MissingEvent { image, roll: None } => write!(f, "image {image}: no event"),
        }
    }
}

/// Collects anomalies and forwards each one to the log.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    anomalies: Vec<Anomaly>,
}

impl Diagnostics {
    pub(crate) fn report(&mut self, anomaly: Anomaly) {
        warn!("{anomaly}");
        self.anomalies.push(anomaly);
    }

    pub(crate) fn into_inner(self) -> Vec<Anomaly> {
        self.anomalies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let missing = Anomaly::MissingImage {
            container: "Trip".into(),
            key: "42".into(),
        };
        assert_eq!(missing.to_string(), "Trip: image with id 42 does not exist");

        let parent = Anomaly::MissingParent {
            album: "Orphan".into(),
            parent: "9".into(),
        };
        assert_eq!(parent.to_string(), "album Orphan: parent with id 9 not found");

        let no_event = Anomaly::MissingEvent {
            image: "IMG_1.JPG".into(),
            roll: None,
        };
        assert_eq!(no_event.to_string(), "image IMG_1.JPG: no event");
    }

    #[test]
    fn diagnostics_keep_report_order() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.report(Anomaly::InvalidLocation { image: "a".into() });
        diagnostics.report(Anomaly::MissingAlbumType {
            container: "b".into(),
        });
        let anomalies = diagnostics.into_inner();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0], Anomaly::InvalidLocation { image: "a".into() });
    }
}
