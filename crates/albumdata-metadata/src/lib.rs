pub mod error;
pub mod gps;
pub mod rect;
pub mod time;

pub use error::DecodeError;
pub use gps::GpsLocation;
pub use rect::FaceRect;
