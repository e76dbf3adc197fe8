use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("malformed face rectangle: {0:?}")]
    Rectangle(String),

    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    Coordinate { latitude: f64, longitude: f64 },
}
