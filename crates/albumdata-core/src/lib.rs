pub mod paths;
pub mod value;

pub use value::{Dictionary, Record, Value};
