mod decoder;
mod input;
mod types;

pub use decoder::{ArchiveDecoder, decode};
pub use input::Input;
pub use types::*;
