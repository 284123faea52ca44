pub mod analysis;
pub mod error;
pub mod har;

pub use error::{Error, Result};
pub use har::{Archive, decode};
