pub mod responseheaders;

pub use responseheaders::{HeaderRecord, ResponseHeaders};
