pub mod extract;
pub mod kariyer;
pub mod linkedin;
pub mod pipeline;
mod types;

pub use extract::{extract_candidates, Marker, Skip, Source, Strategy};
pub use pipeline::{Crawler, Pacer, StopFlag};
pub use types::{Error, JobRecord, Result, SearchQuery, UNKNOWN_COMPANY, UNKNOWN_LINK};
