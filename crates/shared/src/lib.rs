pub mod domain;
pub mod error;
pub mod protocol;

pub use domain::{ResultGroup, SearchMode, SearchResult};
pub use error::{ApiError, ErrorCode, SearchError};
