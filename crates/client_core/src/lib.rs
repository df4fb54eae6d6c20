//! Client side of the search screens: query state, shareable addresses,
//! the HTTP search backend and the request dispatcher.

pub mod address;
pub mod backend;
pub mod config;
pub mod controller;
pub mod dispatcher;

pub use address::SearchAddress;
pub use aggregator::{ResultSet, SelectedTags};
pub use backend::{build_http_client, HttpSearchBackend, SearchBackend};
pub use config::{load_settings, Settings, SettingsError};
pub use controller::{Completion, DisplayState, FetchRequest, QueryController};
pub use dispatcher::{SearchDispatcher, SearchEvent};
