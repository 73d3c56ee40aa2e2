//! Opportunity Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod firestore;
pub mod ingest;
pub mod listing;
pub mod filter;
pub mod sort;
pub mod geo;
pub mod favorites;
pub mod location;
pub mod csv_export;
pub mod view_state;
pub mod tags;

pub use types::{Coordinates, Opportunity, Recurrence, UserLocation};
pub use error::{Error, Result};
pub use listing::{ListingStore, LoadStatus};
pub use filter::{filter_opportunities, Filters};
pub use sort::{sort_opportunities, SortDirection, SortKey, SortState};
pub use geo::haversine_miles;
pub use favorites::Favorites;
pub use location::{KeyValueStore, LocationError, LocationKeys, LocationStore, RequestGuard};
pub use csv_export::{export_favorites, CsvFile};
pub use view_state::{reduce, Action, ViewState};
