pub mod debounce;
pub mod geocoding;
pub mod place_search;

pub use debounce::Debouncer;
pub use geocoding::{MapboxGeocoder, SearchResult};
pub use place_search::PlaceSearch;
