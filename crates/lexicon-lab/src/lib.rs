pub mod engine;
pub mod error;
pub mod handlers;
pub mod index;
pub mod pattern;
pub mod query;
pub mod snapshot;

pub use engine::{Lexicon, Limits};
pub use error::SearchError;
pub use handlers::{AppState, router};
pub use index::{IndexBundle, IndexKey};
pub use pattern::{CompiledPattern, CompiledSlot, Hints, MatchMode, SlotMatcher};
pub use query::{Hit, Pagination, SearchQuery, SearchResult, parse_tones};
