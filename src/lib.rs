pub mod catalog;
pub mod cli;
pub mod error;
pub mod format;
pub mod history;
pub mod logging;
pub mod search;
pub mod session;
pub mod types;

pub use error::{HistoryError, Result};
pub use history::{FileStore, KeyValueStore, MemoryStore, RecentSearches};
pub use search::{FilterState, FilterUpdate, QueryEngine, SearchResult};
pub use session::SearchSession;
pub use types::{Condition, Event, Item, Seller};
