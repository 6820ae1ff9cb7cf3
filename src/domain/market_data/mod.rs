pub mod entities;
pub mod repositories;
pub mod synthetic;
pub mod value_objects;

pub use entities::{DailySeries, OhlcvPoint};
pub use repositories::{QuoteSource, RawQuotes};
pub use synthetic::{SyntheticGenerator, SyntheticProfile};
pub use value_objects::{Price, SourceKind, Symbol, Timestamp, Volume};
