//! Unified content lookup: one date-ordered, searchable catalogue over the
//! news, event, project and blog collections.

pub mod aggregator;
pub mod fetcher;
pub mod filter;
pub mod presenter;
pub mod record;
pub mod sequence;
pub mod slider;

pub use aggregator::{AggregateOptions, Aggregator};
pub use fetcher::{CollectionFetcher, ContentStore, PublishedFilter};
pub use presenter::{ContentDetail, ContentHit, SearchOutcome, SliderPayload};
pub use record::{ContentRecord, ContentType, PublicationStatus};
pub use slider::SliderState;
