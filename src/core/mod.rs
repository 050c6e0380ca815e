pub mod fetcher;
pub mod normalize;

pub use crate::domain::model::{DailyRecord, DailySummary, FishCatch, QueryKind, RawPost};
pub use crate::domain::ports::{CatchReader, CatchWriter, Notifier, PostSource, RawArchive};
pub use crate::utils::error::Result;
pub use fetcher::{FetchOptions, FetchPipeline, RunReport, RunStatus};
