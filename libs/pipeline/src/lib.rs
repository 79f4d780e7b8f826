//! Classification and training request pipeline
//!
//! Everything between a user action and what ends up on the page: reading the
//! uploaded network, calling the engine, turning scores into a table, and
//! reporting failures. The engine, the sample provider, the file picker and
//! the page itself are reached through the traits in [`boundary`], so the
//! whole flow runs natively under test.

pub mod boundary;
mod classify;
mod frontend;
mod ingestion;
mod render;
mod samples;
mod training;

pub use boundary::{ArtifactFile, Downloader, InferenceEngine, SampleProvider, TrainingEngine, View};
pub use classify::{ClassificationOrchestrator, ModelSource};
pub use frontend::Frontend;
pub use ingestion::ArtifactIngestion;
pub use render::{ResultRenderer, ResultTable, RESULT_HEADER};
pub use samples::{SampleSelector, SampleSlot, SampleSlots, SLOT_NAMES};
pub use training::TrainingOrchestrator;
