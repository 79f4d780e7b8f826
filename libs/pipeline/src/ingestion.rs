use crate::ArtifactFile;
use common::{AppError, ModelArtifact};
use log::debug;
use std::cell::Cell;

/// Reads uploaded networks into memory.
///
/// Every request takes a ticket. When a read finishes after a newer request
/// has taken one, its result is dropped as [`AppError::Superseded`], so only
/// the latest request ever reaches the engine. A request that fails before
/// reading anything still takes a ticket through [`supersede`](Self::supersede).
#[derive(Debug, Default)]
pub struct ArtifactIngestion {
    latest: Cell<u64>,
}

impl ArtifactIngestion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every read still in flight and return the new ticket
    pub fn supersede(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    pub async fn ingest<F: ArtifactFile>(&self, file: &F) -> Result<ModelArtifact, AppError> {
        self.ingest_as(self.supersede(), file).await
    }

    /// Read `file` under a ticket taken earlier from [`supersede`](Self::supersede)
    pub async fn ingest_as<F: ArtifactFile>(
        &self,
        ticket: u64,
        file: &F,
    ) -> Result<ModelArtifact, AppError> {
        debug!("reading {} (ticket {})", file.name(), ticket);

        let result = file.read_text().await;

        if self.latest.get() != ticket {
            debug!(
                "dropping {} (ticket {}), ticket {} is newer",
                file.name(),
                ticket,
                self.latest.get()
            );
            return Err(AppError::Superseded);
        }

        let text = result.map_err(|message| AppError::Ingestion {
            name: file.name(),
            message,
        })?;
        debug!("read {} bytes from {}", text.len(), file.name());
        Ok(ModelArtifact::new(text))
    }
}
