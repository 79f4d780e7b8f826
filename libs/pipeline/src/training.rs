use crate::{Downloader, TrainingEngine};
use common::{AppError, Hyperparameters, ModelArtifact};
use log::info;

/// Trains a network and hands it to the user as a file.
///
/// The call is synchronous: the engine blocks until training is done.
pub struct TrainingOrchestrator<T, D> {
    engine: T,
    downloader: D,
    filename: String,
}

impl<T: TrainingEngine, D: Downloader> TrainingOrchestrator<T, D> {
    pub fn new(engine: T, downloader: D, filename: impl Into<String>) -> Self {
        Self {
            engine,
            downloader,
            filename: filename.into(),
        }
    }

    pub fn train(&self, hyperparameters: &Hyperparameters) -> Result<ModelArtifact, AppError> {
        info!(
            "training: hidden_neurons={:?} training_rounds={:?} learning_rate={:?}",
            hyperparameters.hidden_neurons,
            hyperparameters.training_rounds,
            hyperparameters.learning_rate
        );
        let artifact = ModelArtifact::new(
            self.engine
                .train(hyperparameters)
                .map_err(AppError::Boundary)?,
        );

        self.downloader.offer(&self.filename, artifact.as_str())?;
        info!("offered {} ({} bytes)", self.filename, artifact.len());
        Ok(artifact)
    }
}
