//! Seams to everything outside the pipeline.
//!
//! Engine-side failures are reported as the thrown message, unchanged.

use crate::{ResultTable, SampleSlots};
use common::{AppError, Hyperparameters, ImageInput, ModelArtifact};
use std::future::Future;

/// Turns a model and an image into ten digit scores
pub trait InferenceEngine {
    /// `artifact` is `None` when the engine should use its bundled model
    fn classify(&self, artifact: Option<&ModelArtifact>, image: &ImageInput)
        -> Result<Vec<f64>, String>;
}

/// Trains a fresh network and returns it serialized
pub trait TrainingEngine {
    fn train(&self, hyperparameters: &Hyperparameters) -> Result<String, String>;
}

/// Hands out one ready-to-display reference image per call
pub trait SampleProvider {
    fn sample(&self) -> Result<String, String>;
}

/// A file the user picked in the upload control
pub trait ArtifactFile {
    fn name(&self) -> String;

    /// Read the whole file as text. Resolves exactly once.
    fn read_text(&self) -> impl Future<Output = Result<String, String>>;
}

/// Offers text to the user as a file download
pub trait Downloader {
    fn offer(&self, filename: &str, contents: &str) -> Result<(), AppError>;
}

/// The page regions the pipeline writes to
pub trait View {
    fn clear_error(&self);
    fn show_error(&self, message: &str);
    fn show_results(&self, table: &ResultTable);
    fn show_samples(&self, slots: &SampleSlots);
}

impl<T: InferenceEngine + ?Sized> InferenceEngine for &T {
    fn classify(
        &self,
        artifact: Option<&ModelArtifact>,
        image: &ImageInput,
    ) -> Result<Vec<f64>, String> {
        (**self).classify(artifact, image)
    }
}

impl<T: TrainingEngine + ?Sized> TrainingEngine for &T {
    fn train(&self, hyperparameters: &Hyperparameters) -> Result<String, String> {
        (**self).train(hyperparameters)
    }
}

impl<T: SampleProvider + ?Sized> SampleProvider for &T {
    fn sample(&self) -> Result<String, String> {
        (**self).sample()
    }
}

impl<T: Downloader + ?Sized> Downloader for &T {
    fn offer(&self, filename: &str, contents: &str) -> Result<(), AppError> {
        (**self).offer(filename, contents)
    }
}

impl<T: View + ?Sized> View for &T {
    fn clear_error(&self) {
        (**self).clear_error()
    }

    fn show_error(&self, message: &str) {
        (**self).show_error(message)
    }

    fn show_results(&self, table: &ResultTable) {
        (**self).show_results(table)
    }

    fn show_samples(&self, slots: &SampleSlots) {
        (**self).show_samples(slots)
    }
}
