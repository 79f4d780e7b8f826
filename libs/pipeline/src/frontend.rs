use crate::{
    ArtifactFile, ClassificationOrchestrator, Downloader, InferenceEngine, ModelSource,
    ResultRenderer, SampleProvider, SampleSelector, TrainingEngine, TrainingOrchestrator, View,
};
use common::{AppError, FrontendConfig, Hyperparameters, ImageInput, ModelMode};
use log::{debug, warn};

/// The three user actions of the page.
///
/// Each action clears the error surface, runs to a typed result, and only
/// then touches the page: results on success, the error text otherwise.
/// A failed action never changes the results table.
pub struct Frontend<E, T, P, D, V> {
    classifier: ClassificationOrchestrator<E>,
    trainer: TrainingOrchestrator<T, D>,
    samples: SampleSelector<P>,
    renderer: ResultRenderer,
    model_mode: ModelMode,
    view: V,
}

impl<E, T, P, D, V> Frontend<E, T, P, D, V>
where
    E: InferenceEngine,
    T: TrainingEngine,
    P: SampleProvider,
    D: Downloader,
    V: View,
{
    pub fn new(
        config: &FrontendConfig,
        inference: E,
        training: T,
        provider: P,
        downloader: D,
        view: V,
    ) -> Self {
        Self {
            classifier: ClassificationOrchestrator::new(inference),
            trainer: TrainingOrchestrator::new(training, downloader, &config.download_filename),
            samples: SampleSelector::new(provider),
            renderer: ResultRenderer::new(config.probability_scale),
            model_mode: config.model_mode,
            view,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Classify the image produced by `image`. `Ok(None)` means nothing is
    /// selected, which is not an error; the action just does nothing.
    /// Any earlier click still reading its file is dropped, even when this
    /// one fails before reaching the engine.
    pub async fn classify<F, I>(&self, image: I, upload: Option<F>)
    where
        F: ArtifactFile,
        I: FnOnce() -> Result<Option<ImageInput>, AppError>,
    {
        self.view.clear_error();
        self.classifier.supersede();

        let image = match image() {
            Ok(Some(image)) => image,
            Ok(None) => {
                debug!("classify: no image selected");
                return;
            }
            Err(e) => return self.report(e),
        };
        let model = match self.model_mode {
            ModelMode::Upload => ModelSource::Upload(upload),
            ModelMode::Bundled => ModelSource::Bundled,
        };

        match self.classifier.classify(image, model).await {
            Ok(vector) => self.view.show_results(&self.renderer.render(&vector)),
            Err(e) => self.report(e),
        }
    }

    /// Replace all three sample slots with fresh samples
    pub fn refresh_samples(&self) {
        self.view.clear_error();
        match self.samples.generate() {
            Ok(slots) => self.view.show_samples(&slots),
            Err(e) => self.report(e),
        }
    }

    /// Train a network and offer it for download
    pub fn train(&self, hyperparameters: &Hyperparameters) {
        self.view.clear_error();
        if let Err(e) = self.trainer.train(hyperparameters) {
            self.report(e);
        }
    }

    fn report(&self, error: AppError) {
        if error.is_reportable() {
            warn!("{:?}", error);
            self.view.show_error(&error.to_string());
        } else {
            debug!("not reported: {}", error);
        }
    }
}
