use crate::{ArtifactFile, ArtifactIngestion, InferenceEngine};
use common::{AppError, ImageInput, ProbabilityVector};
use log::{debug, info};

/// Where the network for one classification comes from
#[derive(Debug)]
pub enum ModelSource<F> {
    /// Engine uses its built-in network
    Bundled,
    /// An uploaded network is required; `None` when the user picked no file
    Upload(Option<F>),
}

/// Fuses an image and a network into one engine call.
pub struct ClassificationOrchestrator<E> {
    engine: E,
    ingestion: ArtifactIngestion,
}

impl<E: InferenceEngine> ClassificationOrchestrator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            ingestion: ArtifactIngestion::new(),
        }
    }

    /// Cancel any classification still waiting on its file read
    pub fn supersede(&self) {
        self.ingestion.supersede();
    }

    /// Classify `image`. When an upload is required the file is read to
    /// completion before the engine is called; a missing file fails before
    /// any read is attempted. Either way, older pending reads are dropped.
    pub async fn classify<F: ArtifactFile>(
        &self,
        image: ImageInput,
        model: ModelSource<F>,
    ) -> Result<ProbabilityVector, AppError> {
        let ticket = self.ingestion.supersede();
        if image.is_empty() {
            return Err(AppError::no_image());
        }

        let artifact = match model {
            ModelSource::Bundled => None,
            ModelSource::Upload(None) => return Err(AppError::no_artifact()),
            ModelSource::Upload(Some(file)) => {
                Some(self.ingestion.ingest_as(ticket, &file).await?)
            }
        };

        debug!(
            "querying engine with {} image ({} chars), {}",
            match image {
                ImageInput::Canvas(_) => "drawn",
                ImageInput::Sample(_) => "sample",
            },
            image.as_str().len(),
            match &artifact {
                Some(a) => format!("uploaded network ({} bytes)", a.len()),
                None => "bundled network".to_string(),
            }
        );
        let scores = self
            .engine
            .classify(artifact.as_ref(), &image)
            .map_err(AppError::Boundary)?;
        let vector = ProbabilityVector::from_scores(scores)?;

        info!("classified as {}", vector.best_guess());
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CanvasImage, ModelArtifact};
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Spy(RefCell<Vec<Option<String>>>);

    impl InferenceEngine for Spy {
        fn classify(
            &self,
            artifact: Option<&ModelArtifact>,
            _image: &ImageInput,
        ) -> Result<Vec<f64>, String> {
            self.0.borrow_mut().push(artifact.map(|a| a.as_str().to_string()));
            Ok(vec![0.1; 10])
        }
    }

    struct File(&'static str);

    impl ArtifactFile for File {
        fn name(&self) -> String {
            "network.txt".to_string()
        }

        async fn read_text(&self) -> Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    fn drawing() -> ImageInput {
        ImageInput::Canvas(CanvasImage::new("data:image/png;base64,iVBORw0KGgo="))
    }

    #[test]
    fn test_bundled_mode_sends_no_artifact() {
        let spy = Spy::default();
        let orchestrator = ClassificationOrchestrator::new(&spy);

        block_on(orchestrator.classify(drawing(), ModelSource::<File>::Bundled)).unwrap();
        assert_eq!(*spy.0.borrow(), vec![None]);
    }

    #[test]
    fn test_uploaded_artifact_is_forwarded_verbatim() {
        let spy = Spy::default();
        let orchestrator = ClassificationOrchestrator::new(&spy);

        block_on(orchestrator.classify(drawing(), ModelSource::Upload(Some(File("{\"w\":1}")))))
            .unwrap();
        assert_eq!(*spy.0.borrow(), vec![Some("{\"w\":1}".to_string())]);
    }

    #[test]
    fn test_missing_upload_skips_engine() {
        let spy = Spy::default();
        let orchestrator = ClassificationOrchestrator::new(&spy);

        let err = block_on(orchestrator.classify(drawing(), ModelSource::<File>::Upload(None)))
            .unwrap_err();
        assert_eq!(err, AppError::no_artifact());
        assert!(spy.0.borrow().is_empty());
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let spy = Spy::default();
        let orchestrator = ClassificationOrchestrator::new(&spy);

        let err = block_on(orchestrator.classify(
            ImageInput::Canvas(CanvasImage::new("")),
            ModelSource::<File>::Bundled,
        ))
        .unwrap_err();
        assert_eq!(err, AppError::no_image());
        assert!(spy.0.borrow().is_empty());
    }
}
