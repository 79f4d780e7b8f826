mod config;
mod error;
mod input;
mod probability;

pub use config::{ElementIds, FrontendConfig, ModelMode, ProbabilityScale, StrokeStyle};
pub use error::{AppError, NO_ARTIFACT_MESSAGE, NO_IMAGE_MESSAGE};
pub use input::{CanvasImage, Hyperparameters, ImageInput, ModelArtifact, Point, SampleImage};
pub use probability::{ProbabilityVector, DIGIT_CLASSES};
