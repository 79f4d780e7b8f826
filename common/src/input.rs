/// Pixel position relative to the drawing surface's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Snapshot of the drawing surface as a `data:image/png;base64,...` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasImage(String);

impl CanvasImage {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Markup fragment produced by the sample provider, usually an `<img>` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleImage(String);

impl SampleImage {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Image handed to the inference boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    Canvas(CanvasImage),
    Sample(SampleImage),
}

impl ImageInput {
    pub fn as_str(&self) -> &str {
        match self {
            ImageInput::Canvas(image) => image.as_str(),
            ImageInput::Sample(image) => image.as_str(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

/// Serialized trained model. Never inspected, only passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact(String);

impl ModelArtifact {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw text of the three training inputs. The training engine validates them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hyperparameters {
    pub hidden_neurons: String,
    pub training_rounds: String,
    pub learning_rate: String,
}

impl Hyperparameters {
    pub fn new(
        hidden_neurons: impl Into<String>,
        training_rounds: impl Into<String>,
        learning_rate: impl Into<String>,
    ) -> Self {
        Self {
            hidden_neurons: hidden_neurons.into(),
            training_rounds: training_rounds.into(),
            learning_rate: learning_rate.into(),
        }
    }
}
