use crate::AppError;
use serde::{Deserialize, Serialize};

/// Ids of the page regions the front end reads from and writes to.
///
/// A trigger whose element is missing from the page is simply not wired, so
/// one config serves the drawing, sample and training pages alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub upload_input: String,
    /// Slot regions in order `one`, `two`, `three`
    pub sample_slots: [String; 3],
    pub hidden_neurons: String,
    pub training_rounds: String,
    pub learning_rate: String,
    pub result_table: String,
    pub error_text: String,
    pub classify_drawing_button: String,
    pub classify_sample_button: String,
    pub samples_button: String,
    pub train_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "canvas".to_string(),
            upload_input: "uploadInput".to_string(),
            sample_slots: [
                "imageone".to_string(),
                "imagetwo".to_string(),
                "imagethree".to_string(),
            ],
            hidden_neurons: "hidden-neurons".to_string(),
            training_rounds: "training-rounds".to_string(),
            learning_rate: "learning-rate".to_string(),
            result_table: "resulttable".to_string(),
            error_text: "error-message-text".to_string(),
            classify_drawing_button: "submitbutton".to_string(),
            classify_sample_button: "guess".to_string(),
            samples_button: "get3images".to_string(),
            train_button: "train-neural-network".to_string(),
        }
    }
}

impl ElementIds {
    fn all(&self) -> impl Iterator<Item = &String> {
        [
            &self.canvas,
            &self.upload_input,
            &self.hidden_neurons,
            &self.training_rounds,
            &self.learning_rate,
            &self.result_table,
            &self.error_text,
            &self.classify_drawing_button,
            &self.classify_sample_button,
            &self.samples_button,
            &self.train_button,
        ]
        .into_iter()
        .chain(self.sample_slots.iter())
    }
}

/// Pen and paper colours, RGBA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: [u8; 4],
    pub background: [u8; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
        }
    }
}

/// How the engine's scores map to the `%` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityScale {
    /// Scores are in [0, 1] and get multiplied by 100
    #[default]
    Fraction,
    /// Scores are already percentages
    Percent,
}

impl ProbabilityScale {
    pub fn to_percent(self, score: f64) -> f64 {
        match self {
            ProbabilityScale::Fraction => score * 100.0,
            ProbabilityScale::Percent => score,
        }
    }
}

/// Where the classifier's model comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelMode {
    /// The user must upload a trained network
    #[default]
    Upload,
    /// The engine ships its own default network
    Bundled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub elements: ElementIds,
    pub stroke: StrokeStyle,
    pub download_filename: String,
    pub probability_scale: ProbabilityScale,
    pub model_mode: ModelMode,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            stroke: StrokeStyle::default(),
            download_filename: "your-neural-network.txt".to_string(),
            probability_scale: ProbabilityScale::default(),
            model_mode: ModelMode::default(),
            log_level: "info".to_string(),
        }
    }
}

impl FrontendConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.stroke.width.is_finite() && self.stroke.width > 0.0) {
            return Err(AppError::Config(format!(
                "stroke width must be > 0, got {}",
                self.stroke.width
            )));
        }

        if self.download_filename.trim().is_empty() {
            return Err(AppError::Config("download_filename must not be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "log_level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.log_level
            )));
        }

        if self.elements.all().any(|id| id.trim().is_empty()) {
            return Err(AppError::Config("element ids must not be empty".to_string()));
        }

        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Deserialize from JSON and validate. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
