//! The set of models a forecast run uses.

use mrr_decompose::DecompositionSpec;
use mrr_sarima::{FitOptions, SarimaSpec};
use mrr_series::ConfidenceLevel;

use crate::decomposition::DecompositionModel;
use crate::error::ForecastError;
use crate::model::ForecastModel;
use crate::sarima::SarimaModel;

/// Settings for every model the registry can build.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    pub sarima: SarimaSpec,
    pub fit_options: FitOptions,
    /// `None` disables the decomposition model.
    pub decomposition: Option<DecompositionSpec>,
    pub level: ConfidenceLevel,
}

/// Ordered collection of uniquely named models.
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<Box<dyn ForecastModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// SARIMA always, decomposition when configured.
    pub fn from_config(config: &ModelConfig) -> Self {
        let mut models: Vec<Box<dyn ForecastModel>> = vec![Box::new(SarimaModel::new(
            config.sarima,
            config.fit_options,
            config.level,
        ))];
        if let Some(spec) = config.decomposition {
            models.push(Box::new(DecompositionModel::new(spec, config.level)));
        }
        Self { models }
    }

    /// Adds a model after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::DuplicateSource`] if a model with the same
    /// name is already registered.
    pub fn register(&mut self, model: Box<dyn ForecastModel>) -> Result<(), ForecastError> {
        if self.models.iter().any(|m| m.name() == model.name()) {
            return Err(ForecastError::DuplicateSource {
                name: model.name().to_string(),
            });
        }
        self.models.push(model);
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ForecastModel> {
        self.models.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
