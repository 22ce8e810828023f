use shared::{domain::Feature, protocol::PredictionInput};

use crate::error::WorkflowError;

/// Prediction form model. Holds the current selection for every feature and
/// keeps it domain-legal: the input is private and [`set_field`] is the only
/// mutation path, so the form is always serializable as-is.
///
/// [`set_field`]: PredictionForm::set_field
#[derive(Debug, Default)]
pub struct PredictionForm {
    input: PredictionInput,
    pending: bool,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates one field, rejecting values outside the feature's domain.
    /// Returns the full input after the update.
    pub fn set_field(
        &mut self,
        feature: Feature,
        value: &str,
    ) -> Result<PredictionInput, WorkflowError> {
        if !feature.admits(value) {
            return Err(WorkflowError::Validation(format!(
                "'{value}' is not a legal value for {}; expected one of {}",
                feature.name(),
                feature.domain().join(", ")
            )));
        }
        self.input.set(feature, value);
        Ok(self.input.clone())
    }

    pub fn input(&self) -> &PredictionInput {
        &self.input
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Serializes the current selection for submission. `allowed` is the
    /// controller's gate value; an untrained session cannot submit, and a
    /// form with an unresolved attempt cannot double up.
    pub fn submit(&mut self, allowed: bool) -> Result<PredictionInput, WorkflowError> {
        if !allowed {
            return Err(WorkflowError::Gate(
                "the model must be trained before a prediction can be made".to_string(),
            ));
        }
        if self.pending {
            return Err(WorkflowError::Gate(
                "a prediction request is already pending".to_string(),
            ));
        }
        self.pending = true;
        Ok(self.input.clone())
    }

    /// Clears the pending flag once the attempt resolves, whatever the
    /// outcome. Requests are not cancellable and carry no timeout.
    pub fn resolve(&mut self) {
        self.pending = false;
    }
}
