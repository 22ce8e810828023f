use shared::protocol::TrainingOutcome;

use crate::error::WorkflowError;

/// Training lifecycle of one client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    Untrained,
    Training,
    Trained,
    TrainingFailed,
}

/// Observable snapshot of the session's cross-cutting state.
///
/// `trained` and the gate are not the same thing: during a retrain the
/// snapshot still reports `trained == true` from the earlier success, but
/// the gate stays closed until the in-flight attempt resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub trained: bool,
    pub accuracy: Option<f64>,
    pub last_error: Option<String>,
    pub pending: bool,
}

/// Owns the session state and is the only writer of it. Every mutation goes
/// through a named transition; there is no other way in.
#[derive(Debug)]
pub struct WorkflowController {
    phase: TrainingPhase,
    trained: bool,
    accuracy: Option<f64>,
    last_error: Option<String>,
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowController {
    pub fn new() -> Self {
        Self {
            phase: TrainingPhase::Untrained,
            trained: false,
            accuracy: None,
            last_error: None,
        }
    }

    /// Marks a training attempt in flight. At most one may be pending, so a
    /// second submission is rejected until the first resolves.
    pub fn submit_training(&mut self) -> Result<(), WorkflowError> {
        if self.phase == TrainingPhase::Training {
            return Err(WorkflowError::Gate(
                "a training request is already pending".to_string(),
            ));
        }
        self.phase = TrainingPhase::Training;
        Ok(())
    }

    /// Applies a resolution message. Applied unconditionally: there is no
    /// request-identity check, so a late response for a superseded attempt
    /// still lands.
    pub fn apply(&mut self, outcome: &TrainingOutcome) {
        match outcome {
            TrainingOutcome::Completed { accuracy } => self.on_success(*accuracy),
            TrainingOutcome::Failed { error } => self.on_failure(error.clone()),
        }
    }

    pub fn on_success(&mut self, accuracy: f64) {
        self.phase = TrainingPhase::Trained;
        self.trained = true;
        self.accuracy = Some(accuracy);
        self.last_error = None;
    }

    /// A failed attempt closes the predict gate and drops any stale
    /// accuracy from an earlier success.
    pub fn on_failure(&mut self, error: impl Into<String>) {
        self.phase = TrainingPhase::TrainingFailed;
        self.trained = false;
        self.accuracy = None;
        self.last_error = Some(error.into());
    }

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    /// Gate value the prediction form reads before submitting.
    pub fn predict_allowed(&self) -> bool {
        self.phase == TrainingPhase::Trained
    }

    pub fn state(&self) -> WorkflowState {
        WorkflowState {
            trained: self.trained,
            accuracy: self.accuracy,
            last_error: self.last_error.clone(),
            pending: self.phase == TrainingPhase::Training,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_untrained_with_gate_closed() {
        let controller = WorkflowController::new();
        assert_eq!(controller.phase(), TrainingPhase::Untrained);
        assert!(!controller.predict_allowed());
        assert_eq!(
            controller.state(),
            WorkflowState {
                trained: false,
                accuracy: None,
                last_error: None,
                pending: false,
            }
        );
    }

    #[test]
    fn successful_resolution_opens_the_gate() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("submit");
        assert!(controller.state().pending);
        assert!(!controller.predict_allowed());

        controller.apply(&TrainingOutcome::Completed { accuracy: 92.5 });
        assert_eq!(controller.phase(), TrainingPhase::Trained);
        assert!(controller.predict_allowed());
        assert_eq!(
            controller.state(),
            WorkflowState {
                trained: true,
                accuracy: Some(92.5),
                last_error: None,
                pending: false,
            }
        );
    }

    #[test]
    fn failed_resolution_records_error_and_closes_the_gate() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("submit");
        controller.apply(&TrainingOutcome::Failed {
            error: "bad csv".to_string(),
        });

        assert_eq!(controller.phase(), TrainingPhase::TrainingFailed);
        assert!(!controller.predict_allowed());
        let state = controller.state();
        assert!(!state.trained);
        assert_eq!(state.accuracy, None);
        assert_eq!(state.last_error.as_deref(), Some("bad csv"));
        assert!(!state.pending);
    }

    #[test]
    fn failure_after_success_drops_stale_accuracy() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("submit");
        controller.on_success(88.0);

        controller.submit_training().expect("resubmit");
        controller.on_failure("holdout split failed");

        let state = controller.state();
        assert!(!state.trained);
        assert_eq!(state.accuracy, None);
        assert_eq!(state.last_error.as_deref(), Some("holdout split failed"));
        assert!(!controller.predict_allowed());
    }

    #[test]
    fn duplicate_submission_is_rejected_while_pending() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("first submit");
        let err = controller.submit_training().expect_err("second submit");
        assert!(matches!(err, WorkflowError::Gate(_)));

        // The in-flight attempt still resolves normally.
        controller.on_success(90.0);
        assert!(controller.predict_allowed());
    }

    #[test]
    fn retraining_keeps_trained_flag_but_closes_the_gate() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("submit");
        controller.on_success(91.0);

        controller.submit_training().expect("retrain");
        let state = controller.state();
        assert!(state.trained, "earlier success survives until resolution");
        assert!(state.pending);
        assert!(!controller.predict_allowed());

        controller.on_success(95.0);
        assert!(controller.predict_allowed());
        assert_eq!(controller.state().accuracy, Some(95.0));
    }

    #[test]
    fn resubmitting_after_failure_is_permitted() {
        let mut controller = WorkflowController::new();
        controller.submit_training().expect("submit");
        controller.on_failure("bad csv");
        controller.submit_training().expect("retry after failure");
        assert_eq!(controller.phase(), TrainingPhase::Training);
    }
}
