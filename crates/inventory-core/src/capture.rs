//! Capture Workflow
//!
//! idle -> live-preview -> captured -> analyzing -> (result | error)
//!
//! Errors can retry back to live-preview or fall through to manual entry.
//! Every restart or stop bumps the epoch; an analysis that finishes under
//! an older epoch is discarded.

use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState<T> {
    Idle,
    LivePreview,
    Captured,
    Analyzing,
    Done(T),
    Failed(AppError),
}

impl<T> CaptureState<T> {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::LivePreview => "live-preview",
            CaptureState::Captured => "captured",
            CaptureState::Analyzing => "analyzing",
            CaptureState::Done(_) => "result",
            CaptureState::Failed(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while {from}")]
pub struct TransitionError {
    pub from: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureWorkflow<T> {
    state: CaptureState<T>,
    epoch: u64,
    /// Last captured frame (base64 JPEG, no data-URL prefix)
    image: Option<String>,
}

impl<T> Default for CaptureWorkflow<T> {
    fn default() -> Self {
        Self { state: CaptureState::Idle, epoch: 0, image: None }
    }
}

impl<T> CaptureWorkflow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CaptureState<T> {
        &self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state, CaptureState::LivePreview)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, CaptureState::Analyzing)
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            CaptureState::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match &self.state {
            CaptureState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Open the live preview. Abandons any analysis still in flight.
    pub fn start_preview(&mut self) {
        self.epoch += 1;
        self.image = None;
        self.state = CaptureState::LivePreview;
    }

    /// Camera acquisition failed
    pub fn preview_failed(&mut self, err: AppError) {
        self.epoch += 1;
        self.state = CaptureState::Failed(err);
    }

    /// Freeze a frame (from the live preview, or an uploaded image)
    pub fn capture(&mut self, image: String) -> Result<(), TransitionError> {
        if self.is_analyzing() {
            return Err(self.reject("capture"));
        }
        self.epoch += 1;
        self.image = Some(image);
        self.state = CaptureState::Captured;
        Ok(())
    }

    /// Hand the captured frame to analysis. Returns the ticket to pass to
    /// [`CaptureWorkflow::complete`].
    pub fn begin_analysis(&mut self) -> Result<u64, TransitionError> {
        if !matches!(self.state, CaptureState::Captured) {
            return Err(self.reject("analyze"));
        }
        self.state = CaptureState::Analyzing;
        Ok(self.epoch)
    }

    /// Deliver an analysis outcome. Returns `false` when the outcome was
    /// discarded because the workflow moved on.
    pub fn complete(&mut self, ticket: u64, outcome: Result<T, AppError>) -> bool {
        if ticket != self.epoch || !self.is_analyzing() {
            return false;
        }
        self.state = match outcome {
            Ok(value) => CaptureState::Done(value),
            Err(err) => CaptureState::Failed(err),
        };
        true
    }

    /// Error -> live-preview
    pub fn retry(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, CaptureState::Failed(_)) {
            return Err(self.reject("retry"));
        }
        self.start_preview();
        Ok(())
    }

    /// Error -> manual entry. The workflow returns to idle.
    pub fn manual_entry(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, CaptureState::Failed(_)) {
            return Err(self.reject("switch to manual entry"));
        }
        self.stop();
        Ok(())
    }

    /// Back to idle from anywhere; in-flight results are dropped.
    pub fn stop(&mut self) {
        self.epoch += 1;
        self.image = None;
        self.state = CaptureState::Idle;
    }

    fn reject(&self, action: &'static str) -> TransitionError {
        TransitionError { from: self.state.name(), action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut wf = CaptureWorkflow::<String>::new();
        wf.start_preview();
        assert!(wf.is_live());
        wf.capture("frame".into()).unwrap();
        let ticket = wf.begin_analysis().unwrap();
        assert!(wf.complete(ticket, Ok("Drill".into())));
        assert_eq!(wf.result().map(String::as_str), Some("Drill"));
        assert_eq!(wf.image(), Some("frame"));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut wf = CaptureWorkflow::<String>::new();
        wf.start_preview();
        wf.capture("frame".into()).unwrap();
        let ticket = wf.begin_analysis().unwrap();
        wf.stop();
        assert!(!wf.complete(ticket, Ok("late".into())));
        assert_eq!(wf.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_error_retry_and_manual_entry() {
        let mut wf = CaptureWorkflow::<String>::new();
        wf.start_preview();
        wf.capture("frame".into()).unwrap();
        let ticket = wf.begin_analysis().unwrap();
        wf.complete(ticket, Err(AppError::RecognitionFailed("blank".into())));
        assert_eq!(wf.state().name(), "error");

        wf.retry().unwrap();
        assert!(wf.is_live());

        wf.preview_failed(AppError::PermissionDenied);
        wf.manual_entry().unwrap();
        assert_eq!(wf.state(), &CaptureState::Idle);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut wf = CaptureWorkflow::<String>::new();
        assert!(wf.begin_analysis().is_err());
        assert!(wf.retry().is_err());
        wf.capture("upload".into()).unwrap();
        wf.begin_analysis().unwrap();
        let err = wf.capture("again".into()).unwrap_err();
        assert_eq!(err.to_string(), "cannot capture while analyzing");
    }
}
