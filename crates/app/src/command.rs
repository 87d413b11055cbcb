//! The [`Command`] trait — one reversible unit of work.

use domo_domain::error::DomoError;

/// A reversible encapsulation of one state change.
///
/// A command is immutable after construction: it holds the target
/// handle, the value to apply, and the prior value needed to undo, all
/// captured when the command is built. Commands never hold a reference
/// to the controller.
///
/// `execute` followed by `undo` must restore the state the target had
/// immediately before `execute`, regardless of the value set in between.
pub trait Command: Send {
    /// Apply the change.
    ///
    /// # Errors
    ///
    /// Returns [`DomoError::Validation`] when the captured value is out
    /// of range for the target, or [`DomoError::Unsupported`] when the
    /// target lost the required capability. State is unchanged on error.
    fn execute(&mut self) -> Result<(), DomoError>;

    /// Reapply the value captured before the first `execute`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`execute`](Self::execute).
    fn undo(&mut self) -> Result<(), DomoError>;

    /// Human-readable description, for history listings and logs.
    fn description(&self) -> String;
}
