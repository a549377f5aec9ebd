//! Progress reporting hooks for workflows
//!
//! Workflows describe what they are doing through [`Progress`]; the CLI
//! renders it as spinners while tests record it.

/// Receiver of workflow progress
pub trait Progress: Send + Sync {
    /// A long-running step has started
    fn start(&self, message: &str);

    /// The current step finished successfully
    fn succeed(&self);

    /// The current step failed
    fn fail(&self);

    /// A plain status line outside of any step
    fn println(&self, line: &str);
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {
    fn start(&self, _message: &str) {}

    fn succeed(&self) {}

    fn fail(&self) {}

    fn println(&self, _line: &str) {}
}
