//! Bounded diagnostic log shared by the solvers.

/// Maximum number of lines a single solve records.
pub const TRACE_LIMIT: usize = 10_000;

/// Collects trace lines when enabled. Lines are built lazily so a disabled
/// trace never formats anything.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    lines: Option<Vec<String>>,
}

impl Trace {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            lines: enabled.then(Vec::new),
        }
    }

    pub(crate) fn record<F>(&mut self, line: F)
    where
        F: FnOnce() -> String,
    {
        if let Some(lines) = self.lines.as_mut()
            && lines.len() < TRACE_LIMIT
        {
            lines.push(line());
        }
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.lines.unwrap_or_default()
    }
}
