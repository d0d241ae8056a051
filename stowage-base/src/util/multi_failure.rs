use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use std::panic;

/// Guard object which collects multiple panics or other reports of failure,
/// then panics when it is dropped if any occurred.
///
/// Randomized tests use this to run every seed and report all of the failing ones,
/// rather than stopping at the first.
#[derive(Debug, Default)]
pub struct MultiFailure {
    /// Label of each failed case, in the order they failed.
    failures: Vec<String>,
}

impl MultiFailure {
    /// Constructs an empty [`MultiFailure`].
    ///
    /// If nothing else is done to it, it will have no effect.
    #[inline(never)]
    #[must_use = "this is useless if never invoked to collect failures"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f`, and if it unwinds, record a failure labeled `label` and defer it
    /// until this [`MultiFailure`] is dropped.
    #[inline(never)]
    pub fn catch<O, F>(&mut self, label: impl Into<String>, f: F) -> Option<O>
    where
        F: FnOnce() -> O,
        F: panic::UnwindSafe,
    {
        match panic::catch_unwind(f) {
            Ok(output) => Some(output),
            Err(_panic_payload) => {
                // The panic hook has already printed a report.
                self.failures.push(label.into());
                None
            }
        }
    }

    /// Record a failure without panicking.
    #[inline(never)]
    pub fn fail(&mut self, label: impl Into<String>) {
        let label = label.into();
        std::eprintln!("failure: {label}");
        self.failures.push(label);
    }

    /// Returns whether any failures have been recorded so far.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Drop for MultiFailure {
    #[inline(never)]
    fn drop(&mut self) {
        let Self { failures } = self;

        if std::thread::panicking() {
            // Don't double-panic.
            return;
        }

        if failures.is_empty() {
            return;
        }

        let count = failures.len();
        let summary_message = format!(
            "{count} failure{s_were} found: {list}",
            s_were = if count == 1 { " was" } else { "s were" },
            list = failures.join(", "),
        );
        std::eprintln!("\n{summary_message}");
        // By using `resume_unwind()`, we don't invoke the panic hook a second time.
        panic::resume_unwind(Box::new(summary_message));
    }
}

#[cfg(test)]
mod tests {
    use super::{panic, *};

    #[test]
    fn expected_success() {
        let f = MultiFailure::new();
        assert!(f.is_empty());
    }

    #[test]
    fn catch_passes_output_through() {
        let mut f = MultiFailure::new();
        assert_eq!(f.catch("ok", || 7), Some(7));
    }

    #[test]
    #[should_panic = "3 failures were found: seed 0, seed 1, seed 2"]
    fn expected_failure() {
        let mut f = MultiFailure::new();

        for i in 0..3 {
            f.catch(format!("seed {i}"), || {
                panic!("test panic {i}");
            });
        }
    }

    #[test]
    #[should_panic = "1 failure was found: manual"]
    fn fail_without_panic() {
        let mut f = MultiFailure::new();
        f.fail("manual");
    }
}
