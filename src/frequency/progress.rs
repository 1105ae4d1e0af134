//! Progress reporting.
//!
//! The caller may supply a callback taking a percentage. [`Progress`]
//! guarantees the callback sees a non-decreasing sequence, that values below
//! 100 are used while work is under way, and that exactly one final 100 is
//! delivered by [`Progress::finish`].

/// Wrapper around an optional progress callback.
pub struct Progress<'a> {
    callback: Option<&'a mut dyn FnMut(u8)>,
    last: u8,
    finished: bool,
}

impl std::fmt::Debug for Progress<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("callback", &self.callback.is_some())
            .field("last", &self.last)
            .finish()
    }
}

impl<'a> Progress<'a> {
    /// Wrap a callback; `None` makes every report a no-op.
    pub fn new(callback: Option<&'a mut dyn FnMut(u8)>) -> Self {
        Progress {
            callback,
            last: 0,
            finished: false,
        }
    }

    /// A reporter with no callback.
    pub fn silent() -> Self {
        Progress::new(None)
    }

    /// Report an intermediate percentage. Values are capped at 99 and never
    /// go backwards.
    pub fn report(&mut self, percent: u8) {
        let percent = percent.min(99);
        if percent <= self.last || self.finished {
            return;
        }
        self.last = percent;
        if let Some(callback) = self.callback.as_mut() {
            callback(percent);
        }
    }

    /// Report progress `done / total` through the phase spanning
    /// `start..end` percent.
    pub fn report_phase(&mut self, start: u8, end: u8, done: usize, total: usize) {
        let span = end.saturating_sub(start) as usize;
        let offset = if total == 0 { span } else { span * done.min(total) / total };
        self.report(start.saturating_add(offset as u8));
    }

    /// Report completion.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.last = 100;
        if let Some(callback) = self.callback.as_mut() {
            callback(100);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_are_monotonic() {
        let mut seen = Vec::new();
        let mut record = |p: u8| seen.push(p);
        {
            let mut progress = Progress::new(Some(&mut record));
            progress.report(10);
            progress.report(5);
            progress.report(10);
            progress.report(100);
            progress.report(50);
            progress.finish();
            progress.finish();
        }
        assert_eq!(seen, vec![10, 99, 100]);
    }

    #[test]
    fn test_report_phase() {
        let mut seen = Vec::new();
        let mut record = |p: u8| seen.push(p);
        {
            let mut progress = Progress::new(Some(&mut record));
            progress.report_phase(0, 80, 1, 4);
            progress.report_phase(0, 80, 4, 4);
            progress.report_phase(80, 85, 0, 0);
        }
        assert_eq!(seen, vec![20, 80, 85]);
    }

    #[test]
    fn test_silent_progress() {
        let mut progress = Progress::silent();
        progress.report(40);
        progress.finish();
        assert_eq!(progress.last, 100);
    }
}
