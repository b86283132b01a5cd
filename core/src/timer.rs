use std::time::Instant;

/// Wall-clock instants bracketing the most recent completed execution of a
/// plan.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TimingSample {
    before: Option<Instant>,
    after: Option<Instant>,
}

impl TimingSample {
    pub(crate) fn record(&mut self, before: Instant, after: Instant) {
        self.before = Some(before);
        self.after = Some(after);
    }

    /// Seconds between the two instants, if an execution has completed.
    pub(crate) fn delta(&self) -> Option<f64> {
        match (self.before, self.after) {
            (Some(before), Some(after)) => Some(after.duration_since(before).as_secs_f64()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TimingSample;

    #[test]
    fn delta_follows_last_record() {
        let mut sample: TimingSample = TimingSample::default();
        assert_eq!(sample.delta(), None);

        let start: Instant = Instant::now();
        sample.record(start, start + Duration::from_millis(5));
        assert_eq!(sample.delta(), Some(0.005));

        sample.record(start, start);
        assert_eq!(sample.delta(), Some(0.0));
    }
}
