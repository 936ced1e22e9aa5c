//! Where the ticker writes its progress

use std::time::Duration;

use super::schedule::ScheduleEntry;

/// Output side of a ticker run. The ticker is the only writer for the
/// lifetime of one run; [`ProgressSink::finish`] is always the last call.
pub trait ProgressSink: Send + 'static {
    /// A schedule entry, either on its tick or flushed early on stop
    fn entry(&mut self, index: usize, entry: &ScheduleEntry, flushed: bool);

    /// Redraw the in-place spinner line
    fn spin(&mut self, elapsed: Duration, glyph: char);

    /// The deadline passed with no signal
    fn timed_out(&mut self, deadline: Duration);

    fn finish(&mut self);
}

impl ProgressSink for Box<dyn ProgressSink> {
    fn entry(&mut self, index: usize, entry: &ScheduleEntry, flushed: bool) {
        (**self).entry(index, entry, flushed)
    }

    fn spin(&mut self, elapsed: Duration, glyph: char) {
        (**self).spin(elapsed, glyph)
    }

    fn timed_out(&mut self, deadline: Duration) {
        (**self).timed_out(deadline)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}
