/// Progress reporting hook for long batches.
///
/// The command layer reports through this trait and never draws anything
/// itself; the CLI supplies a terminal bar, tests supply [`NoProgress`] or a
/// recorder.
pub trait Progress {
    fn start(&mut self, label: &str, total: usize);
    fn tick(&mut self);
    fn finish(&mut self);
}

/// Discards every update.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _label: &str, _total: usize) {}
    fn tick(&mut self) {}
    fn finish(&mut self) {}
}

#[cfg(any(test, feature = "test_utils"))]
pub mod recording {
    use super::Progress;

    /// One finished (or abandoned) bar.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Bar {
        pub label: String,
        pub total: usize,
        pub ticks: usize,
        pub finished: bool,
    }

    /// Keeps every bar it was asked to draw.
    #[derive(Debug, Default)]
    pub struct RecordingProgress {
        pub bars: Vec<Bar>,
    }

    impl Progress for RecordingProgress {
        fn start(&mut self, label: &str, total: usize) {
            self.bars.push(Bar {
                label: label.to_string(),
                total,
                ticks: 0,
                finished: false,
            });
        }

        fn tick(&mut self) {
            if let Some(bar) = self.bars.last_mut() {
                bar.ticks += 1;
            }
        }

        fn finish(&mut self) {
            if let Some(bar) = self.bars.last_mut() {
                bar.finished = true;
            }
        }
    }
}
