/// Events emitted while a collection is being resolved.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// Resolution of `total` independent overlap components is about to start.
    ComponentsStart { total: u64 },
    /// One component finished; `hits` is the number of hits it contained.
    ComponentResolved { hits: usize },
    ComponentsFinish,

    /// A note worth showing to the user, such as skipped hits or an exhausted time budget.
    Message(String),
}

/// Receives progress events. Components may be resolved on several threads at once,
/// so the callback must be shareable.
pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports a phase start, runs `f`, then reports the phase finish.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }
}
