//! Timed progression through the agent workflow stages.
//!
//! The sequencer is purely presentational. It walks a counter from
//! [`IDLE`] through each stage index to `len()` on a jittered cadence and
//! publishes every value over a `watch` channel. It carries no business
//! data and never looks at the network request it runs beside.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

/// Counter value before any stage has started.
pub const IDLE: isize = -1;

const DEFAULT_BASE: Duration = Duration::from_millis(1000);
const DEFAULT_JITTER: Duration = Duration::from_millis(1000);

/// One named step of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    /// Short step name (`Research`, `SEO`, ...).
    pub name: &'static str,
    /// Agent shown while the step is active.
    pub agent: &'static str,
    pub description: &'static str,
}

/// The six stages of the content workflow, in order.
pub const WORKFLOW: [Stage; 6] = [
    Stage {
        name: "Research",
        agent: "Research Agent",
        description: "Gathers comprehensive information and insights",
    },
    Stage {
        name: "Writing",
        agent: "Content Writer",
        description: "Creates engaging, well-structured content",
    },
    Stage {
        name: "Editing",
        agent: "Editor Agent",
        description: "Improves clarity, grammar, and flow",
    },
    Stage {
        name: "SEO",
        agent: "SEO Optimizer",
        description: "Optimizes content for search engines",
    },
    Stage {
        name: "Platform",
        agent: "Platform Adapter",
        description: "Adapts content for different platforms",
    },
    Stage {
        name: "QA",
        agent: "Quality Assurance",
        description: "Ensures content meets quality standards",
    },
];

/// How a stage should be drawn for the current counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Pending,
    Active,
    Completed,
}

/// Active duration of each step: `base` plus up to `jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    pub base: Duration,
    pub jitter: Duration,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl StepTiming {
    /// No delay between steps.
    pub const fn instant() -> Self {
        Self {
            base: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Upper bound on a full run.
    pub fn max_total(&self, steps: usize) -> Duration {
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.base.saturating_add(self.jitter).saturating_mul(steps)
    }

    fn next_delay(&self) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(fastrand::u64(0..jitter_ms))
    }
}

/// Drives the workflow counter and publishes it to subscribers.
///
/// The sequencer is the only writer of its counter; views read it through
/// [`StepSequencer::subscribe`].
#[derive(Debug)]
pub struct StepSequencer {
    stages: &'static [Stage],
    timing: StepTiming,
    tx: watch::Sender<isize>,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new(&WORKFLOW, StepTiming::default())
    }
}

impl StepSequencer {
    /// Idle sequencer over `stages`.
    pub fn new(stages: &'static [Stage], timing: StepTiming) -> Self {
        let (tx, _rx) = watch::channel(IDLE);
        Self { stages, timing, tx }
    }

    /// Stages walked by [`run`](Self::run).
    pub fn stages(&self) -> &'static [Stage] {
        self.stages
    }

    /// Per-step delay settings.
    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    /// Number of stages, which is also the terminal counter value.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages to walk.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Receive every counter update.
    pub fn subscribe(&self) -> watch::Receiver<isize> {
        self.tx.subscribe()
    }

    /// Current counter value.
    pub fn current(&self) -> isize {
        *self.tx.borrow()
    }

    /// Whether no run is in progress or finished.
    pub fn is_idle(&self) -> bool {
        self.current() == IDLE
    }

    /// Whether the counter sits on the terminal value.
    pub fn is_complete(&self) -> bool {
        self.current() == self.terminal()
    }

    /// Status of stage `index` for the current counter.
    pub fn status(&self, index: usize) -> StageStatus {
        status_for(self.current(), index)
    }

    /// One-line summary of what is happening, or `None` when idle.
    pub fn status_line(&self) -> Option<String> {
        status_line_for(self.stages, self.current())
    }

    /// Walk through every stage, waiting a jittered delay on each, then
    /// settle on the terminal value.
    ///
    /// Dropping the returned future stops the walk where it is; callers
    /// that abandon a run should [`reset`](Self::reset) afterwards.
    pub async fn run(&self) {
        for (index, stage) in self.stages.iter().enumerate() {
            self.tx.send_replace(to_counter(index));
            let delay = self.timing.next_delay();
            debug!(step = index, stage = stage.name, delay_ms = delay.as_millis(), "workflow stage active");
            tokio::time::sleep(delay).await;
        }
        self.finish();
    }

    /// Jump straight to the terminal value.
    pub fn finish(&self) {
        self.tx.send_replace(self.terminal());
    }

    /// Return to [`IDLE`].
    pub fn reset(&self) {
        self.tx.send_replace(IDLE);
    }

    fn terminal(&self) -> isize {
        to_counter(self.stages.len())
    }
}

/// Status of stage `index` when the counter reads `current`.
pub fn status_for(current: isize, index: usize) -> StageStatus {
    let index = to_counter(index);
    if current == index {
        StageStatus::Active
    } else if current > index {
        StageStatus::Completed
    } else {
        StageStatus::Pending
    }
}

/// Summary line for `stages` at counter `current`.
pub fn status_line_for(stages: &[Stage], current: isize) -> Option<String> {
    let index = usize::try_from(current).ok()?;
    Some(match stages.get(index) {
        Some(stage) => format!("{} is working...", stage.agent),
        None => "Content creation completed!".to_owned(),
    })
}

fn to_counter(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
