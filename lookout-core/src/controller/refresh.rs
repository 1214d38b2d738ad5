use std::{fmt, mem, time::Duration};

use crate::{
    dashboard::Dashboard,
    data::Waiting,
    orchestrator::{Call, Orchestrator},
    runtime::Timer,
    util::Sequence,
};

/// Tags one activation of the refresh loop.  Responses carry the epoch they
/// were requested under and are dropped once it is no longer live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

enum LoopState {
    Idle,
    Active { epoch: Epoch, timer: Option<Timer> },
}

pub struct RefreshLoop {
    interval: Duration,
    epochs: Sequence<u64>,
    state: LoopState,
    pub waiting: Waiting,
}

impl RefreshLoop {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            epochs: Sequence::new(1),
            state: LoopState::Idle,
            waiting: Waiting::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, LoopState::Active { .. })
    }

    pub fn epoch(&self) -> Option<Epoch> {
        match self.state {
            LoopState::Active { epoch, .. } => Some(epoch),
            LoopState::Idle => None,
        }
    }

    /// Whether results requested under `epoch` may still be applied.
    pub fn accepts(&self, epoch: Epoch) -> bool {
        self.epoch() == Some(epoch)
    }

    /// Refreshes right away, then on every tick until stopped.  Starting an
    /// active loop restarts it under a new epoch.
    pub fn start(&mut self, ctx: &Orchestrator<Dashboard>) -> Epoch {
        self.stop();
        let epoch = Epoch(self.epochs.advance());
        self.refresh(ctx, epoch);
        let timer = Timer::repeating(self.interval, ctx.sink().clone(), move |d: &mut Dashboard| {
            d.refresh_tick(epoch)
        });
        let timer = match timer {
            Ok(timer) => Some(timer),
            Err(err) => {
                log::error!("failed to arm refresh timer: {}", err);
                None
            }
        };
        self.state = LoopState::Active { epoch, timer };
        log::debug!("refresh loop {} started", epoch);
        epoch
    }

    /// Cancels the timer and waits for its thread.  Stopping an idle loop
    /// does nothing.
    pub fn stop(&mut self) {
        if let LoopState::Active { epoch, timer } = mem::replace(&mut self.state, LoopState::Idle) {
            if let Some(timer) = timer {
                timer.cancel();
            }
            log::debug!("refresh loop {} stopped", epoch);
        }
    }

    pub(crate) fn refresh(&mut self, ctx: &Orchestrator<Dashboard>, epoch: Epoch) {
        ctx.call(
            &mut self.waiting,
            Call::new(refresh_waiting, |api| api.get_state())
                .on_success(move |d: &mut Dashboard, state| d.apply_refresh(epoch, state))
                .on_error(move |d: &mut Dashboard, status, error| {
                    d.refresh_failed(epoch, status, error)
                }),
        );
    }
}

fn refresh_waiting(d: &mut Dashboard) -> &mut Waiting {
    &mut d.refresh.waiting
}
