//! The one-second heartbeat of a running countdown.
//!
//! An [`ActiveDriver`] schedules [`TickMsg`]s through the runtime's tick
//! command. Each driver has a unique id and a tag that is bumped every time it
//! is installed or cancelled, so ticks scheduled by an earlier installation are
//! recognised and dropped. At most one tick chain per driver is ever live.
//!
//! ```rust
//! use countdown_widget::driver::ActiveDriver;
//! use std::time::Duration;
//!
//! let mut driver = ActiveDriver::new(Duration::from_secs(1));
//! let _cmd = driver.install();
//! let tick = driver.current_tick();
//! assert!(driver.accepts(&tick));
//!
//! driver.cancel();
//! assert!(!driver.accepts(&tick));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Default spacing between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A scheduled tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickMsg {
    /// Driver that scheduled the tick.
    pub id: i64,
    tag: i64,
}

/// Asks the widget to drop notices whose display time has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeExpiredMsg {
    /// Driver of the widget the notice belongs to.
    pub id: i64,
}

/// Schedules the periodic tick for one countdown.
#[derive(Debug, Clone)]
pub struct ActiveDriver {
    id: i64,
    tag: i64,
    interval: Duration,
    active: bool,
}

impl Default for ActiveDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl ActiveDriver {
    /// An inactive driver ticking every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            id: next_id(),
            tag: 0,
            interval,
            active: false,
        }
    }

    /// Unique id of this driver.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Spacing between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick chain is live.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a fresh tick chain, superseding any previous one.
    pub fn install(&mut self) -> Cmd {
        self.tag += 1;
        self.active = true;
        self.schedule()
    }

    /// Stops the tick chain. Ticks already in flight will be rejected.
    pub fn cancel(&mut self) {
        if self.active {
            self.tag += 1;
        }
        self.active = false;
    }

    /// Whether `msg` belongs to the live tick chain.
    pub fn accepts(&self, msg: &TickMsg) -> bool {
        self.active && msg.id == self.id && msg.tag == self.tag
    }

    /// Schedules the next tick of the live chain, or nothing when inactive.
    pub fn next(&self) -> Option<Cmd> {
        self.active.then(|| self.schedule())
    }

    /// The tick the driver currently accepts.
    pub fn current_tick(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Schedules a [`NoticeExpiredMsg`] for this driver after `after`.
    pub fn expire_notice_after(&self, after: Duration) -> Cmd {
        let id = self.id;
        bubbletea_tick(after, move |_| Box::new(NoticeExpiredMsg { id }) as Msg)
    }

    fn schedule(&self) -> Cmd {
        let msg = self.current_tick();
        bubbletea_tick(self.interval, move |_| Box::new(msg.clone()) as Msg)
    }
}
