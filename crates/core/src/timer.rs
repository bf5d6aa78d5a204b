//! Timer set - cancellable one-shot timers driven by elapsed time.
//!
//! The engine never sleeps. Hosts feed elapsed milliseconds into the
//! controller, which walks this set in due-time order. Every armed timer is
//! stamped with the set's generation; `cancel_all` bumps the generation, so a
//! handle from before the bump can never cancel (or be mistaken for) a timer
//! armed after it, and nothing armed before it can fire.

use arrayvec::ArrayVec;

/// What a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 1 Hz countdown before the round goes active
    Countdown,
    /// Next ball
    Call,
    /// 1 Hz elapsed-time display clock
    Elapsed,
}

impl TimerKind {
    pub const COUNT: usize = 3;

    fn slot(self) -> usize {
        match self {
            TimerKind::Countdown => 0,
            TimerKind::Call => 1,
            TimerKind::Elapsed => 2,
        }
    }
}

/// Handle to one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    kind: TimerKind,
    generation: u32,
    serial: u32,
}

impl TimerHandle {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    handle: TimerHandle,
    remaining_ms: u32,
}

/// At most one pending timer per [`TimerKind`]
#[derive(Debug, Clone, Default)]
pub struct Timers {
    slots: [Option<Armed>; TimerKind::COUNT],
    generation: u32,
    serial: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Arm (or re-arm) the timer of `kind` to fire after `delay_ms`.
    ///
    /// Re-arming replaces the previous timer of the same kind; its handle
    /// goes stale.
    pub fn arm(&mut self, kind: TimerKind, delay_ms: u32) -> TimerHandle {
        self.serial = self.serial.wrapping_add(1);
        let handle = TimerHandle {
            kind,
            generation: self.generation,
            serial: self.serial,
        };
        self.slots[kind.slot()] = Some(Armed {
            handle,
            remaining_ms: delay_ms,
        });
        handle
    }

    /// Cancel the exact timer `handle` armed. Stale handles do nothing.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        if !self.is_pending(handle) {
            return false;
        }
        self.slots[handle.kind.slot()] = None;
        true
    }

    /// Drop every pending timer and invalidate all outstanding handles
    pub fn cancel_all(&mut self) {
        self.slots = [None; TimerKind::COUNT];
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// True if `handle` still refers to a pending timer
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        matches!(self.slots[handle.kind.slot()], Some(a) if a.handle == handle)
    }

    pub fn remaining(&self, kind: TimerKind) -> Option<u32> {
        self.slots[kind.slot()].map(|a| a.remaining_ms)
    }

    /// Milliseconds until the earliest pending timer
    pub fn next_due_in(&self) -> Option<u32> {
        self.slots.iter().flatten().map(|a| a.remaining_ms).min()
    }

    /// Let `elapsed_ms` pass. Timers saturate at zero and wait in `pop_due`.
    pub fn advance(&mut self, elapsed_ms: u32) {
        for armed in self.slots.iter_mut().flatten() {
            armed.remaining_ms = armed.remaining_ms.saturating_sub(elapsed_ms);
        }
    }

    /// Disarm and return one due timer. Ties resolve countdown, call, elapsed.
    pub fn pop_due(&mut self) -> Option<TimerHandle> {
        let slot = self
            .slots
            .iter()
            .position(|s| matches!(s, Some(a) if a.remaining_ms == 0))?;
        self.slots[slot].take().map(|a| a.handle)
    }

    /// Kinds currently pending, in slot order
    pub fn pending(&self) -> ArrayVec<TimerKind, { TimerKind::COUNT }> {
        self.slots.iter().flatten().map(|a| a.handle.kind).collect()
    }
}
