//! Send decision: change detection plus a minimum inter-send interval.
//!
//! The rate limiter drops, it never queues. A burst of UI changes therefore
//! collapses to whatever state is current when the limiter opens again.
//!
//! The reference for change detection is the newest command still in
//! flight, or the last command whose delivery was confirmed. A failed send
//! leaves the reference at the last confirmed command, so the next trigger
//! resends.

use embassy_time::{Duration, Instant};
use heapless::Deque;

use crate::command::LedCommand;
use crate::peer::PeerAddress;
use crate::transport::{Transport, TransportError};

/// Default minimum interval between two sends
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(50);

/// Sends handed off but not yet resolved by the link layer
const MAX_IN_FLIGHT: usize = 4;

/// What asked for a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendTrigger {
    /// UI mutated the command state
    StateChange,
    /// Periodic keep-alive
    Heartbeat,
    /// The peer asked for the current state
    Resync,
}

/// Checks a trigger is allowed to skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerPolicy {
    pub bypass_change_detection: bool,
    pub bypass_rate_limit: bool,
}

impl TriggerPolicy {
    pub const STRICT: Self = Self {
        bypass_change_detection: false,
        bypass_rate_limit: false,
    };

    pub const FORCED: Self = Self {
        bypass_change_detection: true,
        bypass_rate_limit: false,
    };

    pub const IMMEDIATE: Self = Self {
        bypass_change_detection: true,
        bypass_rate_limit: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Minimum interval between two successful hand-offs
    pub rate_limit: Duration,
    pub state_change: TriggerPolicy,
    pub heartbeat: TriggerPolicy,
    pub resync: TriggerPolicy,
}

impl DispatchPolicy {
    /// Heartbeats skip change detection, resyncs skip both checks.
    pub const DEFAULT: Self = Self {
        rate_limit: DEFAULT_RATE_LIMIT,
        state_change: TriggerPolicy::STRICT,
        heartbeat: TriggerPolicy::FORCED,
        resync: TriggerPolicy::IMMEDIATE,
    };

    pub const fn for_trigger(&self, trigger: SendTrigger) -> TriggerPolicy {
        match trigger {
            SendTrigger::StateChange => self.state_change,
            SendTrigger::Heartbeat => self.heartbeat,
            SendTrigger::Resync => self.resync,
        }
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handed off to the transport
    Sent,
    /// Nothing changed since the last send
    Unchanged,
    /// Too soon after the previous send; dropped
    RateLimited,
    /// The link is not usable, nothing was attempted
    LinkDown,
    /// The transport refused the datagram
    Failed(TransportError),
}

#[derive(Debug, Clone, Default)]
struct DispatchState {
    last_confirmed: Option<LedCommand>,
    in_flight: Deque<LedCommand, MAX_IN_FLIGHT>,
    last_send_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    policy: DispatchPolicy,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            policy,
            state: DispatchState::default(),
        }
    }

    /// Decide whether `command` goes out now and send it if so.
    pub fn evaluate<T: Transport + ?Sized>(
        &mut self,
        command: &LedCommand,
        trigger: SendTrigger,
        now: Instant,
        transport: &mut T,
        peer: PeerAddress,
    ) -> DispatchOutcome {
        let policy = self.policy.for_trigger(trigger);

        if !policy.bypass_change_detection
            && self.reference().is_some_and(|sent| sent.same_bytes(command))
        {
            return DispatchOutcome::Unchanged;
        }

        if !policy.bypass_rate_limit && self.is_rate_limited(now) {
            return DispatchOutcome::RateLimited;
        }

        crate::link_log!(
            "dispatch: {:?} rgb=({}, {}, {}) white={} warm={} brightness={} effect={} speed={}",
            trigger,
            command.red,
            command.green,
            command.blue,
            command.white,
            command.warm_white,
            command.brightness,
            command.effect,
            command.speed
        );

        if let Err(err) = transport.send(peer, command.as_bytes()) {
            crate::link_log!("dispatch: hand-off failed: {:?}", err);
            return DispatchOutcome::Failed(err);
        }

        self.state.last_send_at = Some(now);
        if self.state.in_flight.is_full() {
            // Completions were lost; the oldest entry can no longer be matched
            self.state.in_flight.pop_front();
        }
        let _ = self.state.in_flight.push_back(*command);
        DispatchOutcome::Sent
    }

    /// Resolve the oldest in-flight send.
    ///
    /// Completions arrive in hand-off order. A completion with nothing in
    /// flight is ignored.
    pub fn on_send_complete(&mut self, success: bool) {
        let Some(command) = self.state.in_flight.pop_front() else {
            return;
        };
        if success {
            self.state.last_confirmed = Some(command);
        }
    }

    /// Drop all in-flight bookkeeping.
    ///
    /// Used when completions may have been lost; change detection then
    /// falls back to the last confirmed command.
    pub fn forget_in_flight(&mut self) {
        self.state.in_flight.clear();
    }

    fn is_rate_limited(&self, now: Instant) -> bool {
        self.state
            .last_send_at
            .is_some_and(|last| now.saturating_duration_since(last) < self.policy.rate_limit)
    }

    fn reference(&self) -> Option<&LedCommand> {
        self.state
            .in_flight
            .back()
            .or(self.state.last_confirmed.as_ref())
    }

    /// Last command the peer confirmed receiving
    pub const fn last_confirmed(&self) -> Option<LedCommand> {
        self.state.last_confirmed
    }

    pub fn in_flight(&self) -> usize {
        self.state.in_flight.len()
    }

    pub const fn last_send_at(&self) -> Option<Instant> {
        self.state.last_send_at
    }

    pub const fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatchPolicy::DEFAULT)
    }
}
