//! Remote controller - the single owner of all synchronization state.
//!
//! UI handlers, the periodic poll and the drained link events all go
//! through `&mut RemoteController`, so no state is shared with the
//! transport's callback context except the [`LinkEventQueue`].
//!
//! # Usage
//!
//! ```ignore
//! static EVENTS: LinkEventQueue<8> = LinkEventQueue::new();
//!
//! let transport = EspNowTransport::new(EVENTS.sender());
//! let mut controller = RemoteController::new(transport, EVENTS.receiver(), &config);
//! controller.start(Instant::now())?;
//!
//! loop {
//!     controller.poll(Instant::now());
//!     Timer::after_millis(5).await;
//! }
//! ```
//!
//! [`LinkEventQueue`]: crate::link_events::LinkEventQueue

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::Rgb;
use crate::command::LedCommand;
use crate::config::SyncConfig;
use crate::dispatcher::{DispatchOutcome, Dispatcher, SendTrigger};
use crate::effect::EffectId;
use crate::heartbeat::HeartbeatScheduler;
use crate::link_events::{LinkEvent, LinkEventReceiver};
use crate::peer::PeerConfig;
use crate::request::{RequestHandler, RequestVerdict};
use crate::state::{CommandState, Control};
use crate::status::{LinkFault, LinkStatus, STATS_LINE_CAPACITY, SendStats, SendStatusTracker};
use crate::transport::{Transport, TransportError};

/// Usability of the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// `start` has not been called yet
    Down,
    Ready,
    /// The transport failed to initialize; nothing is sent or received
    InitFailed,
    /// The peer was not registered; sends are disabled
    PeerRejected,
}

pub struct RemoteController<'a, T: Transport, const EVENTS: usize> {
    // External dependencies and configuration
    transport: T,
    events: LinkEventReceiver<'a, EVENTS>,
    peer: PeerConfig,
    startup_delay: Duration,

    // Link state
    link: LinkState,
    transport_ready: bool,
    hold_until: Option<Instant>,
    dropped_events: u32,

    // Components
    state: CommandState,
    dispatcher: Dispatcher,
    requests: RequestHandler,
    heartbeat: HeartbeatScheduler,
    status: SendStatusTracker,
}

impl<'a, T: Transport, const EVENTS: usize> RemoteController<'a, T, EVENTS> {
    pub fn new(transport: T, events: LinkEventReceiver<'a, EVENTS>, config: &SyncConfig) -> Self {
        Self {
            transport,
            events,
            peer: config.peer,
            startup_delay: config.startup_delay,
            link: LinkState::Down,
            transport_ready: false,
            hold_until: None,
            dropped_events: 0,
            state: CommandState::new(config.initial_command),
            dispatcher: Dispatcher::new(config.policy),
            requests: RequestHandler::new(config.debounce),
            heartbeat: HeartbeatScheduler::new(config.heartbeat_interval),
            status: SendStatusTracker::new(),
        }
    }

    /// Bring the link up and arm the heartbeat.
    ///
    /// Failures are kept as a persistent status. Calling `start` again
    /// retries whatever step failed.
    pub fn start(&mut self, now: Instant) -> Result<(), TransportError> {
        if !self.transport_ready {
            if let Err(err) = self.transport.init() {
                crate::link_log!("link: transport init failed: {:?}", err);
                self.link = LinkState::InitFailed;
                self.status.set_fault(LinkFault::TransportInitFailed);
                return Err(err);
            }
            self.transport_ready = true;
        }

        if let Err(err) = self.transport.register_peer(&self.peer) {
            crate::link_log!(
                "link: failed to add peer {} on channel {}: {:?}",
                self.peer.address,
                self.peer.channel,
                err
            );
            self.link = LinkState::PeerRejected;
            self.status.set_fault(LinkFault::PeerRegistrationFailed);
            return Err(err);
        }

        crate::link_log!(
            "link: added peer {} on channel {}",
            self.peer.address,
            self.peer.channel
        );
        self.link = LinkState::Ready;
        self.status.clear_fault();
        self.status.note(LinkStatus::Ready);
        self.heartbeat.start(now);
        self.hold_until = Some(now + self.startup_delay);
        Ok(())
    }

    /// Run one scheduler step.
    ///
    /// Drains link events first, then sends a pending state change, then
    /// the heartbeat if it is due. Never blocks.
    pub fn poll(&mut self, now: Instant) {
        while let Some(event) = self.events.try_next() {
            self.handle_event(event, now);
        }
        self.check_dropped_events();

        if self.state.is_evaluation_due() && self.hold_elapsed(now) {
            match self.dispatch(SendTrigger::StateChange, now) {
                // Evaluated again once the limiter opens or the link is up
                DispatchOutcome::RateLimited | DispatchOutcome::LinkDown => {}
                DispatchOutcome::Sent | DispatchOutcome::Unchanged | DispatchOutcome::Failed(_) => {
                    self.state.clear_evaluation_due();
                }
            }
        }

        if self.heartbeat.poll(now) {
            self.dispatch(SendTrigger::Heartbeat, now);
        }
    }

    fn handle_event(&mut self, event: LinkEvent, now: Instant) {
        match event {
            LinkEvent::SendComplete { success } => {
                crate::link_log!("link: send complete, success={}", success);
                self.dispatcher.on_send_complete(success);
                self.status.on_send_complete(success);
            }
            // Receives are meaningless until the link is up
            LinkEvent::Received(_) if self.link != LinkState::Ready => {}
            LinkEvent::Received(datagram) => {
                let verdict = self.requests.handle(datagram.sender, &datagram.payload, now);
                if verdict == RequestVerdict::Accepted {
                    self.status.record_request();
                    self.dispatch(SendTrigger::Resync, now);
                }
            }
        }
    }

    fn dispatch(&mut self, trigger: SendTrigger, now: Instant) -> DispatchOutcome {
        if self.link != LinkState::Ready {
            return DispatchOutcome::LinkDown;
        }

        let command = self.state.command();
        let outcome = self.dispatcher.evaluate(
            &command,
            trigger,
            now,
            &mut self.transport,
            self.peer.address,
        );
        match outcome {
            DispatchOutcome::Sent => self.status.record_attempt(),
            DispatchOutcome::Failed(_) => {
                self.status.record_attempt();
                self.status.record_hand_off_failure();
            }
            DispatchOutcome::Unchanged
            | DispatchOutcome::RateLimited
            | DispatchOutcome::LinkDown => {}
        }
        outcome
    }

    fn hold_elapsed(&self, now: Instant) -> bool {
        self.hold_until.is_some_and(|until| now >= until)
    }

    fn check_dropped_events(&mut self) {
        let dropped = self.events.dropped();
        if dropped != self.dropped_events {
            crate::link_log!(
                "link: {} link events lost to a full queue",
                dropped - self.dropped_events
            );
            self.dropped_events = dropped;
            // Lost completions leave in-flight entries that can never be
            // matched; resync against the last confirmed command
            self.dispatcher.forget_in_flight();
            self.state.mark_evaluation_due();
        }
    }

    fn changed(&mut self, control: Control) {
        self.status.note(LinkStatus::Updated(control));
    }

    pub fn set_color(&mut self, color: Rgb) {
        let control = self.state.set_color(color);
        self.changed(control);
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        let control = self.state.set_brightness(brightness);
        self.changed(control);
    }

    pub fn set_white(&mut self, white: u8) {
        let control = self.state.set_white(white);
        self.changed(control);
    }

    pub fn set_warm_white(&mut self, warm_white: u8) {
        let control = self.state.set_warm_white(warm_white);
        self.changed(control);
    }

    pub fn set_effect(&mut self, effect: EffectId) {
        let control = self.state.set_effect(effect);
        self.changed(control);
    }

    pub fn set_speed(&mut self, speed: u8) {
        let control = self.state.set_speed(speed);
        self.changed(control);
    }

    pub fn set_power(&mut self, on: bool) {
        let control = self.state.set_power(on);
        self.changed(control);
    }

    /// Flip power and return the new value
    pub fn toggle_power(&mut self) -> bool {
        let on = self.state.toggle_power();
        self.changed(Control::Power);
        on
    }

    /// Command as it currently goes on the wire
    pub const fn command(&self) -> LedCommand {
        self.state.command()
    }

    pub const fn state(&self) -> &CommandState {
        &self.state
    }

    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn status(&self) -> LinkStatus {
        self.status.status()
    }

    pub const fn stats(&self) -> SendStats {
        self.status.stats()
    }

    pub fn stats_line(&self) -> String<STATS_LINE_CAPACITY> {
        self.status.stats_line()
    }

    pub const fn last_send_success(&self) -> bool {
        self.status.last_send_success()
    }

    pub const fn link_state(&self) -> LinkState {
        self.link
    }

    /// Link events lost because the queue was full
    pub const fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
