//! Send outcome tracking and status text for the UI.

use core::fmt::Write;

use heapless::String;

use crate::state::Control;

/// Capacity of the stats line, fits two `u32` counters
pub const STATS_LINE_CAPACITY: usize = 40;

/// Link faults that persist until the link is brought up again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFault {
    TransportInitFailed,
    PeerRegistrationFailed,
}

/// Status shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Initializing,
    Ready,
    Connected,
    SendFailed,
    SendError,
    RequestReceived,
    Updated(Control),
    Fault(LinkFault),
}

impl LinkStatus {
    pub const fn is_error(self) -> bool {
        matches!(self, Self::SendFailed | Self::SendError | Self::Fault(_))
    }

    /// Write the status text, e.g. `Send Failed!` or `Color updated`
    pub fn write_message<W: Write>(self, out: &mut W) -> core::fmt::Result {
        match self {
            Self::Initializing => out.write_str("Initializing..."),
            Self::Ready => out.write_str("ESP-NOW Ready"),
            Self::Connected => out.write_str("Connected"),
            Self::SendFailed => out.write_str("Send Failed!"),
            Self::SendError => out.write_str("Send Error!"),
            Self::RequestReceived => out.write_str("Request received"),
            Self::Updated(control) => write!(out, "{} updated", control.as_str()),
            Self::Fault(LinkFault::TransportInitFailed) => out.write_str("ESP-NOW Init Failed!"),
            Self::Fault(LinkFault::PeerRegistrationFailed) => out.write_str("Peer Add Failed!"),
        }
    }
}

impl core::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.write_message(f)
    }
}

/// Diagnostic counters, only ever incremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendStats {
    /// Datagrams handed off to the transport
    pub send_attempts: u32,
    /// Sends the link layer reported as delivered
    pub commands_sent: u32,
    /// Hand-off refusals and failed completions
    pub send_failures: u32,
    /// Accepted resync requests
    pub requests_received: u32,
}

#[derive(Debug, Clone)]
pub struct SendStatusTracker {
    last_send_success: bool,
    stats: SendStats,
    status: LinkStatus,
    fault: Option<LinkFault>,
}

impl SendStatusTracker {
    pub const fn new() -> Self {
        Self {
            last_send_success: false,
            stats: SendStats {
                send_attempts: 0,
                commands_sent: 0,
                send_failures: 0,
                requests_received: 0,
            },
            status: LinkStatus::Initializing,
            fault: None,
        }
    }

    /// Asynchronous completion of a previously handed-off send
    pub fn on_send_complete(&mut self, success: bool) {
        self.last_send_success = success;
        if success {
            self.stats.commands_sent = self.stats.commands_sent.saturating_add(1);
            self.status = LinkStatus::Connected;
        } else {
            self.stats.send_failures = self.stats.send_failures.saturating_add(1);
            self.status = LinkStatus::SendFailed;
        }
    }

    pub fn record_attempt(&mut self) {
        self.stats.send_attempts = self.stats.send_attempts.saturating_add(1);
    }

    /// The transport refused a datagram synchronously
    pub fn record_hand_off_failure(&mut self) {
        self.stats.send_failures = self.stats.send_failures.saturating_add(1);
        self.status = LinkStatus::SendError;
    }

    pub fn record_request(&mut self) {
        self.stats.requests_received = self.stats.requests_received.saturating_add(1);
        self.status = LinkStatus::RequestReceived;
    }

    pub fn note(&mut self, status: LinkStatus) {
        self.status = status;
    }

    pub fn set_fault(&mut self, fault: LinkFault) {
        self.fault = Some(fault);
    }

    pub fn clear_fault(&mut self) {
        self.fault = None;
    }

    /// Current status; a persistent fault hides transient messages
    pub fn status(&self) -> LinkStatus {
        self.fault.map_or(self.status, LinkStatus::Fault)
    }

    pub const fn fault(&self) -> Option<LinkFault> {
        self.fault
    }

    pub const fn last_send_success(&self) -> bool {
        self.last_send_success
    }

    pub const fn stats(&self) -> SendStats {
        self.stats
    }

    /// `Sent: N | Requests: M`
    pub fn stats_line(&self) -> String<STATS_LINE_CAPACITY> {
        let mut line = String::new();
        let _ = write!(
            line,
            "Sent: {} | Requests: {}",
            self.stats.commands_sent, self.stats.requests_received
        );
        line
    }
}

impl Default for SendStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
