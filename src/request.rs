//! Resynchronization requests from the receiver.

use bytemuck::{Pod, Zeroable};
use embassy_time::{Duration, Instant};

use crate::peer::PeerAddress;

/// Size of the encoded request datagram
pub const REQUEST_SIZE: usize = 2;

/// `request_type` tag asking for the current color state
pub const REQUEST_TYPE_COLOR: u8 = 1;

/// `from_receiver` tag marking a receiver-originated request
pub const ORIGIN_RECEIVER: u8 = 1;

/// Default window during which further requests are ignored
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct ResyncRequest {
    pub request_type: u8,
    pub from_receiver: u8,
}

const _: () = assert!(size_of::<ResyncRequest>() == REQUEST_SIZE);

impl ResyncRequest {
    /// The only request the controller answers
    pub const COLOR_FROM_RECEIVER: Self = Self {
        request_type: REQUEST_TYPE_COLOR,
        from_receiver: ORIGIN_RECEIVER,
    };

    /// Decode a request datagram of exactly [`REQUEST_SIZE`] bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }

    pub fn to_bytes(self) -> [u8; REQUEST_SIZE] {
        bytemuck::cast(self)
    }

    pub const fn is_color_request_from_receiver(&self) -> bool {
        self.request_type == REQUEST_TYPE_COLOR && self.from_receiver == ORIGIN_RECEIVER
    }
}

/// Result of handling one inbound datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestVerdict {
    /// Valid request, a resync send is due
    Accepted,
    /// Wrong length or tags; dropped without side effects
    Invalid,
    /// Valid request inside the debounce window
    Debounced,
}

/// Validates and debounces inbound resync requests.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    debounce: Duration,
    last_accepted: Option<Instant>,
}

impl RequestHandler {
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_accepted: None,
        }
    }

    /// Classify a datagram from `sender`.
    ///
    /// The debounce window is measured from the last accepted request,
    /// whoever sent it. Invalid and debounced datagrams leave the handler
    /// untouched.
    pub fn handle(&mut self, sender: PeerAddress, payload: &[u8], now: Instant) -> RequestVerdict {
        let Some(request) = ResyncRequest::from_bytes(payload) else {
            crate::link_log!(
                "request: unexpected {} byte datagram from {}, expected {}",
                payload.len(),
                sender,
                REQUEST_SIZE
            );
            return RequestVerdict::Invalid;
        };
        if !request.is_color_request_from_receiver() {
            crate::link_log!(
                "request: ignoring type={} from_receiver={} from {}",
                request.request_type,
                request.from_receiver,
                sender
            );
            return RequestVerdict::Invalid;
        }

        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.debounce
        {
            return RequestVerdict::Debounced;
        }

        self.last_accepted = Some(now);
        crate::link_log!("request: color request from {}, responding", sender);
        RequestVerdict::Accepted
    }

    pub const fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }
}

impl Default for RequestHandler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
