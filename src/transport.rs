//! Datagram transport port
//!
//! Implement [`Transport`] for the radio stack in use. Receive and
//! send-completion callbacks are not part of the trait: the implementation
//! owns a [`LinkEventSender`](crate::link_events::LinkEventSender) and pushes
//! them into the controller's event queue from whatever context the driver
//! calls back in.

use crate::peer::{PeerAddress, PeerConfig};

/// Largest datagram the link carries in either direction
pub const MAX_DATAGRAM_SIZE: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The link layer could not be brought up
    InitFailed,
    /// The peer could not be added to the link layer
    PeerRegistrationFailed,
    /// Sending to a peer that was never registered
    PeerNotRegistered,
    /// Payload larger than [`MAX_DATAGRAM_SIZE`]
    PayloadTooLarge,
    /// Driver queue is full, try again later
    Busy,
    /// Raw driver error code
    Driver(i32),
}

/// Connectionless, best-effort, unicast datagram link.
pub trait Transport {
    /// Bring the link layer up.
    fn init(&mut self) -> Result<(), TransportError>;

    /// Register the single peer that datagrams are exchanged with.
    fn register_peer(&mut self, peer: &PeerConfig) -> Result<(), TransportError>;

    /// Hand a datagram to the link layer.
    ///
    /// `Ok` only means the driver accepted the datagram. Delivery is
    /// reported later through a send-completion event.
    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn init(&mut self) -> Result<(), TransportError> {
        (**self).init()
    }

    fn register_peer(&mut self, peer: &PeerConfig) -> Result<(), TransportError> {
        (**self).register_peer(peer)
    }

    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(peer, payload)
    }
}
