//! Link event queue between transport callbacks and the controller.
//!
//! Receive and send-completion callbacks may fire from an interrupt or a
//! separate driver task. They never touch controller state directly; they
//! push a [`LinkEvent`] here and the controller drains the queue on its own
//! poll. Synchronization is a critical section around a `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, Vec};

use crate::peer::PeerAddress;
use crate::transport::MAX_DATAGRAM_SIZE;

/// Error returned to the callback context when an event is not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEventError {
    /// The controller has not drained the queue fast enough
    QueueFull,
    /// Datagram longer than [`MAX_DATAGRAM_SIZE`]; no valid message is
    Oversized,
}

/// Datagram received from the peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDatagram {
    pub sender: PeerAddress,
    pub payload: Vec<u8, MAX_DATAGRAM_SIZE>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A previously handed-off send resolved
    SendComplete { success: bool },
    /// A datagram arrived
    Received(InboundDatagram),
}

struct QueueState<const SIZE: usize> {
    events: Deque<LinkEvent, SIZE>,
    dropped: u32,
}

/// Bounded, interrupt-safe queue of link events.
pub struct LinkEventQueue<const SIZE: usize> {
    inner: Mutex<RefCell<QueueState<SIZE>>>,
}

impl<const SIZE: usize> LinkEventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(QueueState {
                events: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Handle for the transport's callbacks
    pub const fn sender(&self) -> LinkEventSender<'_, SIZE> {
        LinkEventSender { queue: self }
    }

    /// Handle for the controller
    pub const fn receiver(&self) -> LinkEventReceiver<'_, SIZE> {
        LinkEventReceiver { queue: self }
    }

    fn push(&self, event: LinkEvent) -> Result<(), LinkEventError> {
        critical_section::with(|cs| {
            let mut state = self.inner.borrow(cs).borrow_mut();
            if state.events.push_back(event).is_err() {
                state.dropped = state.dropped.saturating_add(1);
                return Err(LinkEventError::QueueFull);
            }
            Ok(())
        })
    }

    fn pop(&self) -> Option<LinkEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().events.pop_front())
    }

    /// Number of events lost because the queue was full
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().dropped)
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().events.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for LinkEventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Callback-side handle of a [`LinkEventQueue`].
#[derive(Clone, Copy)]
pub struct LinkEventSender<'a, const SIZE: usize> {
    queue: &'a LinkEventQueue<SIZE>,
}

impl<const SIZE: usize> LinkEventSender<'_, SIZE> {
    /// Report the outcome of a send handed off earlier
    pub fn notify_send_complete(&self, success: bool) -> Result<(), LinkEventError> {
        self.queue.push(LinkEvent::SendComplete { success })
    }

    /// Report a datagram received from `sender`
    pub fn notify_received(&self, sender: PeerAddress, bytes: &[u8]) -> Result<(), LinkEventError> {
        let payload = Vec::from_slice(bytes).map_err(|()| LinkEventError::Oversized)?;
        self.queue
            .push(LinkEvent::Received(InboundDatagram { sender, payload }))
    }
}

/// Controller-side handle of a [`LinkEventQueue`].
#[derive(Clone, Copy)]
pub struct LinkEventReceiver<'a, const SIZE: usize> {
    queue: &'a LinkEventQueue<SIZE>,
}

impl<const SIZE: usize> LinkEventReceiver<'_, SIZE> {
    /// Take the oldest pending event, if any
    pub fn try_next(&self) -> Option<LinkEvent> {
        self.queue.pop()
    }

    pub fn dropped(&self) -> u32 {
        self.queue.dropped()
    }
}
