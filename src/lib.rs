#![no_std]

/// Diagnostic output, compiled out unless `esp32-log` is enabled
macro_rules! link_log {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(not(feature = "esp32-log"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
pub(crate) use link_log;

pub mod command;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod effect;
pub mod heartbeat;
pub mod link_events;
pub mod peer;
pub mod request;
pub mod state;
pub mod status;
pub mod transport;

pub use command::{COMMAND_SIZE, LedCommand};
pub use config::SyncConfig;
pub use controller::{LinkState, RemoteController};
pub use dispatcher::{DispatchOutcome, DispatchPolicy, Dispatcher, SendTrigger, TriggerPolicy};
pub use effect::EffectId;
pub use heartbeat::HeartbeatScheduler;
pub use link_events::{
    InboundDatagram, LinkEvent, LinkEventError, LinkEventQueue, LinkEventReceiver, LinkEventSender,
};
pub use peer::{PeerAddress, PeerConfig};
pub use request::{REQUEST_SIZE, RequestHandler, RequestVerdict, ResyncRequest};
pub use state::{CommandState, Control};
pub use status::{LinkFault, LinkStatus, SendStats, SendStatusTracker};
pub use transport::{MAX_DATAGRAM_SIZE, Transport, TransportError};

pub use embassy_time::{Duration, Instant};
pub use smart_leds::RGB8 as Rgb;
