use embassy_time::Duration;

use crate::command::LedCommand;
use crate::dispatcher::DispatchPolicy;
use crate::heartbeat::DEFAULT_HEARTBEAT_INTERVAL;
use crate::peer::PeerConfig;
use crate::request::DEFAULT_DEBOUNCE;

/// Time given to the receiver to boot before the first state is sent
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(1);

/// Configuration for the remote controller
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub peer: PeerConfig,
    pub policy: DispatchPolicy,
    /// Requests closer together than this are ignored
    pub debounce: Duration,
    pub heartbeat_interval: Duration,
    /// Hold on state-change sends after `start`
    pub startup_delay: Duration,
    pub initial_command: LedCommand,
}

impl SyncConfig {
    pub const fn new(peer: PeerConfig) -> Self {
        Self {
            peer,
            policy: DispatchPolicy::DEFAULT,
            debounce: DEFAULT_DEBOUNCE,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            startup_delay: DEFAULT_STARTUP_DELAY,
            initial_command: LedCommand::new(),
        }
    }
}
