#![allow(dead_code)]

use heapless::Vec;
use myrtio_light_remote::{LedCommand, PeerAddress, PeerConfig, Transport, TransportError};

pub const RECEIVER: PeerAddress = PeerAddress::new([0x6C, 0xC8, 0x40, 0x88, 0x58, 0xA0]);

/// Datagram handed to the fake transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentDatagram {
    pub peer: PeerAddress,
    pub bytes: Vec<u8, 32>,
}

impl SentDatagram {
    pub fn command(&self) -> LedCommand {
        LedCommand::from_bytes(&self.bytes).expect("8 byte command")
    }
}

/// Transport that records every hand-off and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<SentDatagram, 64>,
    pub registered: Option<PeerConfig>,
    pub init_calls: u32,
    pub fail_init: bool,
    pub fail_register: bool,
    pub fail_send: Option<TransportError>,
}

impl RecordingTransport {
    /// Transport with the receiver already registered
    pub fn connected() -> Self {
        Self {
            registered: Some(PeerConfig::new(RECEIVER)),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = LedCommand> + '_ {
        self.sent.iter().map(SentDatagram::command)
    }

    pub fn last_command(&self) -> Option<LedCommand> {
        self.sent.last().map(SentDatagram::command)
    }
}

impl Transport for RecordingTransport {
    fn init(&mut self) -> Result<(), TransportError> {
        self.init_calls += 1;
        if self.fail_init {
            return Err(TransportError::InitFailed);
        }
        Ok(())
    }

    fn register_peer(&mut self, peer: &PeerConfig) -> Result<(), TransportError> {
        if self.fail_register {
            return Err(TransportError::PeerRegistrationFailed);
        }
        self.registered = Some(*peer);
        Ok(())
    }

    fn send(&mut self, peer: PeerAddress, payload: &[u8]) -> Result<(), TransportError> {
        if let Some(err) = self.fail_send {
            return Err(err);
        }
        if self.registered.map(|p| p.address) != Some(peer) {
            return Err(TransportError::PeerNotRegistered);
        }
        let bytes = Vec::from_slice(payload).map_err(|()| TransportError::PayloadTooLarge)?;
        self.sent
            .push(SentDatagram { peer, bytes })
            .expect("test sent too many datagrams");
        Ok(())
    }
}
