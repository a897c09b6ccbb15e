use core::fmt;

/// Length of a peer hardware address
pub const PEER_ADDRESS_LEN: usize = 6;

/// Radio channel used when none is configured
pub const DEFAULT_CHANNEL: u8 = 1;

/// Hardware address of the remote peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress([u8; PEER_ADDRESS_LEN]);

impl PeerAddress {
    pub const fn new(octets: [u8; PEER_ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    pub const fn octets(&self) -> [u8; PEER_ADDRESS_LEN] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; PEER_ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl From<[u8; PEER_ADDRESS_LEN]> for PeerAddress {
    fn from(octets: [u8; PEER_ADDRESS_LEN]) -> Self {
        Self(octets)
    }
}

/// Registration data for the single remote peer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerConfig {
    pub address: PeerAddress,
    pub channel: u8,
}

impl PeerConfig {
    pub const fn new(address: PeerAddress) -> Self {
        Self {
            address,
            channel: DEFAULT_CHANNEL,
        }
    }

    #[must_use]
    pub const fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }
}
