//! Wire-level LED command
//!
//! The command is a fixed 8 byte record without framing. The receiver tells
//! it apart from other datagrams by length alone.

use bytemuck::{Pod, Zeroable};

use crate::Rgb;
use crate::effect::EffectId;

/// Size of the encoded command datagram
pub const COMMAND_SIZE: usize = 8;

/// Brightness applied at startup
pub const DEFAULT_BRIGHTNESS: u8 = 16;

/// Effect speed applied at startup
pub const DEFAULT_SPEED: u8 = 50;

/// Lowest brightness and speed level a control may select
pub const MIN_LEVEL: u8 = 1;

/// Highest brightness and speed level a control may select
pub const MAX_LEVEL: u8 = 100;

/// Brightness sent on the wire while the fixture is switched off
pub const BRIGHTNESS_OFF: u8 = 0;

/// Desired state of the remote fixture.
///
/// Field order is the wire order. Equality is byte equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroable, Pod)]
#[repr(C)]
pub struct LedCommand {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub warm_white: u8,
    /// `0` is off, `1..=100` is a percentage
    pub brightness: u8,
    /// Index into [`EffectId`]
    pub effect: u8,
    /// Animation rate, `1..=100`
    pub speed: u8,
}

const _: () = assert!(size_of::<LedCommand>() == COMMAND_SIZE);

impl LedCommand {
    /// Startup state: solid red at the default brightness and speed.
    pub const fn new() -> Self {
        Self {
            red: 255,
            green: 0,
            blue: 0,
            white: 0,
            warm_white: 0,
            brightness: DEFAULT_BRIGHTNESS,
            effect: EffectId::Solid.as_raw(),
            speed: DEFAULT_SPEED,
        }
    }

    /// Borrow the encoded datagram
    pub fn as_bytes(&self) -> &[u8; COMMAND_SIZE] {
        bytemuck::cast_ref(self)
    }

    pub fn to_bytes(self) -> [u8; COMMAND_SIZE] {
        bytemuck::cast(self)
    }

    /// Decode a command datagram.
    ///
    /// Returns `None` unless `bytes` is exactly [`COMMAND_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }

    /// Byte-exact comparison used for change detection
    pub fn same_bytes(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }

    pub const fn color(&self) -> Rgb {
        Rgb {
            r: self.red,
            g: self.green,
            b: self.blue,
        }
    }

    pub const fn effect_id(&self) -> Option<EffectId> {
        EffectId::from_raw(self.effect)
    }

    pub const fn is_off(&self) -> bool {
        self.brightness == BRIGHTNESS_OFF
    }
}

impl Default for LedCommand {
    fn default() -> Self {
        Self::new()
    }
}
