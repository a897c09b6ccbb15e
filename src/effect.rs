//! Effect catalog shared with the receiver node
//!
//! The wire carries only the effect index, so the order of this catalog is
//! part of the protocol. New effects must be appended, never inserted.

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_FADE: &str = "fade";
const EFFECT_NAME_STROBE: &str = "strobe";
const EFFECT_NAME_PULSE: &str = "pulse";
const EFFECT_NAME_SPARKLE: &str = "sparkle";
const EFFECT_NAME_WAVE: &str = "wave";

const EFFECT_ID_SOLID: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_FADE: u8 = 2;
const EFFECT_ID_STROBE: u8 = 3;
const EFFECT_ID_PULSE: u8 = 4;
const EFFECT_ID_SPARKLE: u8 = 5;
const EFFECT_ID_WAVE: u8 = 6;

/// Known effect ids understood by the receiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    #[default]
    Solid = EFFECT_ID_SOLID,
    Rainbow = EFFECT_ID_RAINBOW,
    Fade = EFFECT_ID_FADE,
    Strobe = EFFECT_ID_STROBE,
    Pulse = EFFECT_ID_PULSE,
    Sparkle = EFFECT_ID_SPARKLE,
    Wave = EFFECT_ID_WAVE,
}

impl EffectId {
    /// Every effect in wire order
    pub const ALL: [Self; 7] = [
        Self::Solid,
        Self::Rainbow,
        Self::Fade,
        Self::Strobe,
        Self::Pulse,
        Self::Sparkle,
        Self::Wave,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_FADE => Self::Fade,
            EFFECT_ID_STROBE => Self::Strobe,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_SPARKLE => Self::Sparkle,
            EFFECT_ID_WAVE => Self::Wave,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Fade => EFFECT_NAME_FADE,
            Self::Strobe => EFFECT_NAME_STROBE,
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::Sparkle => EFFECT_NAME_SPARKLE,
            Self::Wave => EFFECT_NAME_WAVE,
        }
    }

    /// Human readable name, as shown in the effect dropdown
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Rainbow => "Rainbow",
            Self::Fade => "Fade",
            Self::Strobe => "Strobe",
            Self::Pulse => "Pulse",
            Self::Sparkle => "Sparkle",
            Self::Wave => "Wave",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_SOLID => Some(Self::Solid),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_FADE => Some(Self::Fade),
            EFFECT_NAME_STROBE => Some(Self::Strobe),
            EFFECT_NAME_PULSE => Some(Self::Pulse),
            EFFECT_NAME_SPARKLE => Some(Self::Sparkle),
            EFFECT_NAME_WAVE => Some(Self::Wave),
            _ => None,
        }
    }
}
