//! Authoritative command state mutated by the UI
//!
//! Setters never talk to the transport. They only flag that a state change
//! evaluation is due, which the controller picks up on its next poll.

use crate::Rgb;
use crate::command::{BRIGHTNESS_OFF, LedCommand, MAX_LEVEL, MIN_LEVEL};
use crate::effect::EffectId;

/// Logical control that produced a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Color,
    Brightness,
    White,
    WarmWhite,
    Effect,
    Speed,
    Power,
}

impl Control {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Brightness => "Brightness",
            Self::White => "White",
            Self::WarmWhite => "Warm",
            Self::Effect => "Effect",
            Self::Speed => "Speed",
            Self::Power => "Power",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandState {
    command: LedCommand,
    /// Level restored when the fixture is switched back on
    level: u8,
    power: bool,
    evaluation_due: bool,
}

impl CommandState {
    /// Create the state from an initial command.
    ///
    /// A command that carries brightness `0` starts switched off. The first
    /// evaluation is due immediately so the initial state reaches the peer.
    pub const fn new(initial: LedCommand) -> Self {
        let power = initial.brightness != BRIGHTNESS_OFF;
        let level = if power {
            clamp_level(initial.brightness)
        } else {
            crate::command::DEFAULT_BRIGHTNESS
        };
        let mut command = initial;
        if power {
            command.brightness = level;
        }
        Self {
            command,
            level,
            power,
            evaluation_due: true,
        }
    }

    /// Command as it goes on the wire
    pub const fn command(&self) -> LedCommand {
        self.command
    }

    pub const fn is_on(&self) -> bool {
        self.power
    }

    /// Brightness level selected by the user, kept while switched off
    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn set_color(&mut self, color: Rgb) -> Control {
        self.command.red = color.r;
        self.command.green = color.g;
        self.command.blue = color.b;
        self.changed(Control::Color)
    }

    /// Select the brightness level.
    ///
    /// While the fixture is off only the remembered level changes; the wire
    /// brightness stays at `0` until power is switched back on.
    pub fn set_brightness(&mut self, brightness: u8) -> Control {
        self.level = clamp_level(brightness);
        if self.power {
            self.command.brightness = self.level;
        }
        self.changed(Control::Brightness)
    }

    pub fn set_white(&mut self, white: u8) -> Control {
        self.command.white = white;
        self.changed(Control::White)
    }

    pub fn set_warm_white(&mut self, warm_white: u8) -> Control {
        self.command.warm_white = warm_white;
        self.changed(Control::WarmWhite)
    }

    pub fn set_effect(&mut self, effect: EffectId) -> Control {
        self.command.effect = effect.as_raw();
        self.changed(Control::Effect)
    }

    pub fn set_speed(&mut self, speed: u8) -> Control {
        self.command.speed = clamp_level(speed);
        self.changed(Control::Speed)
    }

    pub fn set_power(&mut self, on: bool) -> Control {
        self.power = on;
        self.command.brightness = if on { self.level } else { BRIGHTNESS_OFF };
        self.changed(Control::Power)
    }

    /// Flip the power flag and return the new value
    pub fn toggle_power(&mut self) -> bool {
        self.set_power(!self.power);
        self.power
    }

    pub const fn is_evaluation_due(&self) -> bool {
        self.evaluation_due
    }

    /// Request an evaluation without changing the state
    pub fn mark_evaluation_due(&mut self) {
        self.evaluation_due = true;
    }

    pub fn clear_evaluation_due(&mut self) {
        self.evaluation_due = false;
    }

    fn changed(&mut self, control: Control) -> Control {
        self.evaluation_due = true;
        control
    }
}

impl Default for CommandState {
    fn default() -> Self {
        Self::new(LedCommand::new())
    }
}

const fn clamp_level(value: u8) -> u8 {
    if value < MIN_LEVEL {
        MIN_LEVEL
    } else if value > MAX_LEVEL {
        MAX_LEVEL
    } else {
        value
    }
}
