use serde::{Deserialize, Serialize};

/// Logical flight controls. Each maps to one [`InputState`] flag.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    Quit,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
        Control::YawLeft,
        Control::YawRight,
        Control::PitchUp,
        Control::PitchDown,
        Control::Quit,
    ];

    /// Snake-case name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Back => "back",
            Control::Left => "left",
            Control::Right => "right",
            Control::YawLeft => "yaw_left",
            Control::YawRight => "yaw_right",
            Control::PitchUp => "pitch_up",
            Control::PitchDown => "pitch_down",
            Control::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Control> {
        Control::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Level-triggered control flags for the current frame.
///
/// `forward`/`back` drive throttle, `left`/`right` roll, the yaw pair yaw and
/// the pitch pair pitch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub quit: bool,
}

impl InputState {
    pub fn is_active(&self, control: Control) -> bool {
        match control {
            Control::Forward => self.forward,
            Control::Back => self.back,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::YawLeft => self.yaw_left,
            Control::YawRight => self.yaw_right,
            Control::PitchUp => self.pitch_up,
            Control::PitchDown => self.pitch_down,
            Control::Quit => self.quit,
        }
    }

    pub fn set(&mut self, control: Control, active: bool) {
        let flag = match control {
            Control::Forward => &mut self.forward,
            Control::Back => &mut self.back,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::YawLeft => &mut self.yaw_left,
            Control::YawRight => &mut self.yaw_right,
            Control::PitchUp => &mut self.pitch_up,
            Control::PitchDown => &mut self.pitch_down,
            Control::Quit => &mut self.quit,
        };
        *flag = active;
    }

    /// Builder form of [`set`](Self::set), handy in tests.
    #[must_use]
    pub fn with(mut self, control: Control) -> Self {
        self.set(control, true);
        self
    }

    pub fn any_active(&self) -> bool {
        Control::ALL.into_iter().any(|c| self.is_active(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let s = InputState::default();
        assert!(!s.any_active());
    }

    #[test]
    fn test_set_and_query_every_control() {
        for c in Control::ALL {
            let s = InputState::default().with(c);
            for other in Control::ALL {
                assert_eq!(s.is_active(other), other == c, "{c:?} leaked into {other:?}");
            }
        }
    }

    #[test]
    fn test_names_round_trip() {
        for c in Control::ALL {
            assert_eq!(Control::from_name(c.name()), Some(c));
        }
        assert_eq!(Control::from_name("jump"), None);
    }
}
