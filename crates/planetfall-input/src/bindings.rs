//! Key bindings: which physical keys drive which [`Control`].

use std::collections::BTreeMap;

use tracing::warn;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::{Control, InputState, KeyboardState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("unknown control: {0}")]
    UnknownControl(String),

    #[error("unknown key for {control}: {key}")]
    UnknownKey { control: String, key: String },
}

/// Control to key mapping. A control is active while any of its keys is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    map: BTreeMap<Control, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    /// W/S throttle, A/D roll, Q/E yaw, arrow up/down pitch, Escape quits.
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(Control::Forward, vec![KeyCode::KeyW]);
        map.insert(Control::Back, vec![KeyCode::KeyS]);
        map.insert(Control::Left, vec![KeyCode::KeyA]);
        map.insert(Control::Right, vec![KeyCode::KeyD]);
        map.insert(Control::YawLeft, vec![KeyCode::KeyQ]);
        map.insert(Control::YawRight, vec![KeyCode::KeyE]);
        map.insert(Control::PitchUp, vec![KeyCode::ArrowUp]);
        map.insert(Control::PitchDown, vec![KeyCode::ArrowDown]);
        map.insert(Control::Quit, vec![KeyCode::Escape]);
        Self { map }
    }
}

impl KeyBindings {
    /// No bindings at all.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, control: Control, keys: Vec<KeyCode>) {
        self.map.insert(control, keys);
    }

    pub fn keys(&self, control: Control) -> &[KeyCode] {
        self.map.get(&control).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Start from the defaults and override every control named in `names`.
    ///
    /// # Errors
    ///
    /// [`BindingError`] for a control or key name that does not exist.
    pub fn from_names(names: &BTreeMap<String, Vec<String>>) -> Result<Self, BindingError> {
        let mut bindings = Self::default();
        for (control_name, key_names) in names {
            let control = Control::from_name(control_name)
                .ok_or_else(|| BindingError::UnknownControl(control_name.clone()))?;
            let keys = key_names
                .iter()
                .map(|k| {
                    key_from_name(k).ok_or_else(|| BindingError::UnknownKey {
                        control: control_name.clone(),
                        key: k.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if keys.is_empty() {
                warn!("Control '{control_name}' has no keys bound");
            }
            bindings.bind(control, keys);
        }
        Ok(bindings)
    }

    /// Sample the held keys into this frame's control flags.
    pub fn resolve(&self, keyboard: &KeyboardState) -> InputState {
        let mut state = InputState::default();
        for (control, keys) in &self.map {
            let active = keys
                .iter()
                .any(|k| keyboard.is_held(PhysicalKey::Code(*k)));
            state.set(*control, active);
        }
        state
    }
}

/// Parse a key name as written in config files, e.g. `"KeyW"` or
/// `"ArrowUp"`. Names match the `KeyCode` variants.
pub fn key_from_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        _ => return None,
    })
}
