use eframe::egui::{self, Key};
use std::collections::{BTreeMap, HashMap};

/// Action name used to dismiss dialogs.
pub const CLOSE_DIALOG: &str = "CloseDialog";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyCombo {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    fn matches(&self, input: &egui::InputState) -> bool {
        input.key_pressed(self.key)
            && input.modifiers.ctrl == self.ctrl
            && input.modifiers.shift == self.shift
            && input.modifiers.alt == self.alt
    }
}

/// Parse a key combination like "Ctrl+Shift+W" into a [`KeyCombo`].
pub fn parse_key_combo(s: &str) -> Option<KeyCombo> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut key: Option<Key> = None;

    for part in s.split('+') {
        let upper = part.trim().to_ascii_uppercase();
        match upper.as_str() {
            "CTRL" | "CONTROL" => ctrl = true,
            "SHIFT" => shift = true,
            "ALT" => alt = true,
            "" => {}
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(&upper)?);
            }
        }
    }

    key.map(|k| KeyCombo {
        key: k,
        ctrl,
        shift,
        alt,
    })
}

fn parse_key(upper: &str) -> Option<Key> {
    match upper {
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "ENTER" | "RETURN" => Some(Key::Enter),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "DELETE" => Some(Key::Delete),
        "BACKSPACE" => Some(Key::Backspace),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "LEFT" | "LEFTARROW" => Some(Key::ArrowLeft),
        "RIGHT" | "RIGHTARROW" => Some(Key::ArrowRight),
        "UP" | "UPARROW" => Some(Key::ArrowUp),
        "DOWN" | "DOWNARROW" => Some(Key::ArrowDown),
        _ if upper.len() > 1 && upper.starts_with('F') => match upper[1..].parse::<u8>().ok()? {
            1 => Some(Key::F1),
            2 => Some(Key::F2),
            3 => Some(Key::F3),
            4 => Some(Key::F4),
            5 => Some(Key::F5),
            6 => Some(Key::F6),
            7 => Some(Key::F7),
            8 => Some(Key::F8),
            9 => Some(Key::F9),
            10 => Some(Key::F10),
            11 => Some(Key::F11),
            12 => Some(Key::F12),
            _ => None,
        },
        _ if upper.len() == 1 => {
            let c = upper.chars().next()?;
            Some(match c {
                '0' => Key::Num0,
                '1' => Key::Num1,
                '2' => Key::Num2,
                '3' => Key::Num3,
                '4' => Key::Num4,
                '5' => Key::Num5,
                '6' => Key::Num6,
                '7' => Key::Num7,
                '8' => Key::Num8,
                '9' => Key::Num9,
                'A' => Key::A,
                'B' => Key::B,
                'C' => Key::C,
                'D' => Key::D,
                'E' => Key::E,
                'F' => Key::F,
                'G' => Key::G,
                'H' => Key::H,
                'I' => Key::I,
                'J' => Key::J,
                'K' => Key::K,
                'L' => Key::L,
                'M' => Key::M,
                'N' => Key::N,
                'O' => Key::O,
                'P' => Key::P,
                'Q' => Key::Q,
                'R' => Key::R,
                'S' => Key::S,
                'T' => Key::T,
                'U' => Key::U,
                'V' => Key::V,
                'W' => Key::W,
                'X' => Key::X,
                'Y' => Key::Y,
                'Z' => Key::Z,
                _ => return None,
            })
        }
        _ => None,
    }
}

/// Named key bindings looked up by action name.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<String, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(CLOSE_DIALOG.to_string(), vec![KeyCombo::plain(Key::Escape)]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Layer an action name to key strings map over the default bindings.
    /// Names present in `config` replace their defaults; entries that fail
    /// to parse are skipped.
    pub fn from_config(config: &BTreeMap<String, Vec<String>>) -> Self {
        let mut bindings = Self::default().bindings;
        for (name, keys) in config {
            let mut combos = Vec::new();
            for k in keys {
                match parse_key_combo(k) {
                    Some(c) => combos.push(c),
                    None => {
                        tracing::warn!("key binding '{}' for {} is invalid; ignoring", k, name);
                    }
                }
            }
            bindings.insert(name.clone(), combos);
        }
        Self { bindings }
    }

    pub fn get(&self, name: &str) -> &[KeyCombo] {
        self.bindings.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any combination bound to `name` was pressed this frame.
    pub fn is_pressed(&self, input: &egui::InputState, name: &str) -> bool {
        self.get(name).iter().any(|c| c.matches(input))
    }
}
