use crate::config::KeyConfig;
use crate::error::{Error, Result};
use crate::message::Message;
use eframe::egui::{self, Key, Modifiers};
use std::fmt;
use std::str::FromStr;

/// A key plus the modifiers that must be held. Extra modifiers are allowed,
/// so `Alt+J` still fires with Shift down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyChord {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            alt: false,
            shift: false,
            ctrl: false,
        }
    }

    pub const fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        key == self.key
            && (!self.alt || modifiers.alt)
            && (!self.shift || modifiers.shift)
            && (!self.ctrl || modifiers.command || modifiers.ctrl)
    }
}

impl FromStr for KeyChord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_name = parts
            .pop()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::chord(s, "missing key"))?;
        let key = parse_key(key_name).ok_or_else(|| Error::chord(s, "unknown key"))?;

        let mut chord = KeyChord::new(key);
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "alt" | "option" => chord.alt = true,
                "shift" => chord.shift = true,
                "ctrl" | "control" | "cmd" => chord.ctrl = true,
                other => return Err(Error::chord(s, format!("unknown modifier {other:?}"))),
            }
        }
        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        write!(f, "{}", self.key.name())
    }
}

fn parse_key(name: &str) -> Option<Key> {
    // Letters match case-insensitively.
    if name.len() == 1 {
        return Key::from_name(&name.to_ascii_uppercase());
    }
    match name.to_ascii_lowercase().as_str() {
        "esc" => Some(Key::Escape),
        "return" => Some(Key::Enter),
        _ => Key::from_name(name),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keymap {
    pub toggle: KeyChord,
    pub next: KeyChord,
    pub prev: KeyChord,
    pub activate: KeyChord,
    pub exit: KeyChord,
    pub refresh: KeyChord,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            toggle: KeyChord::new(Key::O).alt().shift(),
            next: KeyChord::new(Key::J).alt(),
            prev: KeyChord::new(Key::K).alt(),
            activate: KeyChord::new(Key::Enter).alt(),
            exit: KeyChord::new(Key::Escape),
            refresh: KeyChord::new(Key::R).alt(),
        }
    }
}

impl Keymap {
    pub fn from_config(keys: &KeyConfig) -> Result<Self> {
        Ok(Self {
            toggle: keys.toggle.parse()?,
            next: keys.next.parse()?,
            prev: keys.prev.parse()?,
            activate: keys.activate.parse()?,
            exit: keys.exit.parse()?,
            refresh: keys.refresh.parse()?,
        })
    }
}

pub fn handle_key(key: Key, modifiers: Modifiers, keymap: &Keymap, enabled: bool) -> Option<Message> {
    // Toggle works whether or not the navigator is on.
    if keymap.toggle.matches(key, modifiers) {
        return Some(Message::Toggle);
    }
    if !enabled {
        return None;
    }

    if keymap.next.matches(key, modifiers) {
        Some(Message::NEXT)
    } else if keymap.prev.matches(key, modifiers) {
        Some(Message::PREV)
    } else if keymap.activate.matches(key, modifiers) {
        Some(Message::ClickCurrent)
    } else if keymap.exit.matches(key, modifiers) {
        Some(Message::Disable)
    } else if keymap.refresh.matches(key, modifiers) {
        Some(Message::Refresh)
    } else {
        None
    }
}

/// Drains this frame's handled key presses out of the input queue so no
/// widget also reacts to them, and returns the resulting commands. The text
/// event the backend emits right after a consumed key goes with it, so an
/// Alt chord never types into a focused field.
pub fn poll_keyboard(ctx: &egui::Context, keymap: &Keymap, enabled: bool) -> Vec<Message> {
    ctx.input_mut(|input| {
        let mut enabled = enabled;
        let mut swallow_text = false;
        let mut messages = Vec::new();
        input.events.retain(|event| {
            if std::mem::take(&mut swallow_text) && matches!(event, egui::Event::Text(_)) {
                return false;
            }
            let egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } = event
            else {
                return true;
            };
            let Some(message) = handle_key(*key, *modifiers, keymap, enabled) else {
                return true;
            };
            match message {
                Message::Toggle => enabled = !enabled,
                Message::Disable => enabled = false,
                _ => {}
            }
            messages.push(message);
            swallow_text = true;
            false
        });
        messages
    })
}
