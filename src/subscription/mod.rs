pub mod keyboard;
pub mod observer;

pub use keyboard::{handle_key, poll_keyboard, KeyChord, Keymap};
pub use observer::{DomRenderer, EnabledFlag, Observer, Subscribers, TraceObserver, COMMAND_ATTR};
