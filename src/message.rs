// Commands understood by the navigator
// Keyboard chords and overlay buttons both map onto these.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Toggle,
    Enable,
    Disable,
    /// Relative cursor movement, +1 for next and -1 for previous.
    Move(isize),
    ClickCurrent,
    Refresh,
}

impl Message {
    pub const NEXT: Message = Message::Move(1);
    pub const PREV: Message = Message::Move(-1);

    /// Command carried by an overlay button.
    pub fn from_overlay_command(name: &str) -> Option<Self> {
        match name {
            "prev" => Some(Self::PREV),
            "next" => Some(Self::NEXT),
            "click" => Some(Self::ClickCurrent),
            "exit" => Some(Self::Disable),
            _ => None,
        }
    }
}
