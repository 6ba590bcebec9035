// Navigator state machine - cursor over the discovered elements
// Pure transitions: the page is only asked to discover and to activate,
// rendering is left to whoever receives the resulting NavigatorView.

use super::discovery::collect_interactive;
use crate::message::Message;
use crate::model::{Activation, Document, ElementRef};
use tracing::debug;

/// What the navigator needs from the hosted page.
pub trait Page {
    fn discover(&self) -> Vec<ElementRef>;
    fn activate(&mut self, element: ElementRef) -> Option<Activation>;
}

impl Page for Document {
    fn discover(&self) -> Vec<ElementRef> {
        collect_interactive(self)
    }

    fn activate(&mut self, element: ElementRef) -> Option<Activation> {
        Document::activate(self, element)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Disabled,
    Enabled {
        elements: Vec<ElementRef>,
        // Always < elements.len() unless elements is empty, then 0.
        idx: usize,
    },
}

/// Snapshot of what should be on screen after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorView {
    pub enabled: bool,
    pub highlighted: Option<ElementRef>,
    pub cursor: Option<usize>,
    pub total: usize,
    /// Bring `highlighted` into view.
    pub scroll: bool,
}

impl NavigatorView {
    pub fn label(&self) -> String {
        let position = self.cursor.map_or(0, |idx| idx + 1);
        format!("{} / {}", position, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed(NavigatorView),
    Activated(ElementRef, Activation),
    Ignored,
}

#[derive(Debug, Default)]
pub struct Navigator {
    state: NavState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.state, NavState::Enabled { .. })
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn elements(&self) -> &[ElementRef] {
        match &self.state {
            NavState::Enabled { elements, .. } => elements,
            NavState::Disabled => &[],
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match &self.state {
            NavState::Enabled { elements, idx } if !elements.is_empty() => Some(*idx),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<ElementRef> {
        self.cursor().map(|idx| self.elements()[idx])
    }

    pub fn view(&self) -> NavigatorView {
        let highlighted = self.current();
        NavigatorView {
            enabled: self.is_enabled(),
            highlighted,
            cursor: self.cursor(),
            total: self.elements().len(),
            scroll: highlighted.is_some(),
        }
    }

    pub fn update(&mut self, message: Message, page: &mut impl Page) -> Outcome {
        match message {
            Message::Toggle => self.toggle(&*page),
            Message::Enable => self.enable(&*page),
            Message::Disable => self.disable(),
            Message::Move(delta) => self.move_by(delta, &*page),
            Message::ClickCurrent => self.click_current(page),
            Message::Refresh => self.refresh(&*page),
        }
    }

    fn toggle(&mut self, page: &impl Page) -> Outcome {
        if self.is_enabled() {
            self.disable()
        } else {
            self.enable(page)
        }
    }

    fn enable(&mut self, page: &impl Page) -> Outcome {
        if self.is_enabled() {
            return Outcome::Ignored;
        }
        let elements = page.discover();
        debug!(count = elements.len(), "navigator enabled");
        self.state = NavState::Enabled { elements, idx: 0 };
        Outcome::Changed(self.view())
    }

    fn disable(&mut self) -> Outcome {
        if !self.is_enabled() {
            return Outcome::Ignored;
        }
        debug!("navigator disabled");
        self.state = NavState::Disabled;
        Outcome::Changed(self.view())
    }

    fn refresh(&mut self, page: &impl Page) -> Outcome {
        let NavState::Enabled { elements, idx } = &mut self.state else {
            return Outcome::Ignored;
        };
        *elements = page.discover();
        *idx = 0;
        debug!(count = elements.len(), "elements refreshed");
        Outcome::Changed(self.view())
    }

    fn move_by(&mut self, delta: isize, page: &impl Page) -> Outcome {
        let NavState::Enabled { elements, idx } = &mut self.state else {
            return Outcome::Ignored;
        };
        if elements.is_empty() {
            *elements = page.discover();
            *idx = 0;
            debug!(count = elements.len(), "empty list rediscovered before move");
        }
        if !elements.is_empty() {
            let len = elements.len() as isize;
            *idx = (*idx as isize + delta).rem_euclid(len) as usize;
        }
        Outcome::Changed(self.view())
    }

    fn click_current(&mut self, page: &mut impl Page) -> Outcome {
        let Some(element) = self.current() else {
            return Outcome::Ignored;
        };
        match page.activate(element) {
            Some(activation) => {
                debug!(?element, ?activation, "activated current element");
                Outcome::Activated(element, activation)
            }
            None => Outcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;
    use std::cell::Cell;

    /// Page stand-in that counts discovery passes and records activations.
    struct FakePage {
        elements: Vec<ElementRef>,
        discoveries: Cell<usize>,
        activated: Vec<ElementRef>,
    }

    impl FakePage {
        fn with(count: usize) -> Self {
            let mut doc = Document::new("fake");
            let elements = (0..count)
                .map(|_| ElementRef::from(doc.create_element("button")))
                .collect();
            Self {
                elements,
                discoveries: Cell::new(0),
                activated: Vec::new(),
            }
        }
    }

    impl Page for FakePage {
        fn discover(&self) -> Vec<ElementRef> {
            self.discoveries.set(self.discoveries.get() + 1);
            self.elements.clone()
        }

        fn activate(&mut self, element: ElementRef) -> Option<Activation> {
            self.activated.push(element);
            Some(Activation::Press)
        }
    }

    fn scenario_document() -> (Document, [NodeId; 4]) {
        let mut doc = Document::new("scenario");
        let body = doc.body();
        let ids = ["a", "button", "div", "input"].map(|tag| {
            let id = doc.create_element(tag);
            doc.append_child(body, id);
            id
        });
        (doc, ids)
    }

    #[test]
    fn test_starts_disabled_and_ignores_commands() {
        let mut page = FakePage::with(3);
        let mut nav = Navigator::new();

        let messages = [
            Message::NEXT,
            Message::PREV,
            Message::ClickCurrent,
            Message::Refresh,
            Message::Disable,
        ];
        for message in messages {
            assert_eq!(nav.update(message, &mut page), Outcome::Ignored);
        }
        assert!(!nav.is_enabled());
        assert_eq!(page.discoveries.get(), 0);
        assert!(page.activated.is_empty());
    }

    #[test]
    fn test_scenario_cycles_through_interactive_elements() {
        let (mut doc, [a, b, _, d]) = scenario_document();
        let mut nav = Navigator::new();

        let Outcome::Changed(view) = nav.update(Message::Enable, &mut doc) else {
            panic!("enable should change state");
        };
        assert_eq!(nav.elements(), &[a, b, d].map(ElementRef::from));
        assert_eq!(view.label(), "1 / 3");
        assert_eq!(view.highlighted, Some(ElementRef::from(a)));

        let Outcome::Changed(view) = nav.update(Message::NEXT, &mut doc) else {
            panic!("move should change state");
        };
        assert_eq!(nav.cursor(), Some(1));
        assert_eq!(view.highlighted, Some(ElementRef::from(b)));
        assert_eq!(view.label(), "2 / 3");

        nav.update(Message::NEXT, &mut doc);
        assert_eq!(nav.cursor(), Some(2));
        let Outcome::Changed(view) = nav.update(Message::NEXT, &mut doc) else {
            panic!("move should change state");
        };
        assert_eq!(nav.cursor(), Some(0));
        assert_eq!(view.label(), "1 / 3");
        assert_eq!(view.highlighted, Some(ElementRef::from(a)));
    }

    #[test]
    fn test_move_is_circular_both_ways() {
        for len in 1..6 {
            let mut page = FakePage::with(len);
            let mut nav = Navigator::new();
            nav.update(Message::Enable, &mut page);
            nav.update(Message::NEXT, &mut page);
            let start = nav.cursor();

            for _ in 0..len {
                nav.update(Message::NEXT, &mut page);
            }
            assert_eq!(nav.cursor(), start);

            for _ in 0..len {
                nav.update(Message::PREV, &mut page);
            }
            assert_eq!(nav.cursor(), start);
        }
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut page = FakePage::with(4);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);
        nav.update(Message::PREV, &mut page);
        assert_eq!(nav.cursor(), Some(3));

        nav.update(Message::Move(-9), &mut page);
        assert_eq!(nav.cursor(), Some(2));
    }

    #[test]
    fn test_move_on_empty_discovers_exactly_once() {
        let mut page = FakePage::with(0);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);
        assert_eq!(page.discoveries.get(), 1);

        let Outcome::Changed(view) = nav.update(Message::NEXT, &mut page) else {
            panic!("move while enabled reports a view");
        };
        assert_eq!(page.discoveries.get(), 2);
        assert_eq!(nav.state(), &NavState::Enabled { elements: Vec::new(), idx: 0 });
        assert_eq!(view.highlighted, None);
        assert!(!view.scroll);
        assert_eq!(view.label(), "0 / 0");
    }

    #[test]
    fn test_move_on_empty_picks_up_new_elements() {
        let mut page = FakePage::with(0);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);

        page.elements = FakePage::with(3).elements;
        nav.update(Message::NEXT, &mut page);
        assert_eq!(nav.elements().len(), 3);
        assert_eq!(nav.cursor(), Some(1));

        // A populated list is never rediscovered by moving.
        nav.update(Message::NEXT, &mut page);
        assert_eq!(page.discoveries.get(), 2);
    }

    #[test]
    fn test_empty_enable_and_click_is_noop() {
        let mut page = FakePage::with(0);
        let mut nav = Navigator::new();
        let Outcome::Changed(view) = nav.update(Message::Enable, &mut page) else {
            panic!("enable should change state");
        };
        assert_eq!(view.label(), "0 / 0");
        assert_eq!(view.highlighted, None);
        assert_eq!(nav.update(Message::ClickCurrent, &mut page), Outcome::Ignored);
        assert!(page.activated.is_empty());
    }

    #[test]
    fn test_click_current_activates_cursor_element() {
        let mut page = FakePage::with(3);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);
        nav.update(Message::NEXT, &mut page);

        let expected = page.elements[1];
        assert_eq!(
            nav.update(Message::ClickCurrent, &mut page),
            Outcome::Activated(expected, Activation::Press)
        );
        assert_eq!(page.activated, vec![expected]);
    }

    #[test]
    fn test_click_on_removed_element_is_silent() {
        let (mut doc, [a, ..]) = scenario_document();
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut doc);
        doc.remove(a);

        // The stale handle stays in the list until the next refresh.
        assert_eq!(nav.current(), Some(ElementRef::from(a)));
        assert_eq!(nav.update(Message::ClickCurrent, &mut doc), Outcome::Ignored);

        nav.update(Message::Refresh, &mut doc);
        assert_eq!(nav.elements().len(), 2);
    }

    #[test]
    fn test_refresh_resets_cursor() {
        let mut page = FakePage::with(3);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);
        nav.update(Message::Move(2), &mut page);
        assert_eq!(nav.cursor(), Some(2));

        let Outcome::Changed(view) = nav.update(Message::Refresh, &mut page) else {
            panic!("refresh should change state");
        };
        assert_eq!(nav.cursor(), Some(0));
        assert!(view.scroll);
        assert_eq!(page.discoveries.get(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut page = FakePage::with(2);
        let mut nav = Navigator::new();

        nav.update(Message::Toggle, &mut page);
        assert!(nav.is_enabled());
        nav.update(Message::Toggle, &mut page);
        assert!(!nav.is_enabled());
        assert!(nav.elements().is_empty());

        nav.update(Message::Enable, &mut page);
        nav.update(Message::Toggle, &mut page);
        nav.update(Message::Toggle, &mut page);
        assert!(nav.is_enabled());
    }

    #[test]
    fn test_disable_view_clears_highlight() {
        let mut page = FakePage::with(2);
        let mut nav = Navigator::new();
        nav.update(Message::Enable, &mut page);
        assert_eq!(nav.update(Message::Enable, &mut page), Outcome::Ignored);

        let Outcome::Changed(view) = nav.update(Message::Disable, &mut page) else {
            panic!("disable should change state");
        };
        assert!(!view.enabled);
        assert_eq!(view.highlighted, None);
        assert_eq!(view.label(), "0 / 0");
    }
}
