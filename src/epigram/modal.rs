//! # Modal
//!
//! One overlay at a time, owned by the application and handed to whatever
//! needs to open or close it. [`ModalContext::open`] and
//! [`ModalContext::close`] are the only mutators.
//!
//! Dismissal:
//! - `Escape` while open closes
//! - a click on the backdrop closes
//! - a click inside the content never reaches the backdrop handler
//!
//! The Escape listener lives in a shared [`KeyListeners`] registry (the
//! window, in browser terms). It is registered when the modal opens and
//! removed when it closes or the context is dropped, so repeated opens never
//! stack listeners.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Key(Key),
    Click(ClickTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<ListenerId>,
}

/// Process-wide keyboard listener registry. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    inner: Rc<RefCell<Registry>>,
}

impl KeyListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self) -> ListenerId {
        let mut registry = self.inner.borrow_mut();
        registry.next_id += 1;
        let id = ListenerId(registry.next_id);
        registry.active.insert(id);
        id
    }

    pub fn remove(&self, id: ListenerId) {
        self.inner.borrow_mut().active.remove(&id);
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().active.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct ModalContext<C> {
    content: Option<C>,
    listeners: KeyListeners,
    escape_listener: Option<ListenerId>,
}

impl<C> ModalContext<C> {
    pub fn new(listeners: KeyListeners) -> Self {
        Self {
            content: None,
            listeners,
            escape_listener: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Show `content`, replacing whatever was open.
    pub fn open(&mut self, content: C) {
        self.content = Some(content);
        if self.escape_listener.is_none() {
            self.escape_listener = Some(self.listeners.add());
        }
        tracing::debug!("modal opened");
    }

    /// Hide the modal and return its content. Closing twice is a no-op.
    pub fn close(&mut self) -> Option<C> {
        if let Some(id) = self.escape_listener.take() {
            self.listeners.remove(id);
        }
        let content = self.content.take();
        if content.is_some() {
            tracing::debug!("modal closed");
        }
        content
    }

    /// Route an input event. Returns true when the event closed the modal.
    pub fn dispatch(&mut self, event: ModalEvent) -> bool {
        let closes = match event {
            ModalEvent::Key(Key::Escape) => self
                .escape_listener
                .is_some_and(|id| self.listeners.contains(id)),
            ModalEvent::Click(ClickTarget::Backdrop) => self.is_open(),
            ModalEvent::Click(ClickTarget::Content) | ModalEvent::Key(_) => false,
        };
        if closes {
            self.close();
        }
        closes
    }
}

impl<C> Drop for ModalContext<C> {
    fn drop(&mut self) {
        if let Some(id) = self.escape_listener.take() {
            self.listeners.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal() -> (ModalContext<&'static str>, KeyListeners) {
        let listeners = KeyListeners::new();
        (ModalContext::new(listeners.clone()), listeners)
    }

    #[test]
    fn escape_closes_open_modal() {
        let (mut modal, _) = modal();
        modal.open("hello");
        assert!(modal.dispatch(ModalEvent::Key(Key::Escape)));
        assert!(!modal.is_open());
    }

    #[test]
    fn click_inside_content_does_not_close() {
        let (mut modal, _) = modal();
        modal.open("hello");
        assert!(!modal.dispatch(ModalEvent::Click(ClickTarget::Content)));
        assert_eq!(modal.content(), Some(&"hello"));
    }

    #[test]
    fn backdrop_click_closes() {
        let (mut modal, _) = modal();
        modal.open("hello");
        assert!(modal.dispatch(ModalEvent::Click(ClickTarget::Backdrop)));
        assert!(!modal.is_open());
    }

    #[test]
    fn other_keys_are_ignored() {
        let (mut modal, _) = modal();
        modal.open("hello");
        assert!(!modal.dispatch(ModalEvent::Key(Key::Enter)));
        assert!(!modal.dispatch(ModalEvent::Key(Key::Char('q'))));
        assert!(modal.is_open());
    }

    #[test]
    fn escape_while_closed_does_nothing() {
        let (mut modal, listeners) = modal();
        assert!(!modal.dispatch(ModalEvent::Key(Key::Escape)));
        assert!(listeners.is_empty());
    }

    #[test]
    fn listener_exists_only_while_open() {
        let (mut modal, listeners) = modal();
        assert_eq!(listeners.len(), 0);
        modal.open("a");
        assert_eq!(listeners.len(), 1);
        modal.close();
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn repeated_opens_never_stack_listeners() {
        let (mut modal, listeners) = modal();
        for i in 0..5 {
            modal.open(if i % 2 == 0 { "a" } else { "b" });
            assert_eq!(listeners.len(), 1);
        }
        assert_eq!(modal.content(), Some(&"a"));
        modal.close();
        modal.close();
        assert!(listeners.is_empty());
    }

    #[test]
    fn drop_detaches_listener() {
        let listeners = KeyListeners::new();
        {
            let mut modal = ModalContext::new(listeners.clone());
            modal.open(1);
            assert_eq!(listeners.len(), 1);
        }
        assert!(listeners.is_empty());
    }
}
