//! Scoped pointer-press listeners.
//!
//! Components that react to presses anywhere on the page (click-away
//! dismissal) register a listener with the [`PressHub`] and keep the
//! returned [`Subscription`]. The listener is removed when the subscription
//! is dropped, so a component's listener lives exactly as long as it is
//! mounted.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;

/// Surfaces a primary pointer press can land on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressTarget {
    SearchInput,
    SearchButton,
    SearchResults,
    WatchlistRow(String),
    Elsewhere,
}

type Listener<M> = Box<dyn FnMut(&PressTarget) -> Option<M>>;

struct Listeners<M> {
    next_id: u64,
    entries: Vec<(u64, Listener<M>)>,
}

/// Fan-out point for pointer presses. Listeners map a press to an optional
/// message which the owner applies after dispatch.
pub struct PressHub<M> {
    inner: Rc<RefCell<Listeners<M>>>,
}

impl<M> PressHub<M> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl FnMut(&PressTarget) -> Option<M> + 'static) -> Subscription<M> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push((id, Box::new(listener)));
        debug!("PressHub: subscribed listener {}", id);

        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Run every live listener against `target`, collecting their messages
    pub fn dispatch(&self, target: &PressTarget) -> Vec<M> {
        let mut inner = self.inner.borrow_mut();
        inner
            .entries
            .iter_mut()
            .filter_map(|(_, listener)| listener(target))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }
}

impl<M> Default for PressHub<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for one registered listener; dropping it unsubscribes
pub struct Subscription<M> {
    id: u64,
    hub: Weak<RefCell<Listeners<M>>>,
}

impl<M> Drop for Subscription<M> {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().entries.retain(|(id, _)| *id != self.id);
            debug!("PressHub: unsubscribed listener {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_collects_messages() {
        let hub: PressHub<&'static str> = PressHub::new();
        let _outside = hub.subscribe(|target| (*target == PressTarget::Elsewhere).then_some("outside"));
        let _always = hub.subscribe(|_| Some("any"));

        assert_eq!(hub.dispatch(&PressTarget::Elsewhere), vec!["outside", "any"]);
        assert_eq!(hub.dispatch(&PressTarget::SearchInput), vec!["any"]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub: PressHub<u8> = PressHub::new();
        let first = hub.subscribe(|_| Some(1));
        let second = hub.subscribe(|_| Some(2));
        assert_eq!(hub.listener_count(), 2);

        drop(first);
        assert_eq!(hub.listener_count(), 1);
        assert_eq!(hub.dispatch(&PressTarget::Elsewhere), vec![2]);

        drop(second);
        assert_eq!(hub.listener_count(), 0);
        assert!(hub.dispatch(&PressTarget::Elsewhere).is_empty());
    }

    #[test]
    fn test_subscription_outliving_hub() {
        let hub: PressHub<u8> = PressHub::new();
        let subscription = hub.subscribe(|_| None);
        drop(hub);
        // Nothing left to unsubscribe from
        drop(subscription);
    }
}
