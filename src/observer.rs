//! Explicit change notification for whoever renders the store.

use crate::domain::UserId;

/// What changed in the store. Emitted after the change has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Added(UserId),
    Updated(UserId),
    Deleted(UserId),
    Validated { id: UserId, valid: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn Fn(&ChangeEvent) + Send>;

/// Ordered list of change callbacks.
#[derive(Default)]
pub struct Observers {
    next: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn subscribe(&mut self, callback: impl Fn(&ChangeEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns whether a callback was registered under `id`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sub, _)| *sub != id);
        self.callbacks.len() != before
    }

    pub fn notify(&self, event: ChangeEvent) {
        for (_, callback) in &self.callbacks {
            callback(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn notifies_in_subscription_order_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();

        let first = {
            let seen = seen.clone();
            observers.subscribe(move |event| seen.lock().unwrap().push(("first", *event)))
        };
        {
            let seen = seen.clone();
            observers.subscribe(move |event| seen.lock().unwrap().push(("second", *event)));
        }

        observers.notify(ChangeEvent::Added(UserId(1)));
        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        observers.notify(ChangeEvent::Deleted(UserId(1)));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("first", ChangeEvent::Added(UserId(1))),
                ("second", ChangeEvent::Added(UserId(1))),
                ("second", ChangeEvent::Deleted(UserId(1))),
            ]
        );
    }
}
