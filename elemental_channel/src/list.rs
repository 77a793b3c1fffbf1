// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered subscriber lists and their unsubscribe handles.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use smallvec::SmallVec;

/// Most lists hold a few callbacks at most.
const INLINE_CAPACITY: usize = 4;

type Slots<F> = SmallVec<[Rc<F>; INLINE_CAPACITY]>;

/// An ordered list of callbacks of one signature.
///
/// `F` is usually an unsized closure type such as `dyn Fn(&str)`. Callbacks
/// are invoked in subscription order. The same callback may be subscribed
/// more than once and then runs once per subscription.
///
/// # Reentrancy
///
/// [`dispatch`](Self::dispatch) iterates over a snapshot taken before the
/// first callback runs. Callbacks may subscribe or unsubscribe on the list
/// they are being called from; the changes apply from the next dispatch on.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use elemental_channel::SubscriberList;
///
/// let list: SubscriberList<dyn Fn(&str)> = SubscriberList::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let a = log.clone();
/// let mut first = list.subscribe(Rc::new(move |s: &str| a.borrow_mut().push(format!("1:{s}"))));
/// let b = log.clone();
/// list.subscribe(Rc::new(move |s: &str| b.borrow_mut().push(format!("2:{s}"))));
///
/// list.dispatch(|callback| callback("x"));
/// first.unsubscribe();
/// list.dispatch(|callback| callback("y"));
///
/// assert_eq!(*log.borrow(), ["1:x", "2:x", "2:y"]);
/// ```
pub struct SubscriberList<F: ?Sized> {
    slots: Rc<RefCell<Slots<F>>>,
}

impl<F: ?Sized> Default for SubscriberList<F> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(SmallVec::new())),
        }
    }
}

impl<F: ?Sized> fmt::Debug for SubscriberList<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.slots.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<F: ?Sized + 'static> SubscriberList<F> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` and returns the handle that removes it again.
    pub fn subscribe(&self, callback: Rc<F>) -> Subscription {
        let target = Rc::downgrade(&callback);
        self.slots.borrow_mut().push(callback);
        let slots = Rc::downgrade(&self.slots);
        Subscription::new(move || {
            let Some(slots) = slots.upgrade() else {
                return;
            };
            let mut slots = slots.borrow_mut();
            // First occurrence only: duplicates are removed one handle at a time.
            // `target` keeps the allocation alive, so its address cannot be reused.
            if let Some(idx) = slots
                .iter()
                .position(|cb| core::ptr::addr_eq(Rc::as_ptr(cb), target.as_ptr()))
            {
                slots.remove(idx);
            }
        })
    }

    /// Invokes `call` once per subscribed callback, in subscription order.
    ///
    /// A panicking callback aborts the rest of this pass.
    pub fn dispatch(&self, mut call: impl FnMut(&F)) {
        for callback in self.snapshot() {
            call(&callback);
        }
    }

    /// Returns the callbacks subscribed right now.
    #[must_use]
    pub fn snapshot(&self) -> SmallVec<[Rc<F>; INLINE_CAPACITY]> {
        self.slots.borrow().clone()
    }

    /// Returns the number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Drops every subscription. Outstanding handles become no-ops.
    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }
}

/// Handle returned by [`SubscriberList::subscribe`].
///
/// [`unsubscribe`](Self::unsubscribe) removes the subscription; calling it
/// again does nothing. Dropping the handle leaves the subscription in place.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wraps an arbitrary detach action.
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Removes the subscription. Subsequent calls are no-ops.
    pub fn unsubscribe(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Returns `true` until [`unsubscribe`](Self::unsubscribe) has been called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    type Log = Rc<RefCell<Vec<u32>>>;

    fn recorder(log: &Log, id: u32) -> Rc<dyn Fn()> {
        let log = log.clone();
        Rc::new(move || log.borrow_mut().push(id))
    }

    #[test]
    fn dispatch_follows_subscription_order() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let log = Log::default();
        for id in 1..=4 {
            list.subscribe(recorder(&log, id));
        }
        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unsubscribe_removes_exactly_one() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let log = Log::default();
        list.subscribe(recorder(&log, 1));
        let mut second = list.subscribe(recorder(&log, 2));
        list.subscribe(recorder(&log, 3));

        second.unsubscribe();
        assert!(!second.is_active());
        second.unsubscribe();
        assert_eq!(list.len(), 2);

        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![1, 3]);
    }

    #[test]
    fn duplicates_are_removed_first_match_first() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let log = Log::default();
        let shared = recorder(&log, 7);
        let mut a = list.subscribe(shared.clone());
        list.subscribe(recorder(&log, 8));
        let mut b = list.subscribe(shared);

        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![7, 8, 7]);

        log.borrow_mut().clear();
        b.unsubscribe();
        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![8, 7]);

        log.borrow_mut().clear();
        a.unsubscribe();
        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![8]);
    }

    #[test]
    fn subscribing_during_dispatch_waits_for_next_pass() {
        let list: Rc<SubscriberList<dyn Fn()>> = Rc::new(SubscriberList::new());
        let calls = Rc::new(Cell::new(0_u32));
        let inner_list = list.clone();
        let inner_calls = calls.clone();
        list.subscribe(Rc::new(move || {
            let counter = inner_calls.clone();
            inner_list.subscribe(Rc::new(move || counter.set(counter.get() + 100)));
            inner_calls.set(inner_calls.get() + 1);
        }));

        list.dispatch(|cb| cb());
        assert_eq!(calls.get(), 1);
        assert_eq!(list.len(), 2);

        list.dispatch(|cb| cb());
        assert_eq!(calls.get(), 102);
    }

    #[test]
    fn unsubscribing_during_dispatch_keeps_current_pass() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let log = Log::default();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let killer_victim = victim.clone();
        let killer_log = log.clone();
        list.subscribe(Rc::new(move || {
            killer_log.borrow_mut().push(1);
            if let Some(sub) = killer_victim.borrow_mut().as_mut() {
                sub.unsubscribe();
            }
        }));
        *victim.borrow_mut() = Some(list.subscribe(recorder(&log, 2)));

        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![1, 2]);

        list.dispatch(|cb| cb());
        assert_eq!(*log.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn handles_outlive_their_list() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let mut sub = list.subscribe(Rc::new(|| {}));
        drop(list);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }

    #[test]
    fn clear_empties_the_list() {
        let list: SubscriberList<dyn Fn()> = SubscriberList::new();
        let mut sub = list.subscribe(Rc::new(|| {}));
        list.clear();
        assert!(list.is_empty());
        sub.unsubscribe();
        assert!(list.is_empty());
    }
}
