// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance event channel.
//!
//! Each element owns one [`EventChannel`] with four independent lists, one per
//! [`Channel`]. Every list has its own callback signature:
//!
//! | Channel | Callback | Arguments |
//! |---|---|---|
//! | `mount` | [`MountCallback`] | parent container, if any |
//! | `unmount` | [`UnmountCallback`] | none |
//! | `prop` | [`PropCallback`] | property name, new value, old value |
//! | `attr` | [`AttrCallback`] | attribute name, new raw value, old raw value |
//!
//! Keyed subscriptions (`"prop:foo"`) are ordinary entries in the `prop`/`attr`
//! lists, wrapped by [`filter_by`] so they only run for their key. Their
//! callbacks ([`PropKeyCallback`], [`AttrKeyCallback`]) get only `(new, old)`.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use elemental_channel::{Channel, SubscriberList, Subscription, Topic};
use elemental_property::Value;

/// Receives the parent container on every connection.
pub type MountCallback<P> = dyn Fn(Option<&P>);

/// Runs on every disconnection.
pub type UnmountCallback = dyn Fn();

/// Receives `(name, new, old)` when a property changes value.
pub type PropCallback = dyn Fn(&str, &Value, &Value);

/// Receives `(name, new, old)` raw strings when an observed attribute changes.
///
/// `None` means the attribute is absent.
pub type AttrCallback = dyn Fn(&str, Option<&str>, Option<&str>);

/// Receives `(new, old)` when one named property changes value.
pub type PropKeyCallback = dyn Fn(&Value, &Value);

/// Receives `(new, old)` raw strings when one named attribute changes.
pub type AttrKeyCallback = dyn Fn(Option<&str>, Option<&str>);

/// A callback for one channel, for the string-topic subscription surface.
pub enum Handler<P: 'static> {
    /// A `mount` callback.
    Mount(Rc<MountCallback<P>>),
    /// An `unmount` callback.
    Unmount(Rc<UnmountCallback>),
    /// A `prop` callback.
    Prop(Rc<PropCallback>),
    /// An `attr` callback.
    Attr(Rc<AttrCallback>),
    /// A `prop:key` callback.
    PropKey(Rc<PropKeyCallback>),
    /// An `attr:key` callback.
    AttrKey(Rc<AttrKeyCallback>),
}

impl<P: 'static> Handler<P> {
    /// Wraps a `mount` callback.
    pub fn mount(callback: impl Fn(Option<&P>) + 'static) -> Self {
        Self::Mount(Rc::new(callback))
    }

    /// Wraps an `unmount` callback.
    pub fn unmount(callback: impl Fn() + 'static) -> Self {
        Self::Unmount(Rc::new(callback))
    }

    /// Wraps a `prop` callback.
    pub fn prop(callback: impl Fn(&str, &Value, &Value) + 'static) -> Self {
        Self::Prop(Rc::new(callback))
    }

    /// Wraps an `attr` callback.
    pub fn attr(callback: impl Fn(&str, Option<&str>, Option<&str>) + 'static) -> Self {
        Self::Attr(Rc::new(callback))
    }

    /// Wraps a `prop:key` callback.
    pub fn prop_key(callback: impl Fn(&Value, &Value) + 'static) -> Self {
        Self::PropKey(Rc::new(callback))
    }

    /// Wraps an `attr:key` callback.
    pub fn attr_key(callback: impl Fn(Option<&str>, Option<&str>) + 'static) -> Self {
        Self::AttrKey(Rc::new(callback))
    }

    /// Returns `true` if the handler is for a keyed topic.
    #[must_use]
    pub fn is_keyed(&self) -> bool {
        matches!(self, Self::PropKey(_) | Self::AttrKey(_))
    }

    /// Returns the channel this handler can subscribe to.
    #[must_use]
    pub fn channel(&self) -> Channel {
        match self {
            Self::Mount(_) => Channel::Mount,
            Self::Unmount(_) => Channel::Unmount,
            Self::Prop(_) | Self::PropKey(_) => Channel::Prop,
            Self::Attr(_) | Self::AttrKey(_) => Channel::Attr,
        }
    }
}

impl<P: 'static> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.channel()).finish()
    }
}

/// Callback signatures whose first argument is a key.
pub trait KeyedCallback {
    /// Returns a callback that forwards to `callback` only when the key is `key`.
    fn filtered(key: String, callback: Rc<Self>) -> Rc<Self>;
}

impl KeyedCallback for PropCallback {
    fn filtered(key: String, callback: Rc<Self>) -> Rc<Self> {
        Rc::new(move |name: &str, new: &Value, old: &Value| {
            if name == key {
                callback(name, new, old);
            }
        })
    }
}

impl KeyedCallback for AttrCallback {
    fn filtered(key: String, callback: Rc<Self>) -> Rc<Self> {
        Rc::new(move |name: &str, new: Option<&str>, old: Option<&str>| {
            if name == key {
                callback(name, new, old);
            }
        })
    }
}

/// Narrows a `prop` or `attr` callback to a single key.
pub fn filter_by<F: KeyedCallback + ?Sized>(key: impl Into<String>, callback: Rc<F>) -> Rc<F> {
    F::filtered(key.into(), callback)
}

/// The four subscriber lists of one element instance.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use elemental::{EventChannel, Handler};
/// use serde_json::json;
///
/// let events: EventChannel<()> = EventChannel::new();
/// let hits = Rc::new(Cell::new(0));
///
/// let counter = hits.clone();
/// let mut sub = events
///     .subscribe("prop:foo", Handler::prop_key(move |_, _| counter.set(counter.get() + 1)))
///     .unwrap();
///
/// events.dispatch_prop("foo", &json!(1), &json!(0));
/// events.dispatch_prop("bar", &json!(1), &json!(0));
/// assert_eq!(hits.get(), 1);
///
/// sub.unsubscribe();
/// events.dispatch_prop("foo", &json!(2), &json!(1));
/// assert_eq!(hits.get(), 1);
///
/// // Unknown categories are a no-op, and so are keyed topics with general handlers.
/// assert!(events.subscribe("click", Handler::unmount(|| {})).is_none());
/// assert!(events.subscribe("prop:foo", Handler::prop(|_, _, _| {})).is_none());
/// ```
pub struct EventChannel<P: 'static> {
    mount: SubscriberList<MountCallback<P>>,
    unmount: SubscriberList<UnmountCallback>,
    prop: SubscriberList<PropCallback>,
    attr: SubscriberList<AttrCallback>,
}

impl<P: 'static> Default for EventChannel<P> {
    fn default() -> Self {
        Self {
            mount: SubscriberList::new(),
            unmount: SubscriberList::new(),
            prop: SubscriberList::new(),
            attr: SubscriberList::new(),
        }
    }
}

impl<P: 'static> fmt::Debug for EventChannel<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("mount", &self.mount.len())
            .field("unmount", &self.unmount.len())
            .field("prop", &self.prop.len())
            .field("attr", &self.attr.len())
            .finish()
    }
}

impl<P: 'static> EventChannel<P> {
    /// Creates a channel with four empty lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to a topic written as `channel` or `channel:key`.
    ///
    /// Keyed topics (`"prop:foo"`) take [`Handler::PropKey`] or
    /// [`Handler::AttrKey`], un-narrowed topics the general handlers.
    ///
    /// Returns `None`, subscribing nothing, when the topic is not recognized or
    /// does not fit the handler.
    pub fn subscribe(&self, topic: &str, handler: Handler<P>) -> Option<Subscription> {
        self.subscribe_topic(Topic::parse(topic)?, handler)
    }

    /// Subscribes `handler` to an already parsed topic.
    pub fn subscribe_topic(&self, topic: Topic<'_>, handler: Handler<P>) -> Option<Subscription> {
        if topic.channel() != handler.channel() || topic.key().is_some() != handler.is_keyed() {
            return None;
        }
        let subscription = match handler {
            Handler::Mount(callback) => self.mount.subscribe(callback),
            Handler::Unmount(callback) => self.unmount.subscribe(callback),
            Handler::Prop(callback) => self.prop.subscribe(callback),
            Handler::Attr(callback) => self.attr.subscribe(callback),
            Handler::PropKey(callback) => self.prop.subscribe(keyed_prop(topic.key()?, callback)),
            Handler::AttrKey(callback) => self.attr.subscribe(keyed_attr(topic.key()?, callback)),
        };
        Some(subscription)
    }

    /// Subscribes to `mount`.
    pub fn on_mount(&self, callback: impl Fn(Option<&P>) + 'static) -> Subscription {
        self.mount.subscribe(Rc::new(callback))
    }

    /// Subscribes to `unmount`.
    pub fn on_unmount(&self, callback: impl Fn() + 'static) -> Subscription {
        self.unmount.subscribe(Rc::new(callback))
    }

    /// Subscribes to every `prop` change.
    pub fn on_prop(&self, callback: impl Fn(&str, &Value, &Value) + 'static) -> Subscription {
        self.prop.subscribe(Rc::new(callback))
    }

    /// Subscribes to `prop` changes of one property; the callback gets `(new, old)`.
    pub fn on_prop_key(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&Value, &Value) + 'static,
    ) -> Subscription {
        self.prop.subscribe(keyed_prop(name, Rc::new(callback)))
    }

    /// Subscribes to every `attr` change.
    pub fn on_attr(
        &self,
        callback: impl Fn(&str, Option<&str>, Option<&str>) + 'static,
    ) -> Subscription {
        self.attr.subscribe(Rc::new(callback))
    }

    /// Subscribes to `attr` changes of one attribute; the callback gets `(new, old)`.
    pub fn on_attr_key(
        &self,
        name: impl Into<String>,
        callback: impl Fn(Option<&str>, Option<&str>) + 'static,
    ) -> Subscription {
        self.attr.subscribe(keyed_attr(name, Rc::new(callback)))
    }

    /// Notifies `mount` subscribers.
    pub fn dispatch_mount(&self, parent: Option<&P>) {
        self.mount.dispatch(|callback| callback(parent));
    }

    /// Notifies `unmount` subscribers.
    pub fn dispatch_unmount(&self) {
        self.unmount.dispatch(|callback| callback());
    }

    /// Notifies `prop` subscribers.
    pub fn dispatch_prop(&self, name: &str, new: &Value, old: &Value) {
        self.prop.dispatch(|callback| callback(name, new, old));
    }

    /// Notifies `attr` subscribers.
    pub fn dispatch_attr(&self, name: &str, new: Option<&str>, old: Option<&str>) {
        self.attr.dispatch(|callback| callback(name, new, old));
    }

    /// Returns the number of subscriptions on `channel`.
    #[must_use]
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::Mount => self.mount.len(),
            Channel::Unmount => self.unmount.len(),
            Channel::Prop => self.prop.len(),
            Channel::Attr => self.attr.len(),
        }
    }
}

fn keyed_prop(key: impl Into<String>, callback: Rc<PropKeyCallback>) -> Rc<PropCallback> {
    let general: Rc<PropCallback> =
        Rc::new(move |_: &str, new: &Value, old: &Value| callback(new, old));
    filter_by(key, general)
}

fn keyed_attr(key: impl Into<String>, callback: Rc<AttrKeyCallback>) -> Rc<AttrCallback> {
    let general: Rc<AttrCallback> =
        Rc::new(move |_: &str, new: Option<&str>, old: Option<&str>| callback(new, old));
    filter_by(key, general)
}
