// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event categories and topic strings.

use core::fmt;

/// One of the four fixed event categories of an element.
///
/// The set is closed: there is no way to name another category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The element was connected to a document.
    Mount,
    /// The element was disconnected from its document.
    Unmount,
    /// A property changed value.
    Prop,
    /// An observed attribute changed value.
    Attr,
}

impl Channel {
    /// Every channel, in declaration order.
    pub const ALL: [Self; 4] = [Self::Mount, Self::Unmount, Self::Prop, Self::Attr];

    /// Returns the topic name of this channel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Unmount => "unmount",
            Self::Prop => "prop",
            Self::Attr => "attr",
        }
    }

    /// Looks up a channel by topic name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|channel| channel.name() == name)
    }

    /// Returns `true` if events on this channel carry a key that
    /// subscriptions can be narrowed to.
    #[must_use]
    pub const fn is_keyed(self) -> bool {
        matches!(self, Self::Prop | Self::Attr)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed subscription topic: a channel, optionally narrowed to one key.
///
/// Topics are written `channel` or `channel:key`, e.g. `"mount"` or
/// `"prop:fooBar"`. Only `prop` and `attr` accept a key.
///
/// ```rust
/// use elemental_channel::{Channel, Topic};
///
/// let topic = Topic::parse("prop:foo").unwrap();
/// assert_eq!(topic.channel(), Channel::Prop);
/// assert_eq!(topic.key(), Some("foo"));
///
/// assert!(Topic::parse("mount:foo").is_none());
/// assert!(Topic::parse("click").is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Topic<'a> {
    channel: Channel,
    key: Option<&'a str>,
}

impl<'a> Topic<'a> {
    /// Creates an un-narrowed topic.
    #[must_use]
    pub const fn new(channel: Channel) -> Self {
        Self { channel, key: None }
    }

    /// Creates a topic narrowed to `key`.
    ///
    /// Returns `None` if the channel has no keys or `key` is empty.
    #[must_use]
    pub fn keyed(channel: Channel, key: &'a str) -> Option<Self> {
        (channel.is_keyed() && !key.is_empty()).then_some(Self {
            channel,
            key: Some(key),
        })
    }

    /// Parses `channel` or `channel:key`.
    ///
    /// Everything after the first `:` is the key. Unknown channels, keys on
    /// `mount`/`unmount`, and empty keys are rejected.
    #[must_use]
    pub fn parse(topic: &'a str) -> Option<Self> {
        match topic.split_once(':') {
            Some((channel, key)) => Self::keyed(Channel::from_name(channel)?, key),
            None => Channel::from_name(topic).map(Self::new),
        }
    }

    /// Returns the channel.
    #[must_use]
    #[inline]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns the key the topic is narrowed to, if any.
    #[must_use]
    #[inline]
    pub const fn key(&self) -> Option<&'a str> {
        self.key
    }
}

impl fmt::Display for Topic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            Some(key) => write!(f, "{}:{key}", self.channel),
            None => write!(f, "{}", self.channel),
        }
    }
}
