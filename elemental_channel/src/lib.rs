// Copyright 2025 the Elemental Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elemental Channel: ordered subscriber lists for element events.
//!
//! - [`SubscriberList`]: callbacks of one signature, invoked in subscription
//!   order over a snapshot, so callbacks can subscribe and unsubscribe while
//!   being dispatched.
//! - [`Subscription`]: the handle returned by every subscribe call; its
//!   [`unsubscribe`](Subscription::unsubscribe) is idempotent.
//! - [`Channel`] and [`Topic`]: the closed set of element event categories and
//!   the `"prop:fooBar"` topic syntax that narrows a subscription to one key.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`). Dispatch is not
//! guarded against unbounded recursion: a callback that re-triggers its own
//! event unconditionally recurses until the stack runs out.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod list;
mod topic;

pub use list::{SubscriberList, Subscription};
pub use topic::{Channel, Topic};
