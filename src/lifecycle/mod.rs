// SPDX-License-Identifier: MPL-2.0
//! Deterministic teardown primitives.
//!
//! Every component that registers listeners with a collaborator keeps the
//! returned handles in a [`DisposableStore`]. The store releases each handle
//! exactly once, whether teardown is requested explicitly or the store is
//! dropped.
//!
//! - [`Disposable`]: anything that can be released
//! - [`Subscription`]: a release-once listener registration
//! - [`DisposableStore`]: the registry of handles owned by one component
//! - [`Emitter`]: a single-threaded change stream handing out subscriptions

mod dispose;
mod emitter;

pub use dispose::{Disposable, DisposableStore, Subscription};
pub use emitter::{Emitter, Listener};
