//! Event coordination for the `justified` crate.
//!
//! The `justified` crate is headless and expects its host to decide when passes run. This crate
//! provides the framework-neutral glue that usually sits in between:
//!
//! - scroll coalescing: at most one visibility pass per display refresh
//! - a shared resize registry: one host listener, one batched broadcast per frame
//! - frame scheduling with a timer fallback when no refresh callback exists
//! - a [`Controller`] with `initialize` / `enable` / `disable`
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod resize;
mod scheduler;
mod scroll;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use resize::{ResizeCallback, ResizeRegistry, ResizeSubscription, SharedResizeRegistry};
pub use scheduler::{EventSource, FALLBACK_FRAME_DELAY_MS, FrameScheduler, schedule_frame};
pub use scroll::ScrollCoalescer;
