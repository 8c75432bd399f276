//! Event-driven coordinator for the `datagrid` crate.
//!
//! The `datagrid` crate provides the pure pieces (windowing, sticky offsets, selection, edit
//! transactions). This crate composes them into a [`GridCoordinator`] that consumes the streams a
//! host UI produces:
//!
//! - geometry: container size, row heights, column widths, page chrome
//! - input: pointer clicks, key presses, focus changes
//! - collection snapshots: ordered row keys plus an identity token
//!
//! and exposes per-frame read snapshots (mount set, offset map, selection, edit state).
//!
//! No UI framework bindings live here (no DOM/egui/ratatui types).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod event;
mod options;


pub use coordinator::{GridCoordinator, GridSnapshot, Viewport};
pub use event::{
    CollectionSnapshot, GeometryEvent, InputEffect, InputEvent, KeyCode, Modifiers,
};
pub use options::GridOptions;
