#![forbid(unsafe_code)]

//! Core: pointer input model, drag geometry, configuration, and reorder primitives.
//!
//! # Role in Dragline
//! `dragline-core` holds everything that is pure data or a pure function.
//! Nothing here keeps state between calls or talks to a host.
//!
//! # Primary responsibilities
//! - **geometry**: [`geometry::Point`], [`geometry::Rect`], [`geometry::clamp`],
//!   and the rounded translate used when a dragged element is moved.
//! - **event**: the canonical [`event::PointerInput`] (mouse or touch) and
//!   coordinate extraction.
//! - **reorder**: in-place move within a list, transfer between lists, and
//!   copy between lists, all with index clamping.
//! - **config**: [`config::DragConfig`] thresholds with validation and
//!   optional file loading.
//!
//! # How it fits in the system
//! `dragline-runtime` consumes these types to drive a drag session. Drop
//! targets call the [`reorder`] operators directly with the indices carried by
//! a drop notification.

pub mod config;
pub mod event;
pub mod geometry;
pub mod reorder;
