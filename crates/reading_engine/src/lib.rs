//! Reading Engine - selection, highlighting and the reading surface
//!
//! This crate drives the interactive part of the reading screen without
//! owning any widgets. A host UI feeds it touch, selection, scroll and chat
//! events together with a monotonic timestamp, and gets back effects to
//! perform plus a view snapshot to draw:
//! - Selection tracking with a debounced action menu
//! - Menu positioning from a paragraph's on-screen box
//! - Explain / Highlight / Save / Copy actions on the current selection
//! - Toolbar auto-hide, scroll settling and the chat sheet
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use reading_engine::{
//!     CannedResponder, MemoryClipboard, ReaderSettings, ReadingSurface, Rect, SelectionAction,
//!     SurfaceEvent, Viewport,
//! };
//! use reading_model::Document;
//!
//! let document = Document::new("Book", ["The Enlightenment was a rebellion"]);
//! let mut surface = ReadingSurface::new(
//!     document,
//!     ReaderSettings::default(),
//!     Viewport::new(390.0, 844.0),
//!     MemoryClipboard::default(),
//!     CannedResponder,
//! );
//!
//! let anchor = Rect::new(16.0, 200.0, 358.0, 48.0);
//! surface
//!     .handle(
//!         SurfaceEvent::SelectionChange { paragraph_index: 0, start: 4, end: 17, anchor },
//!         Duration::ZERO,
//!     )
//!     .unwrap();
//! surface
//!     .handle(
//!         SurfaceEvent::Action { action: SelectionAction::Highlight },
//!         Duration::from_millis(600),
//!     )
//!     .unwrap();
//!
//! assert_eq!(surface.highlights().len(), 1);
//! ```

mod error;
mod settings;
mod geometry;
mod timer;
mod tracker;
mod positioner;
mod menu;
mod clipboard;
mod chat;
mod event;
mod surface;
mod view;

pub use error::*;
pub use settings::*;
pub use geometry::*;
pub use timer::*;
pub use tracker::*;
pub use positioner::*;
pub use menu::*;
pub use clipboard::*;
pub use chat::*;
pub use event::*;
pub use surface::*;
pub use view::*;

/// Re-export for convenience
pub use std::time::Duration;
