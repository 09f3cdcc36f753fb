//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the client/domain layers. It implements the
//! event-driven architecture behind the gallery browser.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── Web Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central state container and search orchestration
//! - [`presenter`]: View model computation from state
//!
//! # Example
//!
//! ```rust
//! use galleria::app::{AppState, Event, handle_event};
//! use galleria::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Default::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! # Ok::<(), galleria::GalleriaError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod presenter;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
