//! # Core Application Logic
//!
//! This module contains the controller: state, actions and the reducer.
//! It knows nothing about any specific UI technology or about HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │    API     │
//!          │  Adapter   │                │  (reqwest) │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the `UiState` machine
//! - [`action`]: The `Action` enum and `update()`
//! - [`persona`]: The persona model and its display rows
//! - [`chat`]: The chat log
//! - [`notify`]: Transient notification banners
//! - [`markup`]: Plain-text rendering of backend markup
//! - [`config`]: Settings resolution

pub mod action;
pub mod chat;
pub mod config;
pub mod markup;
pub mod notify;
pub mod persona;
pub mod state;
