//! DocChat TUI - Terminal interface for chatting with your PDFs
//!
//! This crate provides a full-screen terminal UI over the headless
//! docchat-core session logic.
//!
//! # Architecture
//!
//! - **App**: Event loop, per-screen key handling, and rendering
//! - **Client**: Thin wrapper embedding the Coordinator
//! - **Display**: Display state derived from CoordinatorMessages
//! - **Picker**: Path-input expansion (the terminal's file picker)

pub mod app;
pub mod client;
pub mod display;
pub mod picker;
pub mod theme;

pub use app::App;
