//! Theme and Colors
//!
//! DocChat's color palette - a calm document-reader feel with a teal accent.

use ratatui::style::Color;

// ============================================================================
// Accents
// ============================================================================

/// Signature accent (titles, highlights, assistant prefix)
pub const ACCENT_TEAL: Color = Color::Rgb(64, 190, 180);

/// Secondary accent for selected list items
pub const SELECT_BLUE: Color = Color::Rgb(110, 160, 255);

// ============================================================================
// UI Colors
// ============================================================================

/// User input green
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Warning amber
pub const WARN_AMBER: Color = Color::Rgb(235, 180, 80);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);
