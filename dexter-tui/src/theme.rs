//! SynthBrute theme and color utilities.

use crate::notifications::NotificationLevel;
use dexter_core::RecordView;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            primary: Color::Rgb(0, 255, 255),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

impl Default for SynthBruteTheme {
    fn default() -> Self {
        Self::synthbrute()
    }
}

pub fn record_view_color(view: &RecordView, theme: &SynthBruteTheme) -> Color {
    match view {
        RecordView::Loading { .. } => theme.text_dim,
        RecordView::Failed { .. } => theme.error,
        RecordView::Ready(_) => theme.primary,
    }
}

pub fn lock_color(locked: bool, theme: &SynthBruteTheme) -> Color {
    if locked {
        theme.warning
    } else {
        theme.success
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}

/// Alternate the record frame between two accents so each navigation is
/// visibly a new frame.
pub fn epoch_accent(epoch: u64, theme: &SynthBruteTheme) -> Color {
    if epoch % 2 == 0 {
        theme.primary
    } else {
        theme.secondary
    }
}
