//! The fixed catalog of logo arrangements.

use serde::{Deserialize, Serialize};

/// Where the icon sits relative to the wordmark.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IconPosition {
    Left,
    Top,
    Right,
    None,
    Center,
    Integrated,
}

/// How the company name and slogan are aligned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    None,
    Around,
}

/// One of the eight statically defined logo arrangements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LogoLayout {
    IconLeft,
    IconTop,
    IconRight,
    TextOnly,
    IconOnly,
    IconIntegrated,
    Stacked,
    Badge,
}

impl LogoLayout {
    /// Every layout, in catalog order.
    pub const ALL: [LogoLayout; 8] = [
        LogoLayout::IconLeft,
        LogoLayout::IconTop,
        LogoLayout::IconRight,
        LogoLayout::TextOnly,
        LogoLayout::IconOnly,
        LogoLayout::IconIntegrated,
        LogoLayout::Stacked,
        LogoLayout::Badge,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            LogoLayout::IconLeft => "icon-left",
            LogoLayout::IconTop => "icon-top",
            LogoLayout::IconRight => "icon-right",
            LogoLayout::TextOnly => "text-only",
            LogoLayout::IconOnly => "icon-only",
            LogoLayout::IconIntegrated => "icon-integrated",
            LogoLayout::Stacked => "stacked",
            LogoLayout::Badge => "badge",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogoLayout::IconLeft => "Icon Left + Text Right",
            LogoLayout::IconTop => "Icon Top + Text Below",
            LogoLayout::IconRight => "Icon Right + Text Left",
            LogoLayout::TextOnly => "Text Only (Wordmark)",
            LogoLayout::IconOnly => "Icon Only (Symbol Mark)",
            LogoLayout::IconIntegrated => "Icon Integrated in Text",
            LogoLayout::Stacked => "Stacked (Icon + Name + Slogan)",
            LogoLayout::Badge => "Badge/Emblem Style",
        }
    }

    pub fn icon_position(&self) -> IconPosition {
        match self {
            LogoLayout::IconLeft => IconPosition::Left,
            LogoLayout::IconTop | LogoLayout::Stacked => IconPosition::Top,
            LogoLayout::IconRight => IconPosition::Right,
            LogoLayout::TextOnly => IconPosition::None,
            LogoLayout::IconOnly | LogoLayout::Badge => IconPosition::Center,
            LogoLayout::IconIntegrated => IconPosition::Integrated,
        }
    }

    pub fn text_align(&self) -> TextAlign {
        match self {
            LogoLayout::IconLeft => TextAlign::Left,
            LogoLayout::IconRight => TextAlign::Right,
            LogoLayout::IconOnly => TextAlign::None,
            LogoLayout::Badge => TextAlign::Around,
            LogoLayout::IconTop
            | LogoLayout::TextOnly
            | LogoLayout::IconIntegrated
            | LogoLayout::Stacked => TextAlign::Center,
        }
    }

    pub fn shows_icon(&self) -> bool {
        self.icon_position() != IconPosition::None
    }

    pub fn shows_text(&self) -> bool {
        self.text_align() != TextAlign::None
    }
}
