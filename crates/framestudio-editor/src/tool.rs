//! Editing tools.

use serde::{Deserialize, Serialize};

/// The tool currently selected in the editor sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveTool {
    #[default]
    Select,
    Shapes,
    Text,
    Images,
    Draw,
    Fill,
    StrokeColor,
    StrokeWidth,
    Font,
    Opacity,
    Filter,
    Settings,
    Ai,
    RemoveBg,
    Templates,
}

impl ActiveTool {
    /// Every tool in sidebar order.
    pub const ALL: [ActiveTool; 15] = [
        Self::Select,
        Self::Shapes,
        Self::Text,
        Self::Images,
        Self::Draw,
        Self::Fill,
        Self::StrokeColor,
        Self::StrokeWidth,
        Self::Font,
        Self::Opacity,
        Self::Filter,
        Self::Settings,
        Self::Ai,
        Self::RemoveBg,
        Self::Templates,
    ];

    /// Tools that act on the selected object and make no sense without one.
    pub fn is_selection_dependent(self) -> bool {
        matches!(
            self,
            Self::Fill
                | Self::StrokeColor
                | Self::StrokeWidth
                | Self::Font
                | Self::Opacity
                | Self::Filter
                | Self::RemoveBg
        )
    }

    /// Display name for the tool.
    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Shapes => "Shapes",
            Self::Text => "Text",
            Self::Images => "Images",
            Self::Draw => "Draw",
            Self::Fill => "Fill color",
            Self::StrokeColor => "Stroke color",
            Self::StrokeWidth => "Stroke width",
            Self::Font => "Font",
            Self::Opacity => "Opacity",
            Self::Filter => "Filters",
            Self::Settings => "Settings",
            Self::Ai => "AI",
            Self::RemoveBg => "Remove background",
            Self::Templates => "Templates",
        }
    }

    /// Whether the tool appears in the main sidebar. The rest are opened from
    /// the selection toolbar.
    pub fn in_sidebar(self) -> bool {
        matches!(
            self,
            Self::Templates
                | Self::Images
                | Self::Text
                | Self::Shapes
                | Self::Draw
                | Self::Ai
                | Self::Settings
        )
    }
}
