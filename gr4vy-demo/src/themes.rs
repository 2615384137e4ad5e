//! Challenge-UI theme presets.
//!
//! Each preset is a light/dark pair of styling bundles applied only when
//! the 3-D Secure challenge UI is shown. Palette values are fixed data.

use std::collections::HashMap;

use gr4vy::threeds::{
    ButtonCustomization, ButtonRole, LabelCustomization, TextBoxCustomization,
    ToolbarCustomization, UiCustomization, UiCustomizationMap, ViewCustomization,
};

/// Selectable theme presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeOption {
    /// No theme; the challenge UI uses the engine's stock styling.
    #[default]
    None,
    /// Red submit button on a blue toolbar.
    RedBlue,
    /// Orange accents with purple headings.
    OrangePurple,
    /// Green accents on a yellow toolbar.
    GreenYellow,
}

/// All presets in display order.
pub const THEME_OPTIONS: &[ThemeOption] = &[
    ThemeOption::None,
    ThemeOption::RedBlue,
    ThemeOption::OrangePurple,
    ThemeOption::GreenYellow,
];

impl ThemeOption {
    /// Stable raw value used for persistence.
    #[must_use]
    pub fn raw_value(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::RedBlue => "redBlue",
            Self::OrangePurple => "orangePurple",
            Self::GreenYellow => "greenYellow",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "No Theme",
            Self::RedBlue => "Red / Blue",
            Self::OrangePurple => "Orange / Purple",
            Self::GreenYellow => "Green / Yellow",
        }
    }

    /// Parses a stored raw value, falling back to [`Self::None`] for
    /// anything unknown.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        THEME_OPTIONS
            .iter()
            .copied()
            .find(|option| option.raw_value() == value)
            .unwrap_or_default()
    }

    /// Builds the styling bundle for this preset, `None` for [`Self::None`].
    #[must_use]
    pub fn customization(self) -> Option<UiCustomizationMap> {
        match self {
            Self::None => None,
            Self::RedBlue => Some(red_blue()),
            Self::OrangePurple => Some(orange_purple()),
            Self::GreenYellow => Some(green_yellow()),
        }
    }
}

fn button(
    font: Option<&str>,
    size: u16,
    text: &str,
    background: &str,
    radius: u16,
) -> ButtonCustomization {
    ButtonCustomization {
        text_font_name: font.map(str::to_owned),
        text_font_size: size,
        text_color_hex: text.to_owned(),
        background_color_hex: background.to_owned(),
        corner_radius: radius,
    }
}

fn red_blue() -> UiCustomizationMap {
    let light = UiCustomization {
        label: LabelCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#1c1c1e".to_owned(),
            heading_text_font_name: "sans-serif-medium".to_owned(),
            heading_text_font_size: 24,
            heading_text_color_hex: "#0a0a0a".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 17,
            text_color_hex: "#ffffff".to_owned(),
            background_color_hex: "#007aff".to_owned(),
            header_text: "Secure Checkout".to_owned(),
            button_text: "Cancel".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#000000".to_owned(),
            border_width: 2,
            border_color_hex: "#e4e4e4".to_owned(),
            corner_radius: 12,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#ffffff".to_owned(),
            progress_view_background_color_hex: "#ffffff".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-medium"), 16, "#ffffff", "#ff3b30", 18),
            ),
            (ButtonRole::Continue, button(None, 16, "#ffffff", "#007aff", 14)),
            (ButtonRole::Cancel, button(None, 15, "#007aff", "#e5e5ea", 12)),
        ]),
    };

    let dark = UiCustomization {
        label: LabelCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#ffffff".to_owned(),
            heading_text_font_name: "sans-serif-medium".to_owned(),
            heading_text_font_size: 24,
            heading_text_color_hex: "#ffffff".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 17,
            text_color_hex: "#ffffff".to_owned(),
            background_color_hex: "#0a84ff".to_owned(),
            header_text: "SECURE CHECKOUT".to_owned(),
            button_text: "Close".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#ffffff".to_owned(),
            border_width: 2,
            border_color_hex: "#48484a".to_owned(),
            corner_radius: 12,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#000000".to_owned(),
            progress_view_background_color_hex: "#1c1c1e".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-medium"), 16, "#ffffff", "#ff453a", 18),
            ),
            (ButtonRole::Continue, button(None, 16, "#ffffff", "#0a84ff", 14)),
            (ButtonRole::Cancel, button(None, 15, "#0a84ff", "#2c2c2e", 12)),
        ]),
    };

    UiCustomizationMap {
        default: light,
        dark,
    }
}

fn orange_purple() -> UiCustomizationMap {
    let light = UiCustomization {
        label: LabelCustomization {
            text_font_name: "serif".to_owned(),
            text_font_size: 18,
            text_color_hex: "#1c1c1e".to_owned(),
            heading_text_font_name: "sans-serif-black".to_owned(),
            heading_text_font_size: 26,
            heading_text_color_hex: "#af52de".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-black".to_owned(),
            text_font_size: 18,
            text_color_hex: "#ffffff".to_owned(),
            background_color_hex: "#af52de".to_owned(),
            header_text: "Secure Checkout".to_owned(),
            button_text: "Cancel".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#000000".to_owned(),
            border_width: 3,
            border_color_hex: "#ff9500".to_owned(),
            corner_radius: 8,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#ffffff".to_owned(),
            progress_view_background_color_hex: "#f9f9f9".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-black"), 18, "#ffffff", "#ff9500", 24),
            ),
            (ButtonRole::Continue, button(None, 16, "#ffffff", "#af52de", 20)),
            (ButtonRole::Cancel, button(None, 16, "#af52de", "#e5e5ea", 16)),
        ]),
    };

    let dark = UiCustomization {
        label: LabelCustomization {
            text_font_name: "serif".to_owned(),
            text_font_size: 18,
            text_color_hex: "#ffffff".to_owned(),
            heading_text_font_name: "sans-serif-black".to_owned(),
            heading_text_font_size: 26,
            heading_text_color_hex: "#bf5af2".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-black".to_owned(),
            text_font_size: 18,
            text_color_hex: "#ffffff".to_owned(),
            background_color_hex: "#bf5af2".to_owned(),
            header_text: "SECURE CHECKOUT".to_owned(),
            button_text: "Close".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#ffffff".to_owned(),
            border_width: 3,
            border_color_hex: "#ff9f0a".to_owned(),
            corner_radius: 8,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#000000".to_owned(),
            progress_view_background_color_hex: "#1c1c1e".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-black"), 18, "#000000", "#ff9f0a", 24),
            ),
            (ButtonRole::Continue, button(None, 16, "#ffffff", "#bf5af2", 20)),
            (ButtonRole::Cancel, button(None, 16, "#bf5af2", "#2c2c2e", 16)),
        ]),
    };

    UiCustomizationMap {
        default: light,
        dark,
    }
}

fn green_yellow() -> UiCustomizationMap {
    let light = UiCustomization {
        label: LabelCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 17,
            text_color_hex: "#000000".to_owned(),
            heading_text_font_name: "sans-serif-medium".to_owned(),
            heading_text_font_size: 24,
            heading_text_color_hex: "#000000".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 18,
            text_color_hex: "#000000".to_owned(),
            background_color_hex: "#ffcc00".to_owned(),
            header_text: "Secure Checkout".to_owned(),
            button_text: "Cancel".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#000000".to_owned(),
            border_width: 2,
            border_color_hex: "#34c759".to_owned(),
            corner_radius: 8,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#ffffff".to_owned(),
            progress_view_background_color_hex: "#fffacd".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-medium"), 17, "#ffffff", "#34c759", 16),
            ),
            (ButtonRole::Continue, button(None, 16, "#000000", "#ffcc00", 14)),
            (ButtonRole::Cancel, button(None, 15, "#000000", "#f0f0f0", 12)),
        ]),
    };

    let dark = UiCustomization {
        label: LabelCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 17,
            text_color_hex: "#ffffff".to_owned(),
            heading_text_font_name: "sans-serif-medium".to_owned(),
            heading_text_font_size: 24,
            heading_text_color_hex: "#ffffff".to_owned(),
        },
        toolbar: ToolbarCustomization {
            text_font_name: "sans-serif-medium".to_owned(),
            text_font_size: 18,
            text_color_hex: "#000000".to_owned(),
            background_color_hex: "#ffd60a".to_owned(),
            header_text: "SECURE CHECKOUT".to_owned(),
            button_text: "Close".to_owned(),
        },
        text_box: TextBoxCustomization {
            text_font_name: "sans-serif".to_owned(),
            text_font_size: 16,
            text_color_hex: "#ffffff".to_owned(),
            border_width: 2,
            border_color_hex: "#30d158".to_owned(),
            corner_radius: 8,
        },
        view: ViewCustomization {
            challenge_view_background_color_hex: "#000000".to_owned(),
            progress_view_background_color_hex: "#1c1c1e".to_owned(),
        },
        buttons: HashMap::from([
            (
                ButtonRole::Submit,
                button(Some("sans-serif-medium"), 17, "#000000", "#30d158", 16),
            ),
            (ButtonRole::Continue, button(None, 16, "#000000", "#ffd60a", 14)),
            (ButtonRole::Cancel, button(None, 15, "#ffd60a", "#3a3a3c", 12)),
        ]),
    };

    UiCustomizationMap {
        default: light,
        dark,
    }
}
