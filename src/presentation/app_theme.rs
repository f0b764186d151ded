use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme};

use crate::core::models::ThemeMode;

pub fn get_theme(mode: &ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::custom(
            "Dark".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.11, 0.11, 0.12),
                text: Color::from_rgb(0.95, 0.95, 0.95),
                primary: Color::from_rgb(0.4, 0.6, 1.0),
                success: Color::from_rgb(0.2, 0.9, 0.4),
                danger: Color::from_rgb(1.0, 0.3, 0.3),
                warning: Color::from_rgb(1.0, 0.7, 0.0),
            },
        ),
        ThemeMode::Light => Theme::custom(
            "Light".to_string(),
            iced::theme::Palette {
                background: Color::from_rgb(0.95, 0.95, 0.97),
                text: Color::from_rgb(0.1, 0.1, 0.1),
                primary: Color::from_rgb(0.2, 0.4, 0.9),
                success: Color::from_rgb(0.1, 0.7, 0.3),
                danger: Color::from_rgb(0.9, 0.2, 0.2),
                warning: Color::from_rgb(0.9, 0.6, 0.0),
            },
        ),
    }
}

/// Fill colors for one button family, per interaction state.
struct ButtonColors {
    active: Color,
    hovered: Color,
    pressed: Color,
    text: Color,
}

const PRIMARY: ButtonColors = ButtonColors {
    active: Color::from_rgb(0.098, 0.529, 0.329),
    hovered: Color::from_rgb(0.122, 0.655, 0.408),
    pressed: Color::from_rgb(0.078, 0.420, 0.263),
    text: Color::WHITE,
};

const SECONDARY: ButtonColors = ButtonColors {
    active: Color::from_rgb(0.25, 0.25, 0.25),
    hovered: Color::from_rgb(0.35, 0.35, 0.35),
    pressed: Color::from_rgb(0.2, 0.2, 0.2),
    text: Color::from_rgb(0.85, 0.85, 0.85),
};

const DANGER: ButtonColors = ButtonColors {
    active: Color::from_rgb(0.8, 0.25, 0.25),
    hovered: Color::from_rgb(0.9, 0.35, 0.35),
    pressed: Color::from_rgb(0.7, 0.2, 0.2),
    text: Color::WHITE,
};

fn styled_button(colors: &ButtonColors, status: button::Status) -> button::Style {
    let (fill, text_color) = match status {
        button::Status::Active => (colors.active, colors.text),
        button::Status::Hovered => (colors.hovered, colors.text),
        button::Status::Pressed => (colors.pressed, colors.text),
        button::Status::Disabled => (Color::from_rgb(0.3, 0.3, 0.3), Color::from_rgb(0.5, 0.5, 0.5)),
    };

    button::Style {
        background: Some(Background::Color(fill)),
        text_color,
        border: Border {
            color: fill,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap: matches!(status, button::Status::Pressed),
    }
}

pub fn primary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(&PRIMARY, status)
}

pub fn secondary_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(&SECONDARY, status)
}

pub fn danger_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    styled_button(&DANGER, status)
}

/// Flat, borderless row for a history entry; the selected row is tinted.
pub fn entry_button_style(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme, status| {
        let palette = theme.palette();
        let base = if selected {
            Some(Background::Color(Color {
                a: 0.25,
                ..palette.primary
            }))
        } else {
            None
        };

        let background = match status {
            button::Status::Hovered | button::Status::Pressed => Some(Background::Color(Color {
                a: 0.15,
                ..palette.text
            })),
            _ => base,
        };

        button::Style {
            background,
            text_color: palette.text,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 4.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

pub fn window_background_style(theme: &Theme) -> container::Style {
    let palette = theme.palette();
    container::Style {
        background: Some(Background::Color(palette.background)),
        text_color: Some(palette.text),
        ..Default::default()
    }
}

pub fn notification_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.1, 0.1, 0.1, 0.92))),
        text_color: Some(Color::WHITE),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.2),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_of(style: &button::Style) -> Color {
        match style.background {
            Some(Background::Color(color)) => color,
            _ => panic!("Expected background color"),
        }
    }

    #[test]
    fn test_get_theme_dark_mode() {
        let palette = get_theme(&ThemeMode::Dark).palette();

        assert_eq!(palette.background, Color::from_rgb(0.11, 0.11, 0.12));
        assert_eq!(palette.text, Color::from_rgb(0.95, 0.95, 0.95));
    }

    #[test]
    fn test_get_theme_light_mode() {
        let palette = get_theme(&ThemeMode::Light).palette();

        assert_eq!(palette.background, Color::from_rgb(0.95, 0.95, 0.97));
        assert_eq!(palette.text, Color::from_rgb(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_primary_button_states_use_green_shades() {
        let theme = Theme::Dark;

        let active = primary_button_style(&theme, button::Status::Active);
        let hovered = primary_button_style(&theme, button::Status::Hovered);

        assert_eq!(fill_of(&active), Color::from_rgb(0.098, 0.529, 0.329));
        assert_eq!(fill_of(&hovered), Color::from_rgb(0.122, 0.655, 0.408));
        assert_eq!(active.text_color, Color::WHITE);
    }

    #[test]
    fn test_only_pressed_state_snaps() {
        let theme = Theme::Dark;

        assert!(danger_button_style(&theme, button::Status::Pressed).snap);
        assert!(!danger_button_style(&theme, button::Status::Active).snap);
    }

    #[test]
    fn test_disabled_buttons_are_gray_for_every_family() {
        let theme = Theme::Dark;

        for style in [
            primary_button_style(&theme, button::Status::Disabled),
            secondary_button_style(&theme, button::Status::Disabled),
            danger_button_style(&theme, button::Status::Disabled),
        ] {
            assert_eq!(fill_of(&style), Color::from_rgb(0.3, 0.3, 0.3));
            assert_eq!(style.text_color, Color::from_rgb(0.5, 0.5, 0.5));
        }
    }

    #[test]
    fn test_selected_entry_row_is_tinted_and_plain_row_is_not() {
        let theme = get_theme(&ThemeMode::Dark);

        let selected = entry_button_style(true)(&theme, button::Status::Active);
        let plain = entry_button_style(false)(&theme, button::Status::Active);

        assert!(selected.background.is_some());
        assert!(plain.background.is_none());
    }
}
