use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Background, Color, Element, Length, Theme};

use super::app_theme;
use crate::core::models::{KeyChord, KeybindingAction, ThemeMode, UserSettings};

#[derive(Debug, Clone)]
pub enum SettingsViewMessage {
    IntervalChanged(String),
    HistorySizeChanged(String),
    PreviewSizeChanged(String),
    DeleteEnabledToggled(bool),
    KeybindingsToggled(bool),
    HotkeyChanged(KeybindingAction, String),
    ThemeChanged(ThemeMode),
    OpenSettingsFile,
    Save,
}

/// Editable copy of the settings. Numeric fields keep the raw text so a
/// half-typed value does not overwrite the last valid one.
pub struct SettingsView {
    draft: UserSettings,
    interval_input: String,
    history_size_input: String,
    preview_size_input: String,
}

impl SettingsView {
    pub fn new(settings: &UserSettings) -> Self {
        Self {
            draft: settings.clone(),
            interval_input: settings.interval.to_string(),
            history_size_input: settings.history_size.to_string(),
            preview_size_input: settings.preview_size.to_string(),
        }
    }

    /// Applies an edit. Returns the settings to commit when the user saves.
    pub fn handle_message(&mut self, message: SettingsViewMessage) -> Option<UserSettings> {
        match message {
            SettingsViewMessage::IntervalChanged(value) => {
                if let Ok(interval) = value.trim().parse() {
                    self.draft.interval = interval;
                }
                self.interval_input = value;
            }
            SettingsViewMessage::HistorySizeChanged(value) => {
                if let Ok(size) = value.trim().parse() {
                    self.draft.history_size = size;
                }
                self.history_size_input = value;
            }
            SettingsViewMessage::PreviewSizeChanged(value) => {
                if let Ok(size) = value.trim().parse() {
                    self.draft.preview_size = size;
                }
                self.preview_size_input = value;
            }
            SettingsViewMessage::DeleteEnabledToggled(enabled) => {
                self.draft.delete_enabled = enabled;
            }
            SettingsViewMessage::KeybindingsToggled(enabled) => {
                self.draft.enable_keybinding = enabled;
            }
            SettingsViewMessage::HotkeyChanged(action, hotkey) => {
                self.draft.keybindings.set_hotkey(action, hotkey);
            }
            SettingsViewMessage::ThemeChanged(theme_mode) => {
                self.draft.theme_mode = theme_mode;
            }
            SettingsViewMessage::OpenSettingsFile => {}
            SettingsViewMessage::Save => return Some(self.draft.clone().sanitized()),
        }
        None
    }

    pub fn draft(&self) -> &UserSettings {
        &self.draft
    }

    pub fn render_ui(&self, theme: &Theme) -> Element<'_, SettingsViewMessage> {
        let history_section = render_section(
            "History",
            column![
                render_setting_row(
                    "Poll interval (ms)",
                    "How often the clipboard is checked",
                    text_input("1000", &self.interval_input)
                        .on_input(SettingsViewMessage::IntervalChanged)
                        .padding(8)
                        .into(),
                ),
                render_setting_row(
                    "History size",
                    "Oldest entries are dropped beyond this",
                    text_input("15", &self.history_size_input)
                        .on_input(SettingsViewMessage::HistorySizeChanged)
                        .padding(8)
                        .into(),
                ),
                render_setting_row(
                    "Preview size",
                    "Characters shown per entry",
                    text_input("50", &self.preview_size_input)
                        .on_input(SettingsViewMessage::PreviewSizeChanged)
                        .padding(8)
                        .into(),
                ),
                render_toggle(
                    self.draft.delete_enabled,
                    "Show delete buttons",
                    SettingsViewMessage::DeleteEnabledToggled,
                ),
            ]
            .spacing(10),
        );

        let hotkey_rows = KeybindingAction::ALL.iter().fold(
            column![render_toggle(
                self.draft.enable_keybinding,
                "Enable keyboard shortcuts",
                SettingsViewMessage::KeybindingsToggled,
            )]
            .spacing(10),
            |rows, action| rows.push(self.render_hotkey_row(*action)),
        );
        let keyboard_section = render_section("Keyboard", hotkey_rows);

        let appearance_section = render_section(
            "Appearance",
            column![render_setting_row(
                "Theme",
                "Light or dark windows",
                pick_list(
                    vec![ThemeMode::Dark, ThemeMode::Light],
                    Some(self.draft.theme_mode.clone()),
                    SettingsViewMessage::ThemeChanged,
                )
                .padding(8)
                .into(),
            )],
        );

        let save_btn = button(text("Save").size(15))
            .padding([10, 32])
            .style(app_theme::primary_button_style)
            .on_press(SettingsViewMessage::Save);

        let open_file_btn = button(text("Edit settings file").size(13))
            .padding([10, 20])
            .style(app_theme::secondary_button_style)
            .on_press(SettingsViewMessage::OpenSettingsFile);

        let content = column![
            history_section,
            keyboard_section,
            appearance_section,
            Space::new().height(Length::Fixed(8.0)),
            row![open_file_btn, save_btn].spacing(12),
        ]
        .spacing(16)
        .padding(24)
        .width(Length::Fill)
        .align_x(Alignment::Center);

        let palette_theme = theme.clone();
        container(iced::widget::scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| app_theme::window_background_style(&palette_theme))
            .into()
    }

    fn render_hotkey_row(&self, action: KeybindingAction) -> Element<'_, SettingsViewMessage> {
        let hotkey = self.draft.keybindings.hotkey_for(action);
        let input = text_input("Ctrl+F12", hotkey)
            .on_input(move |value| SettingsViewMessage::HotkeyChanged(action, value))
            .padding(8);

        let input: Element<'_, SettingsViewMessage> = if KeyChord::parse(hotkey).is_ok() {
            input.into()
        } else {
            column![
                input,
                text("Not a valid shortcut")
                    .size(11)
                    .style(|_theme: &Theme| iced::widget::text::Style {
                        color: Some(Color::from_rgba(1.0, 0.5, 0.3, 0.9)),
                    }),
            ]
            .spacing(4)
            .into()
        };

        render_setting_row(hotkey_title(action), action.setting_key(), input)
    }
}

fn hotkey_title(action: KeybindingAction) -> &'static str {
    match action {
        KeybindingAction::ClearHistory => "Clear history",
        KeybindingAction::PreviousEntry => "Previous entry",
        KeybindingAction::NextEntry => "Next entry",
        KeybindingAction::ToggleMenu => "Toggle menu",
    }
}

fn render_toggle<'a>(
    checked: bool,
    label: &'a str,
    on_toggle: fn(bool) -> SettingsViewMessage,
) -> Element<'a, SettingsViewMessage> {
    row![checkbox(checked).on_toggle(on_toggle), text(label).size(14)]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
}

fn render_section<'a>(
    title: &'a str,
    content: iced::widget::Column<'a, SettingsViewMessage>,
) -> Element<'a, SettingsViewMessage> {
    let section_content = container(content)
        .padding([12, 16])
        .width(Length::Fill)
        .style(|_theme| iced::widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.12))),
            border: iced::Border {
                color: Color::from_rgba(0.5, 0.5, 0.5, 0.3),
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        });

    column![text(title).size(16), section_content]
        .spacing(8)
        .width(Length::Fill)
        .into()
}

fn render_setting_row<'a>(
    label: &'a str,
    description: &'a str,
    input: Element<'a, SettingsViewMessage>,
) -> Element<'a, SettingsViewMessage> {
    let label_col = column![
        text(label).size(14),
        text(description)
            .size(11)
            .style(|_theme: &Theme| iced::widget::text::Style {
                color: Some(Color::from_rgba(0.6, 0.6, 0.6, 1.0)),
            }),
    ]
    .spacing(2)
    .width(Length::FillPortion(2));

    row![label_col, container(input).width(Length::FillPortion(3))]
        .spacing(16)
        .align_y(Alignment::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_returns_edited_settings() {
        let mut view = SettingsView::new(&UserSettings::default());

        view.handle_message(SettingsViewMessage::HistorySizeChanged("30".to_string()));
        view.handle_message(SettingsViewMessage::DeleteEnabledToggled(false));
        let saved = view.handle_message(SettingsViewMessage::Save).unwrap();

        assert_eq!(saved.history_size, 30);
        assert!(!saved.delete_enabled);
    }

    #[test]
    fn test_edits_without_save_commit_nothing() {
        let mut view = SettingsView::new(&UserSettings::default());

        let result = view.handle_message(SettingsViewMessage::IntervalChanged("500".to_string()));

        assert!(result.is_none());
        assert_eq!(view.draft().interval, 500);
    }

    #[test]
    fn test_unparseable_number_keeps_last_valid_value() {
        let mut view = SettingsView::new(&UserSettings::default());

        view.handle_message(SettingsViewMessage::PreviewSizeChanged("4".to_string()));
        view.handle_message(SettingsViewMessage::PreviewSizeChanged("4x".to_string()));

        assert_eq!(view.draft().preview_size, 4);
        assert_eq!(view.preview_size_input, "4x");
    }

    #[test]
    fn test_saved_values_are_clamped() {
        let mut view = SettingsView::new(&UserSettings::default());

        view.handle_message(SettingsViewMessage::IntervalChanged("5".to_string()));
        view.handle_message(SettingsViewMessage::HistorySizeChanged("0".to_string()));
        let saved = view.handle_message(SettingsViewMessage::Save).unwrap();

        assert_eq!(saved.interval, 100);
        assert_eq!(saved.history_size, 1);
    }

    #[test]
    fn test_hotkey_edit_updates_matching_action() {
        let mut view = SettingsView::new(&UserSettings::default());

        view.handle_message(SettingsViewMessage::HotkeyChanged(
            KeybindingAction::ToggleMenu,
            "Super+V".to_string(),
        ));

        assert_eq!(view.draft().keybindings.toggle_menu, "Super+V");
        assert_eq!(view.draft().keybindings.next_entry, "Ctrl+F12");
    }
}
