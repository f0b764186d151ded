use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length, Theme};

use super::app_theme;
use crate::core::models::EntryId;
use crate::core::orchestrators::ClipboardIndicator;

#[derive(Debug, Clone)]
pub enum HistoryViewMessage {
    Select(EntryId),
    Remove(EntryId),
    ClearHistory,
    OpenSettings,
}

/// One line of the history menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: EntryId,
    pub label: String,
    pub selected: bool,
    pub deletable: bool,
}

/// Snapshot of what the history menu shows, oldest entry first.
pub struct HistoryView {
    rows: Vec<HistoryRow>,
}

impl HistoryView {
    pub fn from_indicator(indicator: &ClipboardIndicator) -> Self {
        let delete_enabled = indicator.settings().delete_enabled;

        let rows = indicator
            .list()
            .iter()
            .map(|entry| HistoryRow {
                id: entry.id(),
                label: indicator.entry_label(entry),
                selected: entry.selected,
                deletable: delete_enabled && !entry.selected,
            })
            .collect();

        Self { rows }
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn render_ui(self, theme: &Theme) -> Element<'static, HistoryViewMessage> {
        let entries: Element<'static, HistoryViewMessage> = if self.rows.is_empty() {
            container(text("History is empty").size(13))
                .padding(12)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .into()
        } else {
            let list = self.rows.into_iter().fold(column![].spacing(2), |list, row| {
                list.push(render_row(row))
            });
            scrollable(list).height(Length::Fill).into()
        };

        let actions = row![
            button(text("Clear History").size(13))
                .padding([8, 16])
                .style(app_theme::danger_button_style)
                .on_press(HistoryViewMessage::ClearHistory),
            Space::new().width(Length::Fill),
            button(text("Settings").size(13))
                .padding([8, 16])
                .style(app_theme::secondary_button_style)
                .on_press(HistoryViewMessage::OpenSettings),
        ]
        .align_y(Alignment::Center);

        let palette_theme = theme.clone();
        container(column![entries, actions].spacing(10).padding(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| app_theme::window_background_style(&palette_theme))
            .into()
    }
}

fn render_row(history_row: HistoryRow) -> Element<'static, HistoryViewMessage> {
    let marker = if history_row.selected { "●" } else { " " };

    let entry_button = button(
        row![text(marker).size(12).width(Length::Fixed(16.0)), text(history_row.label).size(13)]
            .spacing(6)
            .align_y(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([6, 8])
    .style(app_theme::entry_button_style(history_row.selected))
    .on_press(HistoryViewMessage::Select(history_row.id));

    let mut line = row![entry_button].spacing(4).align_y(Alignment::Center);

    if history_row.deletable {
        line = line.push(
            button(text("✕").size(12))
                .padding([4, 8])
                .style(app_theme::secondary_button_style)
                .on_press(HistoryViewMessage::Remove(history_row.id)),
        );
    }

    line.into()
}
