use iced::widget::{container, text};
use iced::{Element, Length};

use super::app_theme;

pub fn render_notification<'a, Message: 'a>(notification_text: &'a str) -> Element<'a, Message> {
    container(text(notification_text).size(14))
        .padding([10, 16])
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y(Length::Fill)
        .style(app_theme::notification_style)
        .into()
}
