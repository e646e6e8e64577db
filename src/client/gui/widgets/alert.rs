// Inline error line shown under forms and cards
use iced::widget::Text;
use iced::Element;

use crate::client::gui::style::LIKE_RED;
use crate::client::models::messages::Message;

pub fn view(msg: &str) -> Element<'_, Message> {
    Text::new(msg).size(13).style(LIKE_RED).into()
}

/// Renders nothing when there is no error.
pub fn maybe(msg: Option<&str>) -> Option<Element<'_, Message>> {
    msg.map(view)
}
