use iced::widget::Container;
use iced::{Element, Length};
use iced_aw::{TabBar, TabLabel};

use crate::client::gui::style::header_appearance;
use crate::client::models::messages::Message;
use crate::client::models::screen::Tab;

fn label(tab: Tab, unread: usize) -> String {
    match tab {
        Tab::Activity if unread > 0 => format!("{} ({})", tab, unread),
        _ => tab.to_string(),
    }
}

/// Five-tab bar at the bottom of every logged-in screen.
pub fn view(active: Tab, unread: usize) -> Element<'static, Message> {
    let bar = Tab::all()
        .iter()
        .fold(TabBar::new(Message::TabSelected), |bar, tab| {
            bar.push(*tab, TabLabel::Text(label(*tab, unread)))
        })
        .set_active_tab(&active);

    Container::new(bar)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(header_appearance)))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_label_shows_unread_count() {
        assert_eq!(label(Tab::Activity, 3), "Activity (3)");
        assert_eq!(label(Tab::Activity, 0), "Activity");
        assert_eq!(label(Tab::Home, 5), "Home");
    }
}
