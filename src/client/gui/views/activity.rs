use chrono::Utc;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{header_appearance, post_appearance, ACCENT, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::client::gui::views::home::placeholder;
use crate::client::gui::widgets::alert;
use crate::client::models::activity::ActivityState;
use crate::client::models::domain::{relative_label, Notification};
use crate::client::models::load::LoadStatus;
use crate::client::models::messages::Message;

fn kind_symbol(kind: &str) -> &'static str {
    match kind {
        "like" => "♥",
        "follow" => "+",
        "reply" => "↩",
        _ => "•",
    }
}

fn notification_row<'a>(n: &Notification, now: chrono::DateTime<Utc>) -> Element<'a, Message> {
    let when = n.created_at.as_deref().map(|t| relative_label(t, now)).unwrap_or_default();
    let text_color = if n.is_read { TEXT_SECONDARY } else { TEXT_PRIMARY };
    let mut row = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(Text::new(kind_symbol(&n.kind)).size(18).style(ACCENT))
        .push(Text::new(n.message.clone()).size(15).style(text_color).width(Length::Fill))
        .push(Text::new(when).size(12).style(TEXT_SECONDARY));
    if !n.is_read {
        row = row.push(
            Button::new(Text::new("Mark read").size(12))
                .on_press(Message::MarkNotificationRead(n.id))
                .style(iced::theme::Button::Text),
        );
    }
    Container::new(row)
        .padding([12, 16])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(post_appearance)))
        .into()
}

pub fn view(activity: &ActivityState) -> Element<'_, Message> {
    let unread = activity.unread_count();
    let header = Container::new(
        Row::new()
            .align_items(Alignment::Center)
            .push(Text::new("Activity").size(24).font(BOLD_FONT))
            .push(Space::new(Length::Fill, Length::Shrink))
            .push(Text::new(if unread > 0 { format!("{} unread", unread) } else { String::new() }).size(13).style(TEXT_SECONDARY)),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(header_appearance)));

    let body: Element<'_, Message> = match &activity.status {
        LoadStatus::Idle | LoadStatus::Loading => {
            placeholder(Text::new("Loading activity...").size(15).style(TEXT_SECONDARY).into())
        }
        LoadStatus::Failed(err) => placeholder(alert::view(err)),
        LoadStatus::Empty => placeholder(Text::new("No activity yet").size(15).style(TEXT_SECONDARY).into()),
        LoadStatus::Ready => {
            let now = Utc::now();
            let list = activity
                .notifications
                .iter()
                .fold(Column::new(), |col, n| col.push(notification_row(n, now)));
            Scrollable::new(list).height(Length::Fill).into()
        }
    };

    Column::new().push(header).push(body).height(Length::Fill).into()
}
