use chrono::Utc;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{header_appearance, BOLD_FONT, TEXT_SECONDARY};
use crate::client::gui::widgets::{alert, post_card};
use crate::client::models::feed::{FeedState, FeedTab};
use crate::client::models::load::LoadStatus;
use crate::client::models::messages::Message;

/// Centered single line used for loading / empty / error placeholders.
pub fn placeholder<'a>(content: Element<'a, Message>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .padding(32)
        .center_x()
        .into()
}

fn feed_tabs(active: FeedTab) -> Row<'static, Message> {
    FeedTab::all().iter().fold(Row::new().spacing(4), |row, tab| {
        let text = Text::new(tab.to_string()).size(15);
        let btn = if *tab == active {
            Button::new(text.font(BOLD_FONT)).style(iced::theme::Button::Primary)
        } else {
            Button::new(text)
                .on_press(Message::FeedTabSelected(*tab))
                .style(iced::theme::Button::Text)
        };
        row.push(btn.padding([6, 14]))
    })
}

pub fn view(feed: &FeedState) -> Element<'_, Message> {
    let header = Container::new(
        Row::new()
            .align_items(Alignment::Center)
            .push(Text::new("Threads").size(24).font(BOLD_FONT))
            .push(Space::new(Length::Fill, Length::Shrink))
            .push(feed_tabs(feed.tab))
            .push(Space::new(Length::Fixed(12.0), Length::Shrink))
            .push(
                Button::new(Text::new("Refresh").size(14))
                    .on_press(Message::RefreshFeed)
                    .style(iced::theme::Button::Secondary),
            ),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(header_appearance)));

    let body: Element<'_, Message> = match &feed.status {
        LoadStatus::Idle | LoadStatus::Loading => {
            placeholder(Text::new("Loading posts...").size(15).style(TEXT_SECONDARY).into())
        }
        LoadStatus::Failed(err) => placeholder(
            Column::new()
                .spacing(10)
                .align_items(Alignment::Center)
                .push(alert::view(err))
                .push(Button::new(Text::new("Try again")).on_press(Message::RefreshFeed))
                .into(),
        ),
        LoadStatus::Empty => placeholder(Text::new("No posts yet").size(15).style(TEXT_SECONDARY).into()),
        LoadStatus::Ready => {
            let now = Utc::now();
            let list = feed
                .cards
                .iter()
                .fold(Column::new(), |col, card| col.push(post_card::view(card, now)));
            Scrollable::new(list).height(Length::Fill).into()
        }
    };

    Column::new().push(header).push(body).height(Length::Fill).into()
}
