use chrono::Utc;
use iced::widget::{Button, Column, Container, Row, Scrollable, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{header_appearance, input_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::client::gui::views::home::placeholder;
use crate::client::gui::widgets::post_card;
use crate::client::models::domain::User;
use crate::client::models::load::LoadStatus;
use crate::client::models::messages::Message;
use crate::client::models::search::SearchState;

fn follow_button<'a>(user_id: i64, search: &SearchState) -> Button<'a, Message> {
    let following = search.is_following(user_id);
    let btn = Button::new(Text::new(if following { "Following" } else { "Follow" }).size(13))
        .padding([6, 14])
        .style(if following { iced::theme::Button::Secondary } else { iced::theme::Button::Primary });
    if search.is_follow_pending(user_id) {
        btn
    } else {
        btn.on_press(Message::ToggleFollow(user_id))
    }
}

fn user_row<'a>(user: &User, search: &SearchState, viewer_id: Option<i64>) -> Element<'a, Message> {
    let mut info = Column::new()
        .spacing(2)
        .push(Text::new(user.display_name().to_string()).font(BOLD_FONT).size(15).style(TEXT_PRIMARY))
        .push(Text::new(format!("@{}", user.username)).size(13).style(TEXT_SECONDARY));
    if let Some(bio) = user.bio.as_ref().filter(|b| !b.trim().is_empty()) {
        info = info.push(Text::new(bio.clone()).size(13));
    }
    let mut row = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(post_card::avatar(user, 36.0))
        .push(info)
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(Text::new(format!("{} followers", user.followers_count)).size(12).style(TEXT_SECONDARY));
    // no follow button on your own row
    if viewer_id != Some(user.id) {
        row = row.push(follow_button(user.id, search));
    }
    Container::new(row).padding([10, 16]).width(Length::Fill).into()
}

fn section_title(title: &str) -> Element<'_, Message> {
    Container::new(Text::new(title).size(14).font(BOLD_FONT).style(TEXT_SECONDARY))
        .padding([12, 16, 4, 16])
        .into()
}

pub fn view<'a>(search: &'a SearchState, viewer: Option<&User>) -> Element<'a, Message> {
    let viewer_id = viewer.map(|u| u.id);
    let input = Container::new(
        Container::new(
            TextInput::new("Search", &search.query)
                .on_input(Message::SearchQueryChanged)
                .padding(12)
                .size(15)
                .width(Length::Fill),
        )
        .style(iced::theme::Container::Custom(Box::new(input_appearance))),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(header_appearance)));

    let body: Element<'a, Message> = match &search.status {
        LoadStatus::Idle => placeholder(Text::new("Search for people and posts").size(15).style(TEXT_SECONDARY).into()),
        LoadStatus::Loading => placeholder(Text::new("Searching...").size(15).style(TEXT_SECONDARY).into()),
        LoadStatus::Failed(err) => placeholder(Text::new(err.clone()).size(15).into()),
        LoadStatus::Empty => placeholder(
            Text::new(format!("No results for \"{}\"", search.query.trim())).size(15).style(TEXT_SECONDARY).into(),
        ),
        LoadStatus::Ready => {
            let now = Utc::now();
            let mut col = Column::new();
            if !search.users.is_empty() {
                col = search.users.iter().fold(col.push(section_title("People")), |c, u| {
                    c.push(user_row(u, search, viewer_id))
                });
            }
            if !search.posts.is_empty() {
                col = search
                    .posts
                    .iter()
                    .fold(col.push(section_title("Posts")), |c, p| c.push(post_card::compact(p, now)));
            }
            Scrollable::new(col).height(Length::Fill).into()
        }
    };

    Column::new().push(input).push(body).height(Length::Fill).into()
}
