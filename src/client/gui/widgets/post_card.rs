use chrono::{DateTime, Utc};
use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{
    avatar_appearance, input_appearance, post_appearance, BOLD_FONT, DIVIDER, LIKE_RED, TEXT_PRIMARY,
    TEXT_SECONDARY,
};
use crate::client::gui::widgets::alert;
use crate::client::models::domain::{Post, Reply, User};
use crate::client::models::messages::Message;
use crate::client::models::post_card::PostCardState;

pub fn avatar<'a>(user: &User, size: f32) -> Element<'a, Message> {
    Container::new(Text::new(user.initial()).font(BOLD_FONT).size(size * 0.45))
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(avatar_appearance)))
        .into()
}

fn header<'a>(post: &Post, now: DateTime<Utc>) -> Row<'a, Message> {
    Row::new()
        .spacing(6)
        .align_items(Alignment::Center)
        .push(Text::new(post.author.display_name().to_string()).font(BOLD_FONT).size(15).style(TEXT_PRIMARY))
        .push(Text::new(format!("@{}", post.author.username)).size(13).style(TEXT_SECONDARY))
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(Text::new(post.timestamp_label(now)).size(13).style(TEXT_SECONDARY))
}

fn body<'a>(post: &Post) -> Column<'a, Message> {
    let mut col = Column::new()
        .spacing(6)
        .push(Text::new(post.content.text().to_string()).size(15).style(TEXT_PRIMARY));
    if let Some(att) = post.content.attachment() {
        let kind = att.kind.clone().unwrap_or_else(|| "attachment".to_string());
        col = col.push(Text::new(format!("[{}] {}", kind, att.url)).size(12).style(TEXT_SECONDARY));
    }
    col
}

fn reply_row<'a>(reply: &Reply) -> Element<'a, Message> {
    let who = reply
        .user
        .as_ref()
        .map(|u| format!("@{}", u.username))
        .unwrap_or_else(|| "someone".to_string());
    Row::new()
        .spacing(6)
        .push(Text::new(who).size(13).font(BOLD_FONT).style(TEXT_SECONDARY))
        .push(Text::new(reply.content.clone()).size(13).style(TEXT_PRIMARY))
        .into()
}

/// Interactive card used by the home feed.
pub fn view<'a>(card: &'a PostCardState, now: DateTime<Utc>) -> Element<'a, Message> {
    let id = card.id();
    let heart = if card.liked { "♥" } else { "♡" };
    let like_color = if card.liked { LIKE_RED } else { TEXT_SECONDARY };

    let mut like_btn = Button::new(
        Text::new(format!("{} {}", heart, card.likes_count)).size(14).style(like_color),
    )
    .style(iced::theme::Button::Text)
    .padding([4, 8]);
    if card.like_in_flight.is_none() {
        like_btn = like_btn.on_press(Message::ToggleLike(id));
    }

    let reply_btn = Button::new(Text::new(format!("↩ {}", card.replies_count)).size(14).style(TEXT_SECONDARY))
        .on_press(Message::ToggleReplyDraft(id))
        .style(iced::theme::Button::Text)
        .padding([4, 8]);

    let actions = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(like_btn)
        .push(reply_btn)
        .push(Text::new(format!("⟳ {}", card.post.reposts)).size(14).style(TEXT_SECONDARY))
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(
            Button::new(Text::new("View replies").size(13))
                .on_press(Message::ShowReplies(id))
                .style(iced::theme::Button::Text),
        );

    let mut content = Column::new()
        .spacing(8)
        .width(Length::Fill)
        .push(header(&card.post, now))
        .push(body(&card.post))
        .push(actions);

    if card.reply_draft_visible {
        let submit = if card.reply_submitting {
            Button::new(Text::new("Sending...").size(13)).style(iced::theme::Button::Secondary)
        } else {
            Button::new(Text::new("Reply").size(13))
                .on_press(Message::SubmitReply(id))
                .style(iced::theme::Button::Primary)
        };
        content = content.push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(
                    Container::new(
                        TextInput::new("Write a reply...", &card.reply_draft)
                            .on_input(move |s| Message::ReplyDraftChanged(id, s))
                            .on_submit(Message::SubmitReply(id))
                            .padding(8)
                            .size(14),
                    )
                    .width(Length::Fill)
                    .style(iced::theme::Container::Custom(Box::new(input_appearance))),
                )
                .push(submit),
        );
    }

    if let Some(replies) = &card.replies {
        if replies.is_empty() {
            content = content.push(Text::new("No replies yet").size(13).style(TEXT_SECONDARY));
        } else {
            content = replies.iter().fold(content, |col, r| col.push(reply_row(r)));
        }
    }

    if let Some(err) = alert::maybe(card.error.as_deref()) {
        content = content.push(err);
    }

    frame(&card.post.author, content)
}

/// Read-only card used in search results.
pub fn compact<'a>(post: &Post, now: DateTime<Utc>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(6)
        .width(Length::Fill)
        .push(header(post, now))
        .push(body(post))
        .push(
            Text::new(format!("♡ {}   ↩ {}", post.likes_count, post.replies_count))
                .size(13)
                .style(TEXT_SECONDARY),
        );
    frame(&post.author, content)
}

fn frame<'a>(author: &User, content: Column<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .push(
            Container::new(
                Row::new()
                    .spacing(12)
                    .push(avatar(author, 40.0))
                    .push(content),
            )
            .padding([12, 16])
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(post_appearance))),
        )
        .push(
            Container::new(Space::new(Length::Fill, Length::Fixed(1.0)))
                .style(iced::theme::Container::Custom(Box::new(|_: &iced::Theme| {
                    iced::widget::container::Appearance {
                        background: Some(iced::Background::Color(DIVIDER)),
                        ..Default::default()
                    }
                }))),
        )
        .into()
}
