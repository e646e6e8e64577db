use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{card_appearance, input_appearance, BOLD_FONT, LIKE_RED, TEXT_SECONDARY};
use crate::client::gui::widgets::{alert, post_card};
use crate::client::models::composer::ComposerState;
use crate::client::models::domain::User;
use crate::client::models::messages::Message;

pub fn view<'a>(composer: &'a ComposerState, author: Option<&User>) -> Element<'a, Message> {
    let who: Element<'a, Message> = match author {
        Some(user) => Row::new()
            .spacing(10)
            .align_items(Alignment::Center)
            .push(post_card::avatar(user, 36.0))
            .push(Text::new(format!("@{}", user.username)).font(BOLD_FONT).size(15))
            .into(),
        None => Space::new(Length::Shrink, Length::Shrink).into(),
    };

    let counter_color = if composer.over_limit() { LIKE_RED } else { TEXT_SECONDARY };
    let label = if composer.submitting { "Posting..." } else { "Post" };
    let mut post_btn = Button::new(Text::new(label).font(BOLD_FONT)).padding([8, 20]).style(iced::theme::Button::Primary);
    if composer.can_submit() {
        post_btn = post_btn.on_press(Message::SubmitPost);
    }

    let mut col = Column::new()
        .spacing(14)
        .push(Text::new("New thread").size(22).font(BOLD_FONT))
        .push(who)
        .push(
            Container::new(
                TextInput::new("Start a thread...", &composer.content)
                    .on_input(Message::ComposerChanged)
                    .on_submit(Message::SubmitPost)
                    .padding(12)
                    .size(15),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
        .push(
            Row::new()
                .align_items(Alignment::Center)
                .push(Text::new(composer.counter_label()).size(13).style(counter_color))
                .push(Space::new(Length::Fill, Length::Shrink))
                .push(post_btn),
        );
    if let Some(err) = alert::maybe(composer.error.as_deref()) {
        col = col.push(err);
    }

    Container::new(
        Container::new(col)
            .padding(20)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
