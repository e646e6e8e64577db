use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{call_appearance, card_appearance, input_appearance, BOLD_FONT, TEXT_SECONDARY};
use crate::client::models::call::{CallState, ROOM_PREFIX};
use crate::client::models::domain::CallType;
use crate::client::models::messages::Message;

fn type_button(call_type: CallType, selected: CallType) -> Button<'static, Message> {
    let label = match call_type {
        CallType::Video => "Video",
        CallType::Audio => "Audio",
    };
    let btn = Button::new(Text::new(label).size(15)).padding([8, 18]);
    if call_type == selected {
        btn.style(iced::theme::Button::Primary)
    } else {
        btn.on_press(Message::CallTypeSelected(call_type)).style(iced::theme::Button::Secondary)
    }
}

fn initiation<'a>(room_input: &'a str, call_type: CallType) -> Element<'a, Message> {
    let form = Column::new()
        .spacing(16)
        .push(Text::new("Start a call").size(22).font(BOLD_FONT))
        .push(
            Column::new()
                .spacing(6)
                .push(Text::new("Room name").size(14).style(TEXT_SECONDARY))
                .push(
                    Container::new(
                        TextInput::new(&format!("Leave blank for {}…", ROOM_PREFIX), room_input)
                            .on_input(Message::CallRoomChanged)
                            .on_submit(Message::StartCall)
                            .padding(12)
                            .size(14),
                    )
                    .style(iced::theme::Container::Custom(Box::new(input_appearance))),
                ),
        )
        .push(
            Row::new()
                .spacing(8)
                .push(type_button(CallType::Video, call_type))
                .push(type_button(CallType::Audio, call_type)),
        )
        .push(
            Row::new()
                .spacing(10)
                .push(Space::new(Length::Fill, Length::Shrink))
                .push(
                    Button::new(Text::new("Cancel"))
                        .on_press(Message::CancelCallSetup)
                        .style(iced::theme::Button::Secondary),
                )
                .push(
                    Button::new(Text::new("Start call").font(BOLD_FONT))
                        .on_press(Message::StartCall)
                        .style(iced::theme::Button::Primary),
                ),
        );

    Container::new(
        Container::new(form)
            .width(Length::Fixed(440.0))
            .padding(24)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .into()
}

fn active<'a>(room: &'a str, call_type: CallType, join_url: &'a str, participants: &[String]) -> Element<'a, Message> {
    let white = iced::Color::WHITE;
    let mut col = Column::new()
        .spacing(14)
        .align_items(Alignment::Center)
        .push(Text::new(format!("{} call", call_type)).size(16).style(white))
        .push(Text::new(room).size(26).font(BOLD_FONT).style(white));
    // browser-launched meetings never report who joined
    if participants.is_empty() {
        col = col.push(Text::new("The meeting runs in your browser").size(14).style(white));
    } else {
        let count = participants.len() + 1;
        col = col.push(Text::new(format!("{} participants", count)).size(14).style(white));
        for name in participants {
            col = col.push(Text::new(name.clone()).size(13).style(white));
        }
    }
    col = col
        .push(Text::new(join_url).size(11).style(iced::Color::from_rgb(0.6, 0.6, 0.65)))
        .push(
            Row::new()
                .spacing(12)
                .push(
                    Button::new(Text::new("Copy link"))
                        .on_press(Message::CopyCallLink)
                        .style(iced::theme::Button::Secondary),
                )
                .push(
                    Button::new(Text::new("End call").font(BOLD_FONT))
                        .on_press(Message::EndCall)
                        .style(iced::theme::Button::Destructive),
                ),
        );

    Container::new(col)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(call_appearance)))
        .into()
}

/// Full-screen call UI; `None` while no call is being set up or running.
pub fn view(state: &CallState) -> Option<Element<'_, Message>> {
    match state {
        CallState::Idle => None,
        CallState::Initiating { room_input, call_type } => Some(initiation(room_input, *call_type)),
        CallState::Active { call, handle, participants } => {
            Some(active(&call.room_name, call.call_type, &handle.join_url, participants))
        }
    }
}
