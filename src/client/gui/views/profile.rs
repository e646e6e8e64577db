use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{card_appearance, input_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::client::gui::views::{call, home::placeholder};
use crate::client::gui::widgets::{alert, post_card};
use crate::client::models::domain::{CallType, User};
use crate::client::models::load::LoadStatus;
use crate::client::models::messages::Message;
use crate::client::models::profile::{ProfileDraft, ProfileState};

fn stat(value: u64, label: &str) -> Column<'_, Message> {
    Column::new()
        .align_items(Alignment::Center)
        .push(Text::new(value.to_string()).font(BOLD_FONT).size(16))
        .push(Text::new(label).size(12).style(TEXT_SECONDARY))
}

fn summary(user: &User) -> Element<'_, Message> {
    let mut info = Column::new()
        .spacing(4)
        .push(Text::new(user.display_name()).size(24).font(BOLD_FONT).style(TEXT_PRIMARY))
        .push(Text::new(format!("@{}", user.username)).size(14).style(TEXT_SECONDARY));
    if let Some(bio) = user.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        info = info.push(Text::new(bio).size(14));
    }

    let stats = Row::new()
        .spacing(24)
        .push(stat(user.followers_count, "followers"))
        .push(stat(user.following_count, "following"));

    let actions = Row::new()
        .spacing(8)
        .push(Button::new(Text::new("Edit profile")).on_press(Message::EditProfile).style(iced::theme::Button::Secondary))
        .push(
            Button::new(Text::new("Video call"))
                .on_press(Message::OpenCallSetup(CallType::Video))
                .style(iced::theme::Button::Primary),
        )
        .push(
            Button::new(Text::new("Audio call"))
                .on_press(Message::OpenCallSetup(CallType::Audio))
                .style(iced::theme::Button::Primary),
        )
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(Button::new(Text::new("Log out")).on_press(Message::Logout).style(iced::theme::Button::Destructive));

    Column::new()
        .spacing(18)
        .push(
            Row::new()
                .spacing(16)
                .align_items(Alignment::Center)
                .push(info.width(Length::Fill))
                .push(post_card::avatar(user, 72.0)),
        )
        .push(stats)
        .push(actions)
        .into()
}

fn input<'a>(label: &'a str, value: &'a str, on_input: fn(String) -> Message) -> Column<'a, Message> {
    Column::new()
        .spacing(6)
        .push(Text::new(label).size(14).style(TEXT_SECONDARY))
        .push(
            Container::new(TextInput::new(label, value).on_input(on_input).padding(10).size(14))
                .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
}

fn edit_form(draft: &ProfileDraft) -> Element<'_, Message> {
    let mut save = Button::new(Text::new(if draft.saving { "Saving..." } else { "Save" }).font(BOLD_FONT))
        .style(iced::theme::Button::Primary);
    if !draft.saving {
        save = save.on_press(Message::SaveProfile);
    }

    let mut col = Column::new()
        .spacing(14)
        .push(Text::new("Edit profile").size(20).font(BOLD_FONT))
        .push(input("Name", &draft.name, Message::ProfileNameChanged))
        .push(input("Bio", &draft.bio, Message::ProfileBioChanged))
        .push(input("Avatar URL", &draft.avatar_url, Message::ProfileAvatarChanged))
        .push(
            Row::new()
                .spacing(10)
                .push(Space::new(Length::Fill, Length::Shrink))
                .push(
                    Button::new(Text::new("Cancel"))
                        .on_press(Message::CancelEditProfile)
                        .style(iced::theme::Button::Secondary),
                )
                .push(save),
        );
    if let Some(err) = alert::maybe(draft.error.as_deref()) {
        col = col.push(err);
    }
    col.into()
}

pub fn view(profile: &ProfileState) -> Element<'_, Message> {
    if let Some(call_screen) = call::view(profile.call.state()) {
        return call_screen;
    }

    let body: Element<'_, Message> = match (&profile.status, &profile.user) {
        (LoadStatus::Failed(err), _) => placeholder(
            Column::new()
                .spacing(10)
                .align_items(Alignment::Center)
                .push(alert::view(err))
                .push(Button::new(Text::new("Log out")).on_press(Message::Logout))
                .into(),
        ),
        (_, Some(user)) => match &profile.draft {
            Some(draft) => edit_form(draft),
            None => summary(user),
        },
        _ => placeholder(Text::new("Loading profile...").size(15).style(TEXT_SECONDARY).into()),
    };

    Container::new(
        Container::new(body)
            .padding(20)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
    )
    .padding(16)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
