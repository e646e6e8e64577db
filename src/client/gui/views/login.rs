use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Element, Length};

use crate::client::gui::style::{card_appearance, input_appearance, BOLD_FONT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::client::gui::widgets::alert;
use crate::client::models::login::LoginForm;
use crate::client::models::messages::Message;

fn field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
    secure: bool,
) -> Column<'a, Message> {
    Column::new()
        .spacing(6)
        .push(Text::new(label).size(14).style(TEXT_SECONDARY))
        .push(
            Container::new(
                TextInput::new(placeholder, value)
                    .on_input(on_input)
                    .on_submit(Message::SubmitLoginOrRegister)
                    .secure(secure)
                    .width(Length::Fill)
                    .padding(12)
                    .size(14),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
}

fn mode_tab(label: &str, active: bool) -> Button<'_, Message> {
    let text = Text::new(label).size(16).horizontal_alignment(iced::alignment::Horizontal::Center);
    let btn = Button::new(Container::new(if active { text.font(BOLD_FONT) } else { text }).width(Length::Fill).center_x())
        .width(Length::Fill)
        .padding([10, 16]);
    if active {
        btn.style(iced::theme::Button::Primary)
    } else {
        btn.on_press(Message::ToggleLoginRegister).style(iced::theme::Button::Secondary)
    }
}

pub fn view(form: &LoginForm) -> Element<'_, Message> {
    let title = Text::new("Threads")
        .size(40)
        .font(BOLD_FONT)
        .style(TEXT_PRIMARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);
    let subtitle = Text::new(if form.is_register { "Create your account" } else { "Log in to continue" })
        .size(15)
        .style(TEXT_SECONDARY);

    let tabs = Row::new()
        .spacing(2)
        .push(mode_tab("Login", !form.is_register))
        .push(mode_tab("Register", form.is_register));

    let mut fields = Column::new()
        .spacing(14)
        .push(field("Username", "Enter your username", &form.username, Message::UsernameChanged, false));
    if form.is_register {
        fields = fields
            .push(field("Name", "Your display name", &form.name, Message::NameChanged, false))
            .push(field("Email", "you@example.com", &form.email, Message::EmailChanged, false));
    }
    fields = fields.push(field(
        "Password",
        "Enter your password",
        &form.password,
        Message::PasswordChanged,
        !form.show_password,
    ));

    let show_toggle = Button::new(Text::new(if form.show_password { "Hide password" } else { "Show password" }).size(13))
        .on_press(Message::ToggleShowPassword)
        .style(iced::theme::Button::Text);

    let label = match (form.loading, form.is_register) {
        (true, _) => "Please wait...",
        (false, true) => "Create account",
        (false, false) => "Log in",
    };
    let mut submit = Button::new(
        Container::new(Text::new(label).font(BOLD_FONT).size(16)).width(Length::Fill).center_x(),
    )
    .width(Length::Fill)
    .padding([12, 16])
    .style(iced::theme::Button::Primary);
    if !form.loading {
        submit = submit.on_press(Message::SubmitLoginOrRegister);
    }

    let mut card = Column::new()
        .spacing(18)
        .align_items(Alignment::Center)
        .push(title)
        .push(subtitle)
        .push(tabs)
        .push(fields)
        .push(Row::new().push(Space::new(Length::Fill, Length::Shrink)).push(show_toggle))
        .push(submit);
    if let Some(err) = alert::maybe(form.error.as_deref()) {
        card = card.push(err);
    }

    Container::new(
        Container::new(card)
            .width(Length::Fixed(420.0))
            .padding(28)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x()
    .center_y()
    .into()
}
