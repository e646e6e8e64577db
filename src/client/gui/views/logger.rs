use iced::widget::{Container, Row, Space, Text};
use iced::{Element, Length};

use crate::client::error::ClientError;
use crate::client::models::messages::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

impl LogMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into() }
    }

    /// Validation problems are the user's to fix, everything else is an error.
    pub fn from_error(err: &ClientError) -> Self {
        let level = match err {
            ClientError::ValidationError(_) | ClientError::AuthRequired => LogLevel::Warning,
            _ => LogLevel::Error,
        };
        Self { level, message: err.to_string() }
    }

    pub fn symbol(&self) -> &'static str {
        match self.level {
            LogLevel::Success => "✓",
            LogLevel::Error => "✕",
            LogLevel::Info => "i",
            LogLevel::Warning => "!",
        }
    }

    pub fn color(&self) -> iced::Color {
        match self.level {
            LogLevel::Success => iced::Color::from_rgb(0.2, 0.7, 0.4),
            LogLevel::Error => iced::Color::from_rgb(0.9, 0.25, 0.25),
            LogLevel::Info => iced::Color::from_rgb(0.2, 0.5, 0.9),
            LogLevel::Warning => iced::Color::from_rgb(0.95, 0.65, 0.0),
        }
    }
}

pub fn logger_view(messages: &[LogMessage]) -> Element<'_, Message> {
    // only the latest message is shown
    let Some(log) = messages.last() else {
        return Space::new(Length::Fill, Length::Fixed(0.0)).into();
    };
    let bg_color = log.color();
    Container::new(
        Row::new()
            .spacing(12)
            .push(Text::new(log.symbol()).size(16).style(iced::Color::WHITE))
            .push(Text::new(&log.message).size(15).style(iced::Color::WHITE)),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(move |_: &iced::Theme| {
        iced::widget::container::Appearance {
            background: Some(iced::Background::Color(bg_color)),
            text_color: Some(iced::Color::WHITE),
            border: iced::Border { radius: 8.0.into(), ..Default::default() },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 8.0,
                color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            },
        }
    })))
    .into()
}
