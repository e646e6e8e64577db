// Shared palette and container appearances for every screen
use iced::widget::container::Appearance;
use iced::{Background, Border, Color, Font, Shadow, Vector};

pub const BG_MAIN: Color = Color::from_rgb(0.98, 0.98, 0.98);
pub const CARD_BG: Color = Color::WHITE;
pub const INPUT_BG: Color = Color::from_rgb(0.95, 0.95, 0.96);
pub const DIVIDER: Color = Color::from_rgb(0.9, 0.9, 0.9);
pub const TEXT_PRIMARY: Color = Color::BLACK;
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.45, 0.45, 0.5);
pub const LIKE_RED: Color = Color::from_rgb(0.94, 0.27, 0.27);
pub const ACCENT: Color = Color::from_rgb(0.0, 0.45, 0.9);
pub const CALL_BG: Color = Color::from_rgb(0.05, 0.05, 0.07);

pub const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

pub fn bg_main_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn card_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: Border { width: 1.0, color: DIVIDER, radius: 12.0.into() },
        shadow: Shadow {
            offset: Vector::new(0.0, 2.0),
            blur_radius: 6.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
        },
    }
}

pub fn post_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: Border { width: 0.0, color: DIVIDER, radius: 0.0.into() },
        ..Default::default()
    }
}

pub fn input_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: Border { width: 1.0, color: DIVIDER, radius: 10.0.into() },
        ..Default::default()
    }
}

pub fn header_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: Border { width: 1.0, color: DIVIDER, radius: 0.0.into() },
        ..Default::default()
    }
}

pub fn call_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(CALL_BG)),
        text_color: Some(Color::WHITE),
        ..Default::default()
    }
}

pub fn avatar_appearance(_: &iced::Theme) -> Appearance {
    Appearance {
        background: Some(Background::Color(DIVIDER)),
        text_color: Some(TEXT_PRIMARY),
        border: Border { width: 0.0, color: Color::TRANSPARENT, radius: 20.0.into() },
        ..Default::default()
    }
}
