// src/ui/mod.rs

use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Alignment, Color, Element, Length};

use crate::component::EventCalendar;
use crate::messages::Message;
use crate::models::palette::hex_to_rgb;

pub mod calendar;
pub mod form;
pub mod list;
pub mod styles;

use styles::{
    BannerStyle, GhostStyle, PrimaryButtonStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT,
};

/// Render color for a stored `#rrggbb` value.
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::from_rgb(r, g, b))
        .unwrap_or(fallback)
}

pub fn primary_button(label: &str, on_press: Option<Message>) -> iced::widget::Button<'_, Message> {
    button(text(label).size(14))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
        .on_press_maybe(on_press)
}

// --- COMPONENT VIEWS ---

pub fn header(calendar: &EventCalendar) -> Element<'_, Message> {
    let enabled = !calendar.is_loading();
    let toggle = button(text(calendar.view_mode().toggle_label()).size(14))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
        .on_press_maybe(enabled.then_some(Message::ToggleView));

    row![
        text("Event Calendar")
            .size(26)
            .style(iced::theme::Text::Color(ZEN_ACCENT)),
        horizontal_space(),
        toggle,
        primary_button("Add Event", enabled.then_some(Message::AddEvent)),
    ]
    .spacing(12)
    .align_items(Alignment::Center)
    .into()
}

pub fn error_banner(message: &str) -> Element<'_, Message> {
    container(
        row![
            text(message).size(14),
            horizontal_space(),
            button(text("×").size(16))
                .padding([0, 8])
                .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
                .on_press(Message::DismissError),
        ]
        .align_items(Alignment::Center),
    )
    .padding([8, 12])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(BannerStyle)))
    .into()
}

pub fn footer(calendar: &EventCalendar) -> Element<'_, Message> {
    let status = if calendar.is_loading() { "Working..." } else { "Ready" };
    row![
        text(format!("Storage: {}", calendar.backend_name()))
            .size(11)
            .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
        horizontal_space(),
        text(status).size(11).style(iced::theme::Text::Color(ZEN_TEXT)),
    ]
    .into()
}

// Helper for section headers
pub fn section_header(label: &str) -> Element<'_, Message> {
    text(label)
        .size(20)
        .style(iced::theme::Text::Color(ZEN_ACCENT))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_fallback() {
        let color = hex_color("#ff0000", Color::BLACK);
        assert_eq!(color, Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(hex_color("red", Color::BLACK), Color::BLACK);
    }
}
