// src/ui/form.rs

use iced::widget::{button, column, container, horizontal_space, row, text, text_input, Row};
use iced::{Alignment, Element, Length};

use crate::component::EventCalendar;
use crate::messages::Message;
use crate::models::SWATCHES;
use crate::ui::styles::{
    CardStyle, DestructiveButtonStyle, GhostStyle, InputStyle, SwatchStyle, ZEN_ACCENT,
    ZEN_SUBTEXT,
};
use crate::ui::{hex_color, primary_button, section_header};

const DATE_PLACEHOLDER: &str = "YYYY-MM-DDTHH:mm";

fn labeled<'a>(label: &'a str, field: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    column![
        text(label).size(12).style(iced::theme::Text::Color(ZEN_SUBTEXT)),
        field.into(),
    ]
    .spacing(4)
    .into()
}

fn input<'a>(placeholder: &str, value: &str, on_input: fn(String) -> Message) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .padding(10)
        .style(iced::theme::TextInput::Custom(Box::new(InputStyle)))
        .into()
}

/// Modal card for adding or editing one event.
pub fn view(calendar: &EventCalendar) -> Element<'_, Message> {
    let form = calendar.form();
    let enabled = !calendar.is_loading();

    let swatches = Row::with_children(
        SWATCHES
            .iter()
            .map(|swatch| {
                button(text(""))
                    .width(28)
                    .height(28)
                    .style(iced::theme::Button::Custom(Box::new(SwatchStyle {
                        color: hex_color(swatch.background, ZEN_ACCENT),
                        selected: swatch.background.eq_ignore_ascii_case(&form.background_color),
                    })))
                    .on_press(Message::ColorPicked(swatch.background))
                    .into()
            })
            .collect::<Vec<Element<'_, Message>>>(),
    )
    .spacing(10);

    let (heading, save_label) = if calendar.is_editing() {
        ("Edit Event", "Update")
    } else {
        ("Add New Event", "Save")
    };

    let mut actions = row![
        primary_button(save_label, enabled.then_some(Message::SaveEvent)),
        button(text("Cancel").size(14))
            .padding([8, 16])
            .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
            .on_press(Message::CloseModal),
        horizontal_space(),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    if let Some(id) = calendar.modal().editing_id() {
        actions = actions.push(
            button(text("Delete").size(14))
                .padding([8, 16])
                .style(iced::theme::Button::Custom(Box::new(DestructiveButtonStyle)))
                .on_press_maybe(enabled.then(|| Message::DeleteEvent(id.to_string()))),
        );
    }

    let card = container(
        column![
            section_header(heading),
            labeled("Title", input("Event title", &form.title, Message::TitleChanged)),
            row![
                labeled("Start", input(DATE_PLACEHOLDER, &form.start, Message::StartChanged)),
                labeled("End", input(DATE_PLACEHOLDER, &form.end, Message::EndChanged)),
            ]
            .spacing(12),
            labeled("Color", swatches),
            actions,
        ]
        .spacing(16),
    )
    .padding(24)
    .max_width(520)
    .style(iced::theme::Container::Custom(Box::new(CardStyle)));

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
}
