// src/ui/list.rs

use chrono::Duration;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use crate::component::EventCalendar;
use crate::messages::Message;
use crate::models::CalendarEvent;
use crate::ui::styles::{
    CardStyle, DestructiveButtonStyle, GhostStyle, StripStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT,
};
use crate::ui::{hex_color, section_header};
use crate::utils::format_date_display;

pub fn view(calendar: &EventCalendar) -> Element<'_, Message> {
    let heading = row![
        section_header("All Events"),
        horizontal_space(),
        text(calendar.events_count_label())
            .size(14)
            .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
    ]
    .align_items(Alignment::Center);

    let content: Element<'_, Message> = if calendar.events().is_empty() {
        container(
            text(calendar.empty_events_message())
                .size(16)
                .style(iced::theme::Text::Color(ZEN_SUBTEXT)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    } else {
        let enabled = !calendar.is_loading();
        let cards: Vec<Element<'_, Message>> = calendar
            .sorted_events()
            .into_iter()
            .map(|event| event_card(event, enabled))
            .collect();

        scrollable(Column::with_children(cards).spacing(12).padding([0, 4]))
            .height(Length::Fill)
            .into()
    };

    column![heading, content].spacing(16).into()
}

fn event_card(event: &CalendarEvent, enabled: bool) -> Element<'_, Message> {
    let mut when = match event.end {
        Some(ref end) => format!(
            "{} - {}",
            format_date_display(Some(&event.start)),
            format_date_display(Some(end))
        ),
        None => format_date_display(Some(&event.start)),
    };
    if let Some(length) = event.duration() {
        when.push_str(&format!(" ({}h {:02}m)", length.num_hours(), length.num_minutes() % 60));
    }
    let title_color = if event.is_past() { ZEN_SUBTEXT } else { ZEN_TEXT };

    let shift = |label: &'static str, days: i64| {
        button(text(label).size(12))
            .padding([4, 8])
            .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
            .on_press_maybe(enabled.then(|| Message::RescheduleEvent {
                id: event.id.clone(),
                start: event.start + Duration::days(days),
                end: event.end.map(|end| end + Duration::days(days)),
            }))
    };

    container(
        row![
            container("")
                .width(4)
                .height(40)
                .style(iced::theme::Container::Custom(Box::new(StripStyle(hex_color(
                    &event.background_color,
                    ZEN_ACCENT,
                ))))),
            column![
                button(text(&event.title).size(16).style(iced::theme::Text::Color(title_color)))
                    .padding(0)
                    .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
                    .on_press(Message::EventClicked(event.id.clone())),
                text(when).size(13).style(iced::theme::Text::Color(ZEN_SUBTEXT)),
            ]
            .spacing(4),
            horizontal_space(),
            shift("-1 day", -1),
            shift("+1 day", 1),
            button(text("Delete").size(12))
                .padding([4, 10])
                .style(iced::theme::Button::Custom(Box::new(DestructiveButtonStyle)))
                .on_press_maybe(enabled.then(|| Message::DeleteEvent(event.id.clone()))),
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    )
    .padding(15)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(CardStyle)))
    .into()
}
