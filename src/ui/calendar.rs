// src/ui/calendar.rs

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use iced::widget::{button, column, container, row, text, Column, Row};
use iced::{Alignment, Element, Length};

use crate::component::EventCalendar;
use crate::messages::Message;
use crate::models::CalendarEvent;
use crate::ui::hex_color;
use crate::ui::styles::{DayCellStyle, EventChipStyle, GhostStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CHIPS_PER_DAY: usize = 3;

/// Month grid state: which month is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    month: NaiveDate,
}

impl Default for MonthView {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl MonthView {
    pub fn new(date: NaiveDate) -> Self {
        Self { month: month_start(date) }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn previous(&mut self) {
        if let Some(month) = self.month.checked_sub_months(Months::new(1)) {
            self.month = month;
        }
    }

    pub fn next(&mut self) {
        if let Some(month) = self.month.checked_add_months(Months::new(1)) {
            self.month = month;
        }
    }

    pub fn view<'a>(&self, calendar: &'a EventCalendar) -> Element<'a, Message> {
        let nav_button = |label: &'static str, msg: Message| {
            button(text(label).size(18))
                .on_press(msg)
                .padding([5, 15])
                .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
        };

        let header = row![
            nav_button("‹", Message::PrevMonth),
            text(self.month.format("%B %Y").to_string())
                .size(22)
                .style(iced::theme::Text::Color(ZEN_TEXT)),
            nav_button("›", Message::NextMonth),
        ]
        .spacing(20)
        .align_items(Alignment::Center);

        let weekday_row = Row::with_children(
            WEEKDAYS
                .iter()
                .map(|day| {
                    container(text(*day).size(12).style(iced::theme::Text::Color(ZEN_SUBTEXT)))
                        .width(Length::FillPortion(1))
                        .center_x()
                        .into()
                })
                .collect::<Vec<Element<'a, Message>>>(),
        )
        .spacing(4);

        let today = Local::now().date_naive();
        let weeks: Vec<Element<'a, Message>> = grid_days(self.month)
            .chunks(7)
            .map(|week| {
                Row::with_children(
                    week.iter()
                        .map(|day| self.day_cell(*day, today, calendar.events_on(*day)))
                        .collect::<Vec<_>>(),
                )
                .spacing(4)
                .height(Length::FillPortion(1))
                .into()
            })
            .collect();

        column![
            container(header).width(Length::Fill).center_x(),
            weekday_row,
            Column::with_children(weeks).spacing(4).height(Length::Fill),
        ]
        .spacing(10)
        .into()
    }

    fn day_cell<'a>(
        &self,
        day: NaiveDate,
        today: NaiveDate,
        events: Vec<&'a CalendarEvent>,
    ) -> Element<'a, Message> {
        let in_month = day.month() == self.month.month();
        let label_color = if in_month { ZEN_TEXT } else { ZEN_SUBTEXT };

        let mut cell = Column::new().spacing(2).push(
            button(text(day.day().to_string()).size(12).style(iced::theme::Text::Color(label_color)))
                .padding([2, 4])
                .width(Length::Fill)
                .style(iced::theme::Button::Custom(Box::new(GhostStyle)))
                .on_press(Message::DateClicked(day)),
        );

        for event in events.iter().take(CHIPS_PER_DAY) {
            cell = cell.push(event_chip(*event));
        }
        if events.len() > CHIPS_PER_DAY {
            cell = cell.push(
                text(format!("+{} more", events.len() - CHIPS_PER_DAY))
                    .size(10)
                    .style(iced::theme::Text::Color(ZEN_ACCENT)),
            );
        }

        container(cell)
            .padding(4)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(DayCellStyle {
                in_month,
                is_today: day == today,
            })))
            .into()
    }
}

fn event_chip<'a>(event: &CalendarEvent) -> Element<'a, Message> {
    let time = event.start.with_timezone(&Local).format("%H:%M");
    button(text(format!("{} {}", time, event.title)).size(11))
        .padding([1, 4])
        .width(Length::Fill)
        .style(iced::theme::Button::Custom(Box::new(EventChipStyle {
            background: hex_color(&event.background_color, ZEN_ACCENT),
            border: hex_color(&event.border_color, ZEN_ACCENT),
        })))
        .on_press(Message::EventClicked(event.id.clone()))
        .into()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Six Sunday-first weeks covering the month of `month`.
pub fn grid_days(month: NaiveDate) -> Vec<NaiveDate> {
    let first = month_start(month);
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let origin = first - Duration::days(lead);
    (0..42).map(|offset| origin + Duration::days(offset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_grid_starts_on_sunday() {
        // March 2024 starts on a Friday.
        let days = grid_days(date(2024, 3, 15));
        assert_eq!(days.len(), 42);
        assert_eq!(days[0], date(2024, 2, 25));
        assert_eq!(days[5], date(2024, 3, 1));
        assert!(days.contains(&date(2024, 3, 31)));
    }

    #[test]
    fn test_month_navigation_wraps_year() {
        let mut view = MonthView::new(date(2024, 12, 31));
        assert_eq!(view.month(), date(2024, 12, 1));
        view.next();
        assert_eq!(view.month(), date(2025, 1, 1));
        view.previous();
        view.previous();
        assert_eq!(view.month(), date(2024, 11, 1));
    }
}
