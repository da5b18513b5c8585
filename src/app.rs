//! iced front end: maps messages onto the calendar component and runs the
//! storage futures the component hands back.

use std::sync::Arc;

use anyhow::Context;
use iced::widget::{column, container};
use iced::{Application, Command, Element, Length, Theme};
use log::{debug, info};

use crate::component::EventCalendar;
use crate::config::{StorageConfig, ERROR_DISPLAY_DURATION};
use crate::messages::Message;
use crate::storage::{self, EventStore};
use crate::ui::{self, calendar::MonthView, styles::BackgroundStyle};
use crate::ui_state::ViewMode;

/// Read the environment and pick a storage backend.
pub async fn bootstrap() -> anyhow::Result<Arc<dyn EventStore>> {
    let config = StorageConfig::from_env();
    let store = storage::connect(&config)
        .await
        .with_context(|| format!("Failed to open local store at {}", config.local_db_path.display()))?;
    info!("Using {} event storage", store.backend_name());
    Ok(store)
}

pub struct CalendarApp {
    calendar: EventCalendar,
    month: MonthView,
    // Last error generation with a pending auto-dismiss.
    scheduled_expiry: Option<u64>,
}

impl CalendarApp {
    fn load(&mut self) -> Command<Message> {
        let order = self.calendar.begin_load();
        let store = self.calendar.store();
        Command::perform(
            async move { store.select(order).await.map_err(|e| e.to_string()) },
            Message::EventsLoaded,
        )
    }

    fn save(&mut self) -> Command<Message> {
        let Ok(pending) = self.calendar.prepare_save() else {
            return Command::none();
        };
        let store = self.calendar.store();
        Command::perform(
            async move { pending.execute(store.as_ref()).await.map_err(|e| e.to_string()) },
            Message::EventSaved,
        )
    }

    fn delete(&mut self, id: String) -> Command<Message> {
        self.calendar.begin_delete(&id);
        let store = self.calendar.store();
        Command::perform(
            async move {
                let result = store.delete(&id).await.map_err(|e| e.to_string());
                (id, result)
            },
            |(id, result)| Message::EventDeleted(id, result),
        )
    }

    fn reschedule(
        &mut self,
        id: &str,
        start: chrono::DateTime<chrono::Utc>,
        end: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Command<Message> {
        let Ok(pending) = self.calendar.reschedule(id, start, end) else {
            return Command::none();
        };
        let store = self.calendar.store();
        Command::perform(
            async move { pending.execute(store.as_ref()).await.map_err(|e| e.to_string()) },
            Message::EventRescheduled,
        )
    }

    fn handle(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::AddEvent => {
                self.calendar.open_add_form();
                Command::none()
            }
            Message::ToggleView => {
                self.calendar.toggle_view();
                Command::none()
            }
            Message::PrevMonth => {
                self.month.previous();
                Command::none()
            }
            Message::NextMonth => {
                self.month.next();
                Command::none()
            }
            Message::DateClicked(date) => {
                self.calendar.open_add_form_on(date);
                Command::none()
            }
            Message::EventClicked(id) => {
                if !self.calendar.open_edit_form_by_id(&id) {
                    debug!("Ignoring click on unknown event {}", id);
                }
                Command::none()
            }
            Message::RescheduleEvent { id, start, end } => self.reschedule(&id, start, end),
            Message::TitleChanged(title) => {
                self.calendar.form_mut().title = title;
                Command::none()
            }
            Message::StartChanged(start) => {
                self.calendar.form_mut().start = start;
                Command::none()
            }
            Message::EndChanged(end) => {
                self.calendar.form_mut().end = end;
                Command::none()
            }
            Message::ColorPicked(color) => {
                self.calendar.form_mut().background_color = color.to_string();
                Command::none()
            }
            Message::SaveEvent => self.save(),
            Message::DeleteEvent(id) => self.delete(id),
            Message::CloseModal => {
                self.calendar.close_modal();
                Command::none()
            }
            Message::EventsLoaded(result) => {
                self.calendar.finish_load(result);
                Command::none()
            }
            Message::EventSaved(result) => {
                self.calendar.finish_save(result);
                Command::none()
            }
            Message::EventRescheduled(result) => {
                self.calendar.finish_reschedule(result);
                Command::none()
            }
            Message::EventDeleted(id, result) => {
                self.calendar.finish_delete(&id, result);
                Command::none()
            }
            Message::DismissError => {
                if let Some(generation) = self.calendar.error_generation() {
                    self.calendar.expire_error(generation);
                }
                Command::none()
            }
            Message::ErrorExpired(generation) => {
                self.calendar.expire_error(generation);
                Command::none()
            }
        }
    }

    /// Arm the auto-dismiss timer once per newly raised error.
    fn schedule_error_expiry(&mut self) -> Command<Message> {
        match self.calendar.error_generation() {
            Some(generation) if self.scheduled_expiry != Some(generation) => {
                self.scheduled_expiry = Some(generation);
                Command::perform(tokio::time::sleep(ERROR_DISPLAY_DURATION), move |_| {
                    Message::ErrorExpired(generation)
                })
            }
            _ => Command::none(),
        }
    }
}

impl Application for CalendarApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Arc<dyn EventStore>;

    fn new(store: Self::Flags) -> (Self, Command<Message>) {
        let mut app = CalendarApp {
            calendar: EventCalendar::new(store),
            month: MonthView::default(),
            scheduled_expiry: None,
        };
        let startup = app.load();
        (app, startup)
    }

    fn title(&self) -> String {
        "Event Calendar".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let command = self.handle(message);
        Command::batch([command, self.schedule_error_expiry()])
    }

    fn view(&self) -> Element<'_, Message> {
        let body = if self.calendar.show_modal() {
            ui::form::view(&self.calendar)
        } else {
            match self.calendar.view_mode() {
                ViewMode::Grid => self.month.view(&self.calendar),
                ViewMode::List => ui::list::view(&self.calendar),
            }
        };

        let mut layout = column![ui::header(&self.calendar)].spacing(16);
        if let Some(message) = self.calendar.error_message() {
            layout = layout.push(ui::error_banner(message));
        }
        layout = layout
            .push(container(body).width(Length::Fill).height(Length::Fill))
            .push(ui::footer(&self.calendar));

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(24)
            .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
