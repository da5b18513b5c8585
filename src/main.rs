// OpenCalendar - event calendar backed by a hosted data service or a local store
// Main entry point for iced application

use iced::{Application, Settings};
use log::{error, info};

use opencalendar::app::{bootstrap, CalendarApp};
use opencalendar::utils::logging::{init_logging, log_error_with_context};

#[tokio::main]
async fn main() -> iced::Result {
    // A missing .env file is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting OpenCalendar with iced UI");

    let store = match bootstrap().await {
        Ok(store) => store,
        Err(e) => {
            log_error_with_context(&e, "startup");
            error!("No event storage is available, exiting");
            eprintln!("Failed to initialize event storage: {:#}", e);
            std::process::exit(1);
        }
    };

    CalendarApp::run(Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1000.0, 760.0),
            resizable: true,
            ..Default::default()
        },
        default_text_size: iced::Pixels(16.0),
        ..Settings::with_flags(store)
    })
}
