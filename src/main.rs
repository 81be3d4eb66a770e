//! CVMatch: desktop frontend for the candidate recommendation backend
//!
//! Usage:
//!   cvmatch [backend-url]  - Start the UI against the given backend
//!   cvmatch help           - Show help
//!
//! The backend URL can also come from the CVMATCH_BACKEND_URL environment
//! variable; the default is http://127.0.0.1:5000.

mod app;
mod backend;
mod error;
mod export;
mod forms;
mod results;
mod ui;

use app::CvMatch;
use iced::{window, Size};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

fn main() -> iced::Result {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("help" | "--help" | "-h") => {
            println!("CVMatch - candidate recommendation frontend\n");
            println!("Usage: cvmatch [backend-url]\n");
            println!("  backend-url   Base URL of the recommendation API");
            println!("                (default: {}, or CVMATCH_BACKEND_URL)", DEFAULT_BACKEND_URL);
            return Ok(());
        }
        _ => {}
    }

    let base_url = args
        .get(1)
        .cloned()
        .or_else(|| env::var("CVMATCH_BACKEND_URL").ok())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    tracing::info!("Starting CVMatch against {}", base_url);

    iced::application("CVMatch", CvMatch::update, CvMatch::view)
        .theme(CvMatch::theme)
        .window(window::Settings {
            size: Size::new(1000.0, 780.0),
            position: window::Position::Centered,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || CvMatch::new(&base_url))
}
