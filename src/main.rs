//! voxtwin entry point.

mod app;
mod commands;
mod config;
mod demo;
mod logging;
mod playback;
mod render;
mod setup;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(e) = app::run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
