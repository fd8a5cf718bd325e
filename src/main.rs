// Prevent console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use docview::{Scale, ViewerApp};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// View a PDF document.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Document to open: an http(s) URL, a file:// URL or a path
    url: String,

    /// Initial zoom: 1, 1.5, 2 or 2.5 (or 100%, 150%, ...)
    #[arg(long)]
    scale: Option<Scale>,
}

pub fn main() -> iced::Result {
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docview=info")),
        )
        .init();

    let args = Args::parse();
    let Args { url, scale } = args;

    iced::application(
        move || ViewerApp::new(url.clone(), scale),
        ViewerApp::update,
        ViewerApp::view,
    )
    .title(ViewerApp::title)
    .theme(ViewerApp::theme)
    .subscription(ViewerApp::subscription)
    .run()
}
