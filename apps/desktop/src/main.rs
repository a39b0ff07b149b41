mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::WorkerCommand;
use controller::events::UiEvent;
use ui::app::{PersistedUiSettings, SETTINGS_STORAGE_KEY};
use ui::FamilyApp;

#[derive(Debug, Parser)]
#[command(name = "family-desktop", about = "Family member directory widget")]
struct Args {
    /// Tracing filter, e.g. "info" or "family_core=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter)
        .init();

    let (cmd_tx, cmd_rx) = bounded::<WorkerCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Family Directory")
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Family Directory",
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedUiSettings>(&text).ok())
            });
            Ok(Box::new(FamilyApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
}
