mod app;
mod bridge;
mod widgets;

use std::path::PathBuf;

use app::AppState;
use trim_engine::PlayerSettings;

const SETTINGS_ENV: &str = "CLIPTRIM_SETTINGS";

fn main() -> iced::Result {
    init_tracing();

    let settings = load_settings();
    let initial_path = std::env::args_os().nth(1).map(PathBuf::from);

    iced::application("Cliptrim", AppState::update, AppState::view)
        .subscription(AppState::subscription)
        .run_with(move || AppState::boot(settings, initial_path))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn load_settings() -> PlayerSettings {
    let Some(path) = std::env::var_os(SETTINGS_ENV) else {
        return PlayerSettings::default();
    };

    match PlayerSettings::load(&path) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "falling back to default player settings");
            PlayerSettings::default()
        }
    }
}
