// WASD moves the point, Q or Escape quits. The coordinate readout shows in
// the window title and in the log.
//
// Usage: point_demo [config.json]

use std::path::PathBuf;

use anyhow::{Context, Result};
use wasd_point::{DemoConfig, Engine, LogRenderer, PositionRenderer, TitleRenderer};

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DemoConfig::load_from_file(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => DemoConfig::default(),
    };
    log::info!(
        "speed {} units/s, bounds +/-{}, quit key {:?}",
        config.speed,
        config.bound,
        config.quit_key
    );

    let renderers: Vec<Box<dyn PositionRenderer>> = vec![
        Box::new(TitleRenderer::new(config.title.clone())),
        Box::new(LogRenderer::new()),
    ];

    Engine::from_config(&config).run(config.to_state(), renderers)
}
