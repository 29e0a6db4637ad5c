/*!
perch-host - drive the perch overlay core against an existing window.

```text
perch-host <window title> [config.json]
```

Finds the top-level window with the given title, turns it into the overlay
and ticks the core every 8ms. When the window goes away, shutdown is
requested and the process exits after the quit delay.
*/

#[cfg(target_os = "windows")]
mod input;
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod scene;

use perch::{OverlayConfig, PerchError, PerchResult};

fn load_config(path: Option<&str>) -> PerchResult<OverlayConfig> {
  let Some(path) = path else {
    return Ok(OverlayConfig::default());
  };
  let json = std::fs::read_to_string(path)
    .map_err(|e| PerchError::InvalidConfig(format!("cannot read {path}: {e}")))?;
  let config = OverlayConfig::from_json(&json)?;
  log::info!("Loaded config from {path}");
  Ok(config)
}

#[cfg(target_os = "windows")]
fn run(title: &str, config: OverlayConfig) -> PerchResult<()> {
  use std::time::{Duration, Instant};

  use perch::{OverlayBuilder, Win32WindowManager, WindowManager};

  use crate::input::InputPoller;
  use crate::scene::RectScene;

  const TICK: Duration = Duration::from_millis(8);

  let handle = Win32WindowManager::find_window(title)?;
  let wm = Win32WindowManager::new();

  let mut config = config;
  if config.base_width <= 0.0 || config.base_height <= 0.0 {
    let rect = wm.window_rect(handle)?;
    config.base_width = f64::from(rect.width());
    config.base_height = f64::from(rect.height());
  }

  let mut overlay = OverlayBuilder::new().config(config).build(wm, handle)?;
  overlay.attach()?;
  log::info!(
    "Overlay {handle} attached at {}x{}",
    config.base_width,
    config.base_height
  );

  let signal = overlay.shutdown_signal();
  let mut poller = InputPoller::default();
  let mut was_dizzy = false;

  loop {
    let now = Instant::now();

    if signal.is_requested() {
      if overlay.ready_to_exit(now) {
        break;
      }
    } else if Win32WindowManager::find_window(title).is_err() {
      log::info!("Overlay window closed");
      overlay.request_shutdown();
    } else {
      let cursor = match overlay.window_manager().cursor_position() {
        Ok(cursor) => cursor,
        Err(e) => {
          log::warn!("{e}");
          std::thread::sleep(TICK);
          continue;
        }
      };
      let position = overlay.position();
      let scale = overlay.multiplier();
      let scene = RectScene::new(
        cursor,
        position,
        config.base_width * scale,
        config.base_height * scale,
      );
      overlay.tick(&scene, &poller.poll(), now);

      if overlay.is_dizzy() != was_dizzy {
        was_dizzy = overlay.is_dizzy();
        log::info!("Dizzy: {was_dizzy}");
      }
    }

    std::thread::sleep(TICK);
  }

  log::info!("Exiting");
  Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run(_title: &str, _config: OverlayConfig) -> PerchResult<()> {
  Err(PerchError::NotSupported(
    "perch-host drives Win32 windows only".to_string(),
  ))
}

fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let Some(title) = args.first() else {
    log::error!("usage: perch-host <window title> [config.json]");
    std::process::exit(2);
  };

  let result = load_config(args.get(1).map(String::as_str)).and_then(|config| run(title, config));
  if let Err(e) = result {
    log::error!("{e}");
    std::process::exit(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_path_means_defaults() {
    let config = load_config(None).expect("defaults");
    assert_eq!(config, OverlayConfig::default());
  }

  #[test]
  fn unreadable_path_is_a_config_error() {
    let err = load_config(Some("/nonexistent/perch.json")).unwrap_err();
    assert!(matches!(err, PerchError::InvalidConfig(_)), "got {err}");
  }
}
