//! One-shot browser launch after startup.

use std::time::Duration;

use tokio::{process::Command, task::JoinHandle};

pub const LAUNCH_DELAY: Duration = Duration::from_millis(1500);

/// The platform command that opens `url` in the default browser.
fn opener(url: &str) -> (&'static str, Vec<String>) {
  if cfg!(target_os = "windows") {
    ("cmd", vec!["/C".into(), "start".into(), String::new(), url.into()])
  } else if cfg!(target_os = "macos") {
    ("open", vec![url.into()])
  } else {
    ("xdg-open", vec![url.into()])
  }
}

/// Open `url` after `delay`. Failures are logged, never propagated.
pub fn open_after(url: String, delay: Duration) -> JoinHandle<()> {
  tokio::spawn(async move {
    tokio::time::sleep(delay).await;
    let (program, args) = opener(&url);
    match Command::new(program).args(&args).status().await {
      Ok(status) if status.success() => tracing::info!(%url, "opened browser"),
      Ok(status) => tracing::warn!(%url, %status, "browser opener exited with failure"),
      Err(e) => tracing::warn!(%url, error = %e, "could not launch browser"),
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opener_passes_url_last() {
    let (program, args) = opener("http://127.0.0.1:5000/");
    assert!(!program.is_empty());
    assert_eq!(args.last().map(String::as_str), Some("http://127.0.0.1:5000/"));
  }
}
