//! File watching for `check --watch`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// docs.toml was written
    ConfigChanged(PathBuf),

    /// A page was created, modified or deleted
    PageChanged(PathBuf),

    /// A stylesheet or other file changed
    Other(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::ConfigChanged(p) | WatchEvent::PageChanged(p) | WatchEvent::Other(p) => p,
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch the config file and the content directory.
    ///
    /// The config is watched through its parent directory so editors that
    /// save by replacing the file keep being seen. Bursts of events are
    /// collapsed into a single event sent once the burst has settled.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        config_path: &Path,
        content_dir: &Path,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let config_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.canonicalize()?,
            _ => std::env::current_dir()?.canonicalize()?,
        };
        let content_dir = if content_dir.exists() {
            Some(content_dir.canonicalize()?)
        } else {
            None
        };

        if content_dir.as_deref() != Some(config_dir.as_path()) {
            watcher
                .watch(&config_dir, RecursiveMode::NonRecursive)
                .map_err(std::io::Error::other)?;
        }
        if let Some(dir) = &content_dir {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .map_err(std::io::Error::other)?;
        }

        let targets = Targets {
            config_dir,
            config_name: config_path.file_name().map(|n| n.to_os_string()),
            content_dir,
        };
        std::thread::spawn(move || debounce(sync_rx, async_tx, targets));

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// What the watcher reports on.
struct Targets {
    config_dir: PathBuf,
    config_name: Option<OsString>,
    content_dir: Option<PathBuf>,
}

impl Targets {
    /// `Some(true)` for the config file, `Some(false)` for content, `None` otherwise.
    fn route(&self, path: &Path) -> Option<bool> {
        if path.parent() == Some(self.config_dir.as_path())
            && self.config_name.is_some()
            && path.file_name() == self.config_name.as_deref()
        {
            return Some(true);
        }
        match &self.content_dir {
            Some(dir) if path.starts_with(dir) => Some(false),
            _ => None,
        }
    }
}

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Forward one event per burst, after no event has arrived for `DEBOUNCE`.
fn debounce(
    rx: mpsc::Receiver<notify::Event>,
    tx: async_mpsc::Sender<WatchEvent>,
    targets: Targets,
) {
    let mut pending: Vec<WatchEvent> = Vec::new();

    loop {
        let received = if pending.is_empty() {
            rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
        } else {
            rx.recv_timeout(DEBOUNCE)
        };

        match received {
            Ok(event) => {
                for path in &event.paths {
                    let Some(is_config) = targets.route(path) else {
                        continue;
                    };
                    if let Some(e) = classify_event(path, &event.kind, is_config) {
                        pending.push(e);
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(e) = settle(std::mem::take(&mut pending)) {
                    if tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if let Some(e) = settle(pending) {
                    let _ = tx.blocking_send(e);
                }
                return;
            }
        }
    }
}

/// Collapse a burst: a config change wins, otherwise the latest change.
fn settle(burst: Vec<WatchEvent>) -> Option<WatchEvent> {
    if let Some(config) = burst
        .iter()
        .rev()
        .find(|e| matches!(e, WatchEvent::ConfigChanged(_)))
    {
        return Some(config.clone());
    }
    burst.into_iter().last()
}
