//! Refresh requests for re-analysis
//!
//! Consumers that display analysis results subscribe to a channel instead of
//! registering global callbacks. Anything holding a [`RefreshTrigger`] can ask
//! for a refresh; [`run_buffer_watcher`] emits one whenever the acquisition
//! file on disk changes.
//!
//! The watcher polls the file's mtime. When a change is detected it waits
//! for the debounce delay (uploaders often write in stages) and only fires
//! once the mtime is stable.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;

use crate::config::WatchConfig;

/// Why a refresh was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshEvent {
    /// Explicit request, e.g. from a UI action.
    Manual,
    /// The acquisition file at this path was rewritten.
    BufferChanged(PathBuf),
}

/// Cloneable handle for requesting refreshes.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: mpsc::Sender<RefreshEvent>,
}

/// Create a trigger and the receiver that consumes its events.
pub fn refresh_channel(capacity: usize) -> (RefreshTrigger, mpsc::Receiver<RefreshEvent>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RefreshTrigger { tx }, rx)
}

impl RefreshTrigger {
    /// Request a manual refresh without blocking.
    ///
    /// Returns false when the receiver is gone or the queue is full; a full
    /// queue already has a refresh pending.
    pub fn request(&self) -> bool {
        match self.tx.try_send(RefreshEvent::Manual) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!("Refresh already queued, dropping request");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Send an event, waiting for queue space. Returns false once the receiver is dropped.
    pub async fn send(&self, event: RefreshEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Request a manual refresh for every line read from `reader`.
///
/// Runs on a detached OS thread, so a blocked read never holds up runtime
/// shutdown. The thread ends at EOF, on a read error, or once the receiver
/// is dropped (checked after each line).
pub fn spawn_line_trigger<R>(reader: R, trigger: RefreshTrigger) -> std::thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            if line.is_err() || trigger.is_closed() {
                break;
            }
            trigger.request();
        }
        tracing::debug!("Manual refresh input closed");
    })
}

/// Run the acquisition file watcher loop.
///
/// Polls `path` for mtime changes and sends [`RefreshEvent::BufferChanged`]
/// on `trigger`. Returns when the channel is closed or the task is cancelled.
pub async fn run_buffer_watcher(path: PathBuf, config: WatchConfig, trigger: RefreshTrigger) {
    let poll_interval = Duration::from_millis(config.poll_interval_ms.max(1));
    let debounce = Duration::from_millis(config.debounce_ms);

    tracing::info!(
        path = %path.display(),
        poll_ms = config.poll_interval_ms,
        "Acquisition watcher started"
    );

    let mut last_mtime = get_mtime(&path);

    loop {
        tokio::time::sleep(poll_interval).await;

        if trigger.is_closed() {
            tracing::debug!("Refresh channel closed, stopping watcher");
            return;
        }

        // File missing or unreadable: warn once and keep polling
        let Some(current) = get_mtime(&path) else {
            if last_mtime.is_some() {
                tracing::warn!(
                    path = %path.display(),
                    "Acquisition file not accessible, will retry"
                );
                last_mtime = None;
            }
            continue;
        };

        // A reappearing file counts as a change
        if last_mtime == Some(current) {
            continue;
        }

        tokio::time::sleep(debounce).await;
        if get_mtime(&path) != Some(current) {
            // Still being written, pick it up next cycle
            continue;
        }

        last_mtime = Some(current);
        tracing::debug!(path = %path.display(), "Acquisition file changed");

        if !trigger.send(RefreshEvent::BufferChanged(path.clone())).await {
            tracing::debug!("Refresh channel closed, stopping watcher");
            return;
        }
    }
}

/// Modification time of a file, `None` on any error.
fn get_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_watch() -> WatchConfig {
        WatchConfig {
            poll_interval_ms: 20,
            debounce_ms: 5,
        }
    }

    #[tokio::test]
    async fn test_manual_request_is_delivered() {
        let (trigger, mut rx) = refresh_channel(4);
        let clone = trigger.clone();
        assert!(clone.request());
        assert_eq!(rx.recv().await, Some(RefreshEvent::Manual));
    }

    #[tokio::test]
    async fn test_request_after_receiver_dropped() {
        let (trigger, rx) = refresh_channel(1);
        drop(rx);
        assert!(trigger.is_closed());
        assert!(!trigger.request());
    }

    #[tokio::test]
    async fn test_full_queue_drops_request() {
        let (trigger, _rx) = refresh_channel(1);
        assert!(trigger.request());
        assert!(!trigger.request());
    }

    #[tokio::test]
    async fn test_line_trigger_requests_per_line() {
        let (trigger, mut rx) = refresh_channel(4);
        let input = std::io::Cursor::new(b"\n\n".to_vec());
        let handle = spawn_line_trigger(input, trigger);

        assert_eq!(rx.recv().await, Some(RefreshEvent::Manual));
        assert_eq!(rx.recv().await, Some(RefreshEvent::Manual));
        // EOF ends the thread and drops the last sender
        assert_eq!(rx.recv().await, None);
        handle.join().unwrap();
    }

    #[test]
    fn test_line_trigger_stops_when_receiver_dropped() {
        let (trigger, rx) = refresh_channel(1);
        drop(rx);
        let input = std::io::Cursor::new(b"a\nb\nc\n".to_vec());
        spawn_line_trigger(input, trigger).join().unwrap();
    }

    #[test]
    fn test_blocked_reader_does_not_hold_runtime_shutdown() {
        // A reader whose writer never closes, like an interactive stdin
        let (_writer, reader) = std::sync::mpsc::channel::<Vec<u8>>();
        struct Blocking(std::sync::mpsc::Receiver<Vec<u8>>);
        impl std::io::Read for Blocking {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                match self.0.recv() {
                    Ok(bytes) => {
                        let n = bytes.len().min(buf.len());
                        buf[..n].copy_from_slice(&bytes[..n]);
                        Ok(n)
                    }
                    Err(_) => Ok(0),
                }
            }
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let started = std::time::Instant::now();
        runtime.block_on(async {
            let (trigger, _rx) = refresh_channel(1);
            spawn_line_trigger(std::io::BufReader::new(Blocking(reader)), trigger);
        });
        drop(runtime);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_watcher_reports_file_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acquisition.json");
        std::fs::write(&path, "{}").unwrap();

        let (trigger, mut rx) = refresh_channel(4);
        let handle = tokio::spawn(run_buffer_watcher(path.clone(), fast_watch(), trigger));

        // Let the watcher record the initial mtime
        tokio::time::sleep(Duration::from_millis(50)).await;

        std::fs::write(&path, r#"{"h": [1, 2, 3]}"#).unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(10))
            .unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("watcher should report the change");
        assert_eq!(event, Some(RefreshEvent::BufferChanged(path)));

        drop(rx);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("watcher should stop once the receiver is dropped")
            .unwrap();
    }
}
