use std::path::PathBuf;
use std::thread;

use iced::futures::channel::oneshot;
use trim_engine::{MediaBackend, ProbedMedia};

/// Outcome of a background probe, keyed by the path that was probed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub path: PathBuf,
    pub result: Result<ProbedMedia, String>,
}

/// Probes `path` on a worker thread so the UI thread never blocks on ffprobe.
///
/// Errors are flattened to text because iced messages must be `Clone`.
pub fn probe_in_background<M>(
    backend: M,
    path: PathBuf,
) -> impl Future<Output = ProbeOutcome> + Send + 'static
where
    M: MediaBackend + Send + 'static,
{
    let (result_tx, result_rx) = oneshot::channel();
    let worker_path = path.clone();

    thread::spawn(move || {
        let result = backend
            .probe(&worker_path)
            .map_err(|error| error.to_string());
        let _ = result_tx.send(result);
    });

    async move {
        let result = match result_rx.await {
            Ok(result) => result,
            Err(_) => Err(String::from("probe worker exited without a result")),
        };
        ProbeOutcome { path, result }
    }
}
