//! Asynchronous heightfield loading.
//!
//! Fetching DEM bytes is the engine's only asynchronous boundary. The
//! channel bridges a worker-side fetch with the synchronous frame
//! loop: the host calls [`TerrainChannel::load`] once, then polls
//! [`TerrainChannel::try_recv`] each frame until the decoded grid (or
//! the failure) arrives. Overlapping loads are a caller error and are
//! not guarded against.

use std::sync::mpsc::{channel, Receiver, Sender};

use super::heightfield::{decode_heightfield, HeightfieldGrid, TerrainError};

/// Provider of raw heightfield bytes (file, HTTP, object store).
///
/// A fetch failure should carry the transport's status and reason via
/// [`TerrainError::Fetch`] so the host can decide whether to retry.
pub trait HeightfieldSource: Send {
    fn fetch(&self) -> Result<Vec<u8>, TerrainError>;
}

/// Channel-based loader for one-shot heightfield fetches.
pub struct TerrainChannel {
    sender: Sender<Result<HeightfieldGrid, TerrainError>>,
    receiver: Receiver<Result<HeightfieldGrid, TerrainError>>,
}

impl Default for TerrainChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl TerrainChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns a worker that fetches, decodes, and delivers a grid.
    pub fn load<S>(&self, source: S, samples_per_side: usize, size_m: f32)
    where
        S: HeightfieldSource + 'static,
    {
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = source
                .fetch()
                .and_then(|bytes| decode_heightfield(&bytes, samples_per_side, size_m));
            match &result {
                Ok(grid) => log::info!(
                    "TerrainChannel: loaded {}x{} heightfield",
                    grid.samples_per_side(),
                    grid.samples_per_side()
                ),
                Err(e) => log::warn!("TerrainChannel: load failed: {e}"),
            }
            let _ = sender.send(result);
        });
    }

    /// Non-blocking check for a completed load.
    pub fn try_recv(&self) -> Option<Result<HeightfieldGrid, TerrainError>> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct BytesSource(Vec<u8>);

    impl HeightfieldSource for BytesSource {
        fn fetch(&self) -> Result<Vec<u8>, TerrainError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl HeightfieldSource for FailingSource {
        fn fetch(&self) -> Result<Vec<u8>, TerrainError> {
            Err(TerrainError::Fetch {
                status: 404,
                reason: "Not Found".to_string(),
            })
        }
    }

    fn poll(channel: &TerrainChannel) -> Result<HeightfieldGrid, TerrainError> {
        for _ in 0..500 {
            if let Some(result) = channel.try_recv() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("load did not complete");
    }

    #[test]
    fn test_load_decodes_grid() {
        let bytes: Vec<u8> = [10i16, 20, 30, 40]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let channel = TerrainChannel::new();
        channel.load(BytesSource(bytes), 2, 1000.0);

        let grid = poll(&channel).unwrap();
        assert_eq!(grid.sample(0, 1), 20.0);
    }

    #[test]
    fn test_fetch_failure_surfaces_status() {
        let channel = TerrainChannel::new();
        channel.load(FailingSource, 2, 1000.0);
        match poll(&channel) {
            Err(TerrainError::Fetch { status, reason }) => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_length_mismatch_fails_load() {
        let channel = TerrainChannel::new();
        channel.load(BytesSource(vec![0u8; 6]), 2, 1000.0);
        assert!(matches!(
            poll(&channel),
            Err(TerrainError::LengthMismatch { expected: 4, actual: 3 })
        ));
    }
}
