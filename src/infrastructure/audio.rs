//! Terminal bell audio adapter.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::entities::{BellPattern, Sound};
use crate::domain::errors::AudioError;
use crate::domain::ports::AudioPort;

/// Length of a sound preview.
pub const PREVIEW_WINDOW: Duration = Duration::from_secs(2);

/// Something that can emit one bell strike.
pub trait BellSink: Send + Sync {
    /// Emits a single strike.
    ///
    /// # Errors
    /// Returns the underlying output error.
    fn ring(&self) -> io::Result<()>;
}

/// Writes BEL to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutBell;

impl BellSink for StdoutBell {
    fn ring(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// Plays sounds as bell patterns on background tasks.
///
/// The ringing, preview and one-shot channels are independent; starting a
/// sound on a channel replaces whatever that channel was playing.
pub struct TerminalAudio {
    enabled: bool,
    sink: Arc<dyn BellSink>,
    looped: Mutex<Option<JoinHandle<()>>>,
    preview: Mutex<Option<JoinHandle<()>>>,
    once: Mutex<Option<JoinHandle<()>>>,
}

impl TerminalAudio {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, Arc::new(StdoutBell))
    }

    #[must_use]
    pub fn with_sink(enabled: bool, sink: Arc<dyn BellSink>) -> Self {
        Self {
            enabled,
            sink,
            looped: Mutex::new(None),
            preview: Mutex::new(None),
            once: Mutex::new(None),
        }
    }

    fn spawn_on<F>(&self, channel: &Mutex<Option<JoinHandle<()>>>, task: F) -> Result<(), AudioError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| AudioError::RuntimeUnavailable)?;
        let mut slot = channel.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(handle.spawn(task));
        Ok(())
    }

    fn cancel(channel: &Mutex<Option<JoinHandle<()>>>) {
        if let Some(handle) = channel.lock().take() {
            handle.abort();
        }
    }
}

async fn strike(sink: &dyn BellSink, pattern: BellPattern) -> io::Result<()> {
    for i in 0..pattern.strikes {
        if i > 0 {
            sleep(pattern.gap).await;
        }
        sink.ring()?;
    }
    Ok(())
}

async fn repeat(sink: Arc<dyn BellSink>, sound: Sound) {
    let pattern = sound.asset().pattern;
    loop {
        if let Err(e) = strike(sink.as_ref(), pattern).await {
            warn!(sound = sound.id(), error = %e, "Sound playback failed");
            return;
        }
        sleep(pattern.cycle).await;
    }
}

impl AudioPort for TerminalAudio {
    fn play_looped(&self, sound: Sound) -> Result<(), AudioError> {
        if !self.enabled {
            debug!(sound = sound.id(), "Audio muted, not ringing");
            return Ok(());
        }
        debug!(sound = sound.id(), file = sound.asset().file, "Ringing");
        let sink = self.sink.clone();
        self.spawn_on(&self.looped, repeat(sink, sound))
    }

    fn stop_looped(&self) {
        Self::cancel(&self.looped);
    }

    fn preview(&self, sound: Sound) -> Result<(), AudioError> {
        if !self.enabled {
            debug!(sound = sound.id(), "Audio muted, skipping preview");
            return Ok(());
        }
        let sink = self.sink.clone();
        self.spawn_on(&self.preview, async move {
            let _ = tokio::time::timeout(PREVIEW_WINDOW, repeat(sink, sound)).await;
            debug!(sound = sound.id(), "Preview finished");
        })
    }

    fn play_once(&self, sound: Sound) -> Result<(), AudioError> {
        if !self.enabled {
            return Ok(());
        }
        let sink = self.sink.clone();
        self.spawn_on(&self.once, async move {
            if let Err(e) = strike(sink.as_ref(), sound.asset().pattern).await {
                warn!(sound = sound.id(), error = %e, "Sound playback failed");
            }
        })
    }

    fn stop_all(&self) {
        Self::cancel(&self.looped);
        Self::cancel(&self.preview);
        Self::cancel(&self.once);
    }
}

impl Drop for TerminalAudio {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingBell {
        strikes: AtomicUsize,
    }

    impl BellSink for CountingBell {
        fn ring(&self) -> io::Result<()> {
            self.strikes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct BrokenBell;

    impl BellSink for BrokenBell {
        fn ring(&self) -> io::Result<()> {
            Err(io::Error::other("no tty"))
        }
    }

    fn audio(enabled: bool) -> (TerminalAudio, Arc<CountingBell>) {
        let bell = Arc::new(CountingBell::default());
        (TerminalAudio::with_sink(enabled, bell.clone()), bell)
    }

    #[test]
    fn test_rejected_without_runtime() {
        let (audio, _) = audio(true);
        assert!(matches!(
            audio.play_looped(Sound::ClassicAlarm),
            Err(AudioError::RuntimeUnavailable)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_rings_until_stopped() {
        let (audio, bell) = audio(true);
        audio.play_looped(Sound::GentleChime).unwrap();

        sleep(Duration::from_secs(5)).await;
        let rung = bell.strikes.load(Ordering::SeqCst);
        assert!(rung >= 2);

        audio.stop_looped();
        sleep(Duration::from_secs(10)).await;
        assert_eq!(bell.strikes.load(Ordering::SeqCst), rung);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_stops_after_window() {
        let (audio, bell) = audio(true);
        audio.preview(Sound::DigitalBeep).unwrap();

        sleep(PREVIEW_WINDOW + Duration::from_millis(100)).await;
        let rung = bell.strikes.load(Ordering::SeqCst);
        assert!(rung > 0);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(bell.strikes.load(Ordering::SeqCst), rung);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preview_independent_of_loop() {
        let (audio, bell) = audio(true);
        audio.play_looped(Sound::ClassicAlarm).unwrap();
        audio.preview(Sound::GentleChime).unwrap();

        sleep(Duration::from_secs(4)).await;
        let rung = bell.strikes.load(Ordering::SeqCst);

        sleep(Duration::from_secs(4)).await;
        assert!(bell.strikes.load(Ordering::SeqCst) > rung);
        audio.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_muted_is_silent() {
        let (audio, bell) = audio(false);
        audio.play_looped(Sound::ClassicAlarm).unwrap();
        audio.play_once(Sound::Notification).unwrap();
        sleep(Duration::from_secs(3)).await;
        assert_eq!(bell.strikes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_failure_is_not_fatal() {
        let audio = TerminalAudio::with_sink(true, Arc::new(BrokenBell));
        assert!(audio.play_looped(Sound::ClassicAlarm).is_ok());
        sleep(Duration::from_secs(2)).await;
        audio.stop_looped();
    }
}
