//! Audio for the terminal frontend.
//!
//! A terminal can't mix sound, so one-shot clips ring the terminal bell and
//! the looping background track is tracked as state only.  When audio is
//! disabled (or the output can't be written) every call is a no-op.

use std::io::Write;

/// One-shot sound clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Jump,
    GameOver,
}

/// What the controller needs from an audio backend.
pub trait AudioSink {
    fn play(&mut self, clip: Clip);
    /// Start the looping background track (no-op if already playing).
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Terminal-bell audio.
pub struct AudioManager {
    out: Option<Box<dyn Write>>,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out: Some(out),
            music_playing: false,
        }
    }

    /// Audio switched off: nothing is ever written.
    pub fn disabled() -> Self {
        log::info!("audio disabled");
        Self {
            out: None,
            music_playing: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn bell(&mut self) {
        let Some(out) = self.out.as_mut() else { return };
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::warn!("audio output failed ({}), disabling audio", e);
            self.out = None;
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, clip: Clip) {
        log::debug!("play {:?}", clip);
        self.bell();
    }

    fn start_music(&mut self) {
        if !self.is_enabled() || self.music_playing {
            return;
        }
        self.music_playing = true;
        log::debug!("background music started");
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            log::debug!("background music stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writer that shares its buffer with the test.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn clips_ring_the_bell() {
        let buf = Shared::default();
        let mut audio = AudioManager::new(Box::new(buf.clone()));
        audio.play(Clip::Jump);
        audio.play(Clip::GameOver);
        assert_eq!(*buf.0.borrow(), b"\x07\x07".to_vec());
    }

    #[test]
    fn music_toggles() {
        let mut audio = AudioManager::new(Box::new(Shared::default()));
        audio.start_music();
        assert!(audio.music_playing());
        audio.stop_music();
        assert!(!audio.music_playing());
    }

    #[test]
    fn disabled_is_silent() {
        let mut audio = AudioManager::disabled();
        audio.play(Clip::Jump);
        audio.start_music();
        assert!(!audio.music_playing());
    }

    #[test]
    fn write_failure_disables_audio() {
        let mut audio = AudioManager::new(Box::new(Broken));
        audio.play(Clip::Jump);
        assert!(!audio.is_enabled());
    }
}
