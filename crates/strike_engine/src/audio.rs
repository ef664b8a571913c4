//! Audio backend seam
//!
//! Only gameplay hooks talk to audio; no system triggers sound on its own.

/// Receives playback requests from gameplay hooks
pub trait AudioBackend {
    /// Play a sound once
    fn play(&mut self, sound: &str);

    /// Play a sound on a loop until the backend decides otherwise
    fn play_looped(&mut self, sound: &str);
}

/// Backend that swallows every playback request
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _sound: &str) {}

    fn play_looped(&mut self, _sound: &str) {}
}
