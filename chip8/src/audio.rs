use std::path::Path;

use log::{debug, warn};
use sdl2::audio::{AudioCVT, AudioFormat, AudioQueue, AudioSpecDesired, AudioSpecWAV};

/// # Speaker
/// Plays a WAV clip for as long as the Chip-8 sound timer is running.
///
/// A speaker without a clip is muted and ignores every update.
pub struct Speaker {
    queue: Option<AudioQueue<i16>>,
    clip: Vec<i16>,
}

impl Speaker {
    /// Opens an audio queue matching the clip at `path`
    ///
    /// A clip that can't be loaded only mutes the speaker; failing to open the audio device is
    /// an error.
    pub fn new(sdl: &sdl2::Sdl, path: &Path) -> Result<Self, String> {
        let wav = match AudioSpecWAV::load_wav(path) {
            Ok(wav) => wav,
            Err(e) => {
                // Sound is optional: a missing or unreadable clip leaves the run silent
                // instead of stopping it at startup.
                warn!("sound disabled, cannot load {}: {}", path.display(), e);
                return Ok(Speaker::muted());
            }
        };

        let desired = AudioSpecDesired {
            freq: Some(wav.freq),
            channels: Some(wav.channels),
            samples: None,
        };
        let queue = sdl.audio()?.open_queue::<i16, _>(None, &desired)?;

        let spec = queue.spec();
        let cvt = AudioCVT::new(
            wav.format,
            wav.channels,
            wav.freq,
            AudioFormat::s16_sys(),
            spec.channels,
            spec.freq,
        )?;
        let clip: Vec<i16> = cvt
            .convert(wav.buffer().to_vec())
            .chunks_exact(2)
            .map(|b| i16::from_ne_bytes([b[0], b[1]]))
            .collect();
        debug!("loaded {} samples from {}", clip.len(), path.display());

        Ok(Speaker {
            queue: Some(queue),
            clip,
        })
    }

    pub fn muted() -> Self {
        Speaker {
            queue: None,
            clip: Vec::new(),
        }
    }

    /// Keeps the clip playing while `active`, silences it otherwise; call once per timer tick
    pub fn update(&mut self, active: bool) -> Result<(), String> {
        let queue = match &self.queue {
            Some(queue) => queue,
            None => return Ok(()),
        };

        if active {
            if queue.size() == 0 {
                queue.queue_audio(&self.clip)?;
            }
            queue.resume();
        } else {
            queue.pause();
            queue.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_speaker_ignores_updates() {
        let mut speaker = Speaker::muted();
        assert!(speaker.update(true).is_ok());
        assert!(speaker.update(false).is_ok());
        assert!(speaker.clip.is_empty());
    }
}
