use std::thread;
use std::time::Duration;

use log::warn;
use rodio::source::SineWave;
use rodio::{OutputStream, Sink, Source};

const WIN_TONE_HZ: f32 = 523.25;
const WIN_TONE_MS: u64 = 500;

/// Fire-and-forget escape jingle. Audio problems never reach the game.
pub fn play_win_tone() {
    thread::spawn(|| {
        if play_blocking().is_none() {
            warn!("audio output unavailable, skipping win tone");
        }
    });
}

fn play_blocking() -> Option<()> {
    let (_stream, handle) = OutputStream::try_default().ok()?;
    let sink = Sink::try_new(&handle).ok()?;
    let mut tone = SineWave::new(WIN_TONE_HZ).take_duration(Duration::from_millis(WIN_TONE_MS));
    tone.set_filter_fadeout();
    sink.append(tone.amplify(0.10));
    sink.sleep_until_end();
    Some(())
}
