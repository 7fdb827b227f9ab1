use notify_rust::{Notification, Urgency};

/// Signal played when a phase runs out. Playback is fire-and-forget: callers
/// never wait on it and never see its failures.
pub trait AudioCue {
    fn play(&self);
}

/// Candidate players and sound files, tried in order.
const PLAYERS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Desktop notification plus a system sound, run on a detached thread.
pub struct SystemChime;

impl AudioCue for SystemChime {
    fn play(&self) {
        std::thread::spawn(|| {
            if let Err(e) = Notification::new()
                .summary("pomotick")
                .body("Phase complete")
                .appname("pomotick")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show()
            {
                log::debug!("notification failed: {e}");
            }

            let Some((cmd, file)) = PLAYERS
                .iter()
                .find(|(_, file)| std::path::Path::new(file).exists())
            else {
                log::debug!("no sound file found");
                return;
            };

            if let Err(e) = std::process::Command::new(cmd)
                .arg(file)
                .stdout(std::process::Stdio::null())
                .stderr(std::process::Stdio::null())
                .spawn()
            {
                log::debug!("{cmd} failed to start: {e}");
            }
        });
    }
}

pub struct Silent;

impl AudioCue for Silent {
    fn play(&self) {}
}

/// Picks the production cue for the sound setting.
pub fn for_setting(sound_enabled: bool) -> Box<dyn AudioCue> {
    if sound_enabled { Box::new(SystemChime) } else { Box::new(Silent) }
}

#[cfg(test)]
pub use counting::CountingCue;
