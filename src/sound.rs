/// Every sound the game can trigger
/// ┌──────────┬─────────────────────┬─────────┬────────┐
/// │ Cue      │ Triggered by        │ Looping │ Volume │
/// ├──────────┼─────────────────────┼─────────┼────────┤
/// │ Music    │ PREINTRO -> INTRO   │ yes     │ 1.0    │
/// │ Horde    │ START -> RUNNING    │ yes     │ 0.5    │
/// │ Thunder  │ lightning flash     │ no      │ 1.0    │
/// │ Squelch  │ enemy killed        │ no      │ 1.0    │
/// └──────────┴─────────────────────┴─────────┴────────┘
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Music,
    Horde,
    Thunder,
    Squelch,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Music,
        SoundCue::Horde,
        SoundCue::Thunder,
        SoundCue::Squelch,
    ];

    pub fn path(self) -> &'static str {
        match self {
            SoundCue::Music => "assets/HordeZee.mp3",
            SoundCue::Horde => "assets/horde.mp3",
            SoundCue::Thunder => "assets/thunder.mp3",
            SoundCue::Squelch => "assets/squelch.mp3",
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, SoundCue::Music | SoundCue::Horde)
    }

    pub fn volume(self) -> f64 {
        match self {
            SoundCue::Horde => 0.5,
            _ => 1.0,
        }
    }
}

/// Fire-and-forget playback, nothing is ever awaited or reported back
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Records cues in order, handy for headless runs
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}
