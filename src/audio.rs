use std::io::{self, Write};
use log::info;

/// The three sound cues the game knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    MeteorDestroyed,
    Victory,
    Defeat,
}

impl Cue {
    pub fn asset(&self) -> &'static str {
        match self {
            Cue::MeteorDestroyed => "meteor_explosion.wav",
            Cue::Victory => "victory.mp3",
            Cue::Defeat => "game_over.wav",
        }
    }
}

// Single channel: a new cue always cuts off the previous one.
pub struct Mixer {
    now_playing: Option<Cue>,
    bell: bool,
    played: u64,
}

impl Mixer {
    pub fn new(bell: bool) -> Self {
        Mixer { now_playing: None, bell, played: 0 }
    }

    pub fn muted() -> Self {
        Mixer::new(false)
    }

    pub fn play(&mut self, cue: Cue, out: &mut impl Write) -> io::Result<()> {
        if let Some(previous) = self.now_playing.replace(cue) {
            if previous != cue {
                info!("Cue {} cut off by {}", previous.asset(), cue.asset());
            }
        }
        self.played += 1;
        info!("Playing {}", cue.asset());
        if self.bell {
            // The terminal bell is the only speaker we have.
            write!(out, "\x07")?;
        }
        Ok(())
    }

    pub fn now_playing(&self) -> Option<Cue> {
        self.now_playing
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}
