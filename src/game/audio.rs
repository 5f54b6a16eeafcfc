/// Discrete sound cues fired by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Eat,
    Fail,
    Countdown,
}

/// Something that can play a cue once
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Collects cues in order, for inspection
#[derive(Debug, Default, Clone)]
pub struct CueLog {
    pub cues: Vec<Cue>,
}

impl CueLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AudioSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}
