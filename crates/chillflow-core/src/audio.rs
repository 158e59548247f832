//! Background audio policy.
//!
//! The core never plays sound. It only decides which cue an audio layer
//! should act on for a given phase change; mixing and fades belong to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::cycle::{Phase, PhaseCategory};
use crate::events::{Event, EventSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Start background audio.
    Play,
    /// Stop background audio.
    Stop,
    /// Hold background audio at its current position.
    Pause,
    /// Continue held background audio.
    Resume,
}

/// Cue for a change between coarse categories.
///
/// Audio plays while focusing: it starts when a focus phase begins from
/// idle or rest and stops when focus gives way to a rest. Everything else,
/// including `LongRest -> Idle`, is silent.
pub fn cue_for_transition(previous: PhaseCategory, current: PhaseCategory) -> Option<AudioCue> {
    use PhaseCategory::*;
    match (previous, current) {
        (Idle, Focus) | (Rest, Focus) => Some(AudioCue::Play),
        (Focus, Rest) | (Focus, LongRest) => Some(AudioCue::Stop),
        _ => None,
    }
}

/// Cue for pausing `phase`; only focus audio is held.
pub fn cue_for_pause(phase: Phase) -> Option<AudioCue> {
    phase
        .running()
        .filter(|p| p.is_focus())
        .map(|_| AudioCue::Pause)
}

/// Cue for resuming the paused `phase`.
pub fn cue_for_resume(phase: Phase) -> Option<AudioCue> {
    phase
        .paused()
        .filter(|p| p.is_focus())
        .map(|_| AudioCue::Resume)
}

/// Cue for resetting out of `phase`: focus audio stops whether it was
/// playing or held.
pub fn cue_for_reset(phase: Phase) -> Option<AudioCue> {
    match phase.base() {
        Phase::Focus(_) => Some(AudioCue::Stop),
        _ => None,
    }
}

/// Cue for one `PhaseChanged` pair.
pub fn cue_for_change(previous: Phase, current: Phase) -> Option<AudioCue> {
    if current.is_paused() && !previous.is_paused() {
        return cue_for_pause(previous);
    }
    if previous.is_paused() && current.running() == previous.paused() {
        return cue_for_resume(previous);
    }
    if current.is_idle() {
        return cue_for_reset(previous);
    }
    cue_for_transition(previous.category(), current.category())
}

/// Forwards audio cues derived from engine events to a callback.
pub struct AudioCueSink<F> {
    on_cue: F,
}

impl<F: FnMut(AudioCue)> AudioCueSink<F> {
    pub fn new(on_cue: F) -> Self {
        Self { on_cue }
    }
}

impl<F: FnMut(AudioCue)> EventSink for AudioCueSink<F> {
    fn emit(&mut self, event: &Event) {
        if let Event::PhaseChanged { previous, current } = *event {
            if let Some(cue) = cue_for_change(previous, current) {
                (self.on_cue)(cue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{ActivePhase, CycleConfig, CycleEngine};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn transition_table() {
        use PhaseCategory::*;
        assert_eq!(cue_for_transition(Idle, Focus), Some(AudioCue::Play));
        assert_eq!(cue_for_transition(Rest, Focus), Some(AudioCue::Play));
        assert_eq!(cue_for_transition(Focus, Rest), Some(AudioCue::Stop));
        assert_eq!(cue_for_transition(Focus, LongRest), Some(AudioCue::Stop));
        assert_eq!(cue_for_transition(LongRest, Idle), None);
        assert_eq!(cue_for_transition(Focus, Idle), None);
        assert_eq!(cue_for_transition(Rest, Idle), None);
    }

    #[test]
    fn pause_and_resume_only_for_focus() {
        assert_eq!(cue_for_pause(Phase::Focus(2)), Some(AudioCue::Pause));
        assert_eq!(cue_for_pause(Phase::Rest(1)), None);
        assert_eq!(cue_for_pause(Phase::Idle), None);
        assert_eq!(
            cue_for_resume(Phase::Paused(ActivePhase::Focus(2))),
            Some(AudioCue::Resume)
        );
        assert_eq!(cue_for_resume(Phase::Paused(ActivePhase::LongRest)), None);
        assert_eq!(cue_for_resume(Phase::Focus(1)), None);
    }

    #[test]
    fn reset_from_focus_stops() {
        assert_eq!(
            cue_for_change(Phase::Focus(2), Phase::Idle),
            Some(AudioCue::Stop)
        );
    }

    #[test]
    fn reset_from_paused_focus_stops() {
        assert_eq!(
            cue_for_change(Phase::Paused(ActivePhase::Focus(1)), Phase::Idle),
            Some(AudioCue::Stop)
        );
    }

    #[test]
    fn leaving_rests_for_idle_is_silent() {
        assert_eq!(cue_for_change(Phase::LongRest, Phase::Idle), None);
        assert_eq!(cue_for_change(Phase::Rest(1), Phase::Idle), None);
        assert_eq!(
            cue_for_change(Phase::Paused(ActivePhase::Rest(1)), Phase::Idle),
            None
        );
    }

    #[test]
    fn engine_reset_during_focus_stops_audio() {
        let mut cues = Vec::new();
        let t0 = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        {
            let sink = AudioCueSink::new(|cue: AudioCue| cues.push(cue));
            let mut engine = CycleEngine::new(CycleConfig::default(), sink);
            engine.start(t0);
            engine.reset();
        }
        assert_eq!(cues, vec![AudioCue::Play, AudioCue::Stop]);
    }

    #[test]
    fn sink_follows_engine() {
        let mut cues = Vec::new();
        let t0 = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        {
            let sink = AudioCueSink::new(|cue: AudioCue| cues.push(cue));
            let mut engine = CycleEngine::new(CycleConfig::default(), sink);
            engine.start(t0);
            engine.pause(t0 + Duration::seconds(60));
            engine.resume(t0 + Duration::seconds(120));
            engine.tick(t0 + Duration::seconds(60 + 1500));
            engine.reset();
        }
        assert_eq!(
            cues,
            vec![
                AudioCue::Play,
                AudioCue::Pause,
                AudioCue::Resume,
                AudioCue::Stop
            ]
        );
    }
}
