//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{GameEvent, SoundCue};

/// Footstep loop nodes, kept so the loop can be stopped
struct WalkLoop {
    tone: OscillatorNode,
    lfo: OscillatorNode,
    _gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    walk: Option<WalkLoop>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            walk: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Effective volume (0.0 - 1.0), already folded with mute
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        if self.volume <= 0.0 {
            self.stop_walk();
        }
    }

    /// React to the sound-related events of one tick
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PlaySound(cue) => self.play(cue),
            GameEvent::LoopSound(SoundCue::Walk) => self.start_walk(),
            GameEvent::StopSound(SoundCue::Walk) => self.stop_walk(),
            _ => {}
        }
    }

    /// Silence everything (scene change)
    pub fn stop_all(&mut self) {
        self.stop_walk();
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Collect => self.play_collect(ctx, vol),
            SoundCue::Jump => self.play_jump(ctx, vol),
            SoundCue::Hit => self.play_hit(ctx, vol),
            SoundCue::Walk => {}
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Star collected - bright two-note chime
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [880.0, 1320.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let start = t + i as f64 * 0.06;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.2).ok();
        }
    }

    /// Jump - rising square blip
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Hit - falling sawtooth crunch with a bass thump
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Footsteps - low tone gated by a square LFO, runs until stopped
    fn start_walk(&mut self) {
        if self.walk.is_some() || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some((tone, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Triangle) else {
            return;
        };
        let Ok(lfo) = ctx.create_oscillator() else {
            return;
        };
        let Ok(depth) = ctx.create_gain() else {
            return;
        };

        // Gain swings between 0 and 2 * depth at the step rate
        gain.gain().set_value(self.volume * 0.08);
        depth.gain().set_value(self.volume * 0.08);
        lfo.set_type(OscillatorType::Square);
        lfo.frequency().set_value(6.0);
        if lfo.connect_with_audio_node(&depth).is_err()
            || depth.connect_with_audio_param(&gain.gain()).is_err()
        {
            return;
        }

        tone.start().ok();
        lfo.start().ok();
        self.walk = Some(WalkLoop {
            tone,
            lfo,
            _gain: gain,
        });
    }

    fn stop_walk(&mut self) {
        if let Some(walk) = self.walk.take() {
            walk.tone.stop().ok();
            walk.lfo.stop().ok();
        }
    }
}
