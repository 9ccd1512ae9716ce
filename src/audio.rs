use crate::core::constants::*;
use crate::core::CueError;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Plays the short "water drop" cue on stage crossings.
///
/// One `AudioContext` is created lazily on first use and reused. Browsers
/// may refuse to start it before a user gesture; that surfaces as a
/// `CueError` the tracker logs and moves past.
pub struct CuePlayer {
    ctx: Option<web::AudioContext>,
    volume: f32,
}

impl CuePlayer {
    pub fn new(volume: f32) -> Self {
        Self { ctx: None, volume }
    }

    pub fn play(&mut self) -> Result<(), CueError> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        let ctx = self.context()?;
        if ctx.state() == web::AudioContextState::Suspended {
            match ctx.resume() {
                Ok(p) => settle(p, "resume"),
                Err(e) => return Err(CueError::Unavailable(format!("{:?}", e))),
            }
        }
        let now = ctx.current_time();
        falling_tone(
            ctx,
            now,
            CUE_DROP_START_HZ,
            CUE_DROP_END_HZ,
            CUE_DROP_SWEEP_SEC,
            CUE_DROP_LEN_SEC,
            self.volume,
        )?;
        // Second, shorter "plop" right after the drop
        falling_tone(
            ctx,
            now + CUE_PLOP_DELAY_SEC,
            CUE_PLOP_START_HZ,
            CUE_PLOP_END_HZ,
            CUE_PLOP_SWEEP_SEC,
            CUE_PLOP_LEN_SEC,
            self.volume * 0.6,
        )
    }

    fn context(&mut self) -> Result<&web::AudioContext, CueError> {
        if self.ctx.is_none() {
            let ctx = web::AudioContext::new()
                .map_err(|e| CueError::Unavailable(format!("{:?}", e)))?;
            log::info!("[audio] cue context created");
            self.ctx = Some(ctx);
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| CueError::Unavailable("no context".into()))
    }

    pub fn close(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            match ctx.close() {
                Ok(p) => settle(p, "close"),
                Err(e) => log::warn!("[audio] close failed: {:?}", e),
            }
        }
    }
}

/// Await an audio context promise off the hot path; a rejection (e.g. no
/// user gesture yet) is logged rather than left unhandled.
fn settle(promise: js_sys::Promise, what: &'static str) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[audio] {} rejected: {:?}", what, e);
        }
    });
}

fn falling_tone(
    ctx: &web::AudioContext,
    t0: f64,
    start_hz: f32,
    end_hz: f32,
    sweep_sec: f64,
    len_sec: f64,
    peak: f32,
) -> Result<(), CueError> {
    let playback = |e: wasm_bindgen::JsValue| CueError::Playback(format!("{:?}", e));

    let osc = web::OscillatorNode::new(ctx).map_err(playback)?;
    osc.set_type(web::OscillatorType::Sine);
    let gain = web::GainNode::new(ctx).map_err(playback)?;

    osc.frequency()
        .set_value_at_time(start_hz, t0)
        .map_err(playback)?;
    osc.frequency()
        .exponential_ramp_to_value_at_time(end_hz, t0 + sweep_sec)
        .map_err(playback)?;

    // Fast attack, exponential tail down to near silence
    gain.gain().set_value_at_time(0.0, t0).map_err(playback)?;
    gain.gain()
        .linear_ramp_to_value_at_time(peak, t0 + 0.01)
        .map_err(playback)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, t0 + len_sec)
        .map_err(playback)?;

    osc.connect_with_audio_node(&gain).map_err(playback)?;
    gain.connect_with_audio_node(&ctx.destination())
        .map_err(playback)?;
    osc.start_with_when(t0).map_err(playback)?;
    osc.stop_with_when(t0 + len_sec).map_err(playback)?;
    Ok(())
}
