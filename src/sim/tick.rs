//! Per-frame simulation tick
//!
//! Drives the phase machine `Idle → Escalating → Exploding → Fallen → Idle` and the
//! stage controller that populates the scene.

use glam::Vec2;
use rand::Rng;

use super::crack::Crack;
use super::entity::{advance_all, jitter, random_point};
use super::mark::AnxietyMark;
use super::shard::Shard;
use super::state::{Phase, SceneState};
use super::thought::Thought;
use crate::consts::{BUTTON_MAX_DIAMETER, BUTTON_MIN_DIAMETER, BUTTON_PULSE_RATE};
use crate::map_range;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Current pointer position, if the pointer is over the canvas
    pub pointer: Option<Vec2>,
    /// Click position, if a click happened since the last tick
    pub click: Option<Vec2>,
}

/// Start button diameter at a given frame (pulses between 20 and 40 px)
pub fn start_button_diameter(frame: u64) -> f32 {
    let wave = (frame as f32 * BUTTON_PULSE_RATE).sin();
    map_range(wave, -1.0, 1.0, BUTTON_MIN_DIAMETER, BUTTON_MAX_DIAMETER)
}

/// Start button center (canvas center)
#[inline]
pub fn start_button_center(bounds: Vec2) -> Vec2 {
    bounds / 2.0
}

/// True if `point` is within the button's current hit radius
pub fn start_button_hit(bounds: Vec2, frame: u64, point: Vec2) -> bool {
    point.distance(start_button_center(bounds)) < start_button_diameter(frame) / 2.0
}

/// Advance the scene by one frame
pub fn tick(state: &mut SceneState, input: &TickInput) {
    // Clicks are judged against the frame that was on screen when they happened
    let shown_frame = state.frame;
    state.frame += 1;
    if input.pointer.is_some() {
        state.pointer = input.pointer;
    }

    match state.phase {
        Phase::Idle => {
            if let Some(click) = input.click {
                if start_button_hit(state.bounds, shown_frame, click) {
                    enter_phase(state, Phase::Escalating);
                }
            }
        }

        Phase::Escalating => {
            let max_stage = state.tuning.max_stage;

            // Automatic stage progression
            if state.stage < max_stage {
                state.stage_timer += 1;
                if state.stage_timer >= state.tuning.stage_interval {
                    state.stage_timer = 0;
                    advance_stage(state);
                }
            }

            // Darkness lags behind the stage
            let target = state.tuning.darkness_target(state.stage);
            if state.darkness < target {
                state.darkness = (state.darkness + state.tuning.darkness_step).min(target);
            }

            let shake = state.shake_factor();
            state.shake_offset = Vec2::new(jitter(&mut state.rng, shake), jitter(&mut state.rng, shake));

            if state.stage < max_stage {
                let ctx = state.tick_ctx();
                advance_all(&mut state.marks, &ctx, &mut state.rng);
                if state.stage >= state.tuning.crack_visible_stage {
                    advance_all(&mut state.cracks, &ctx, &mut state.rng);
                }
                advance_all(&mut state.thoughts, &ctx, &mut state.rng);
            }

            state
                .figure
                .update(state.stage, max_stage, shake, &mut state.rng);

            if state.stage >= max_stage && !state.explosion_started {
                spawn_shards(state);
                state.explosion_started = true;
                enter_phase(state, Phase::Exploding);
            }
        }

        Phase::Exploding => {
            let ctx = state.tick_ctx();
            advance_all(&mut state.shards, &ctx, &mut state.rng);
            if !state.has_active_shards() {
                state.fade_timer = 0;
                enter_phase(state, Phase::Fallen);
            }
        }

        Phase::Fallen => {
            state.figure.fall_down(state.tuning.fall_step);
            state.fade_timer += 1;
            if state.fade_timer >= state.tuning.final_sequence_ticks() {
                log::info!("Cycle complete after {} frames, resetting", state.frame);
                state.reset();
            }
        }
    }
}

/// Raise the stage by one and spawn the marks, cracks and thoughts it brings.
///
/// No-op once the stage is at its maximum.
pub fn advance_stage(state: &mut SceneState) {
    if state.stage >= state.tuning.max_stage {
        return;
    }
    state.stage += 1;
    let stage = state.stage;
    let bounds = state.bounds;
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let new_marks = stage * tuning.marks_per_stage;
    for _ in 0..new_marks {
        let center = random_point(rng, bounds);
        let size = rng.random_range(tuning.mark_min_size..=tuning.mark_max_size);
        state.marks.push(AnxietyMark::new(center, size, rng));
    }

    let mut new_cracks = 0;
    if stage >= tuning.crack_spawn_stage {
        new_cracks = stage * tuning.cracks_per_stage;
        for _ in 0..new_cracks {
            let origin = random_point(rng, bounds);
            state.cracks.push(Crack::new(origin, rng));
        }
    }

    let mut new_thoughts = 0;
    if tuning.max_thoughts_per_stage > 0 && rng.random_bool(tuning.thought_spawn_chance) {
        new_thoughts = rng.random_range(1..=tuning.max_thoughts_per_stage);
        for _ in 0..new_thoughts {
            let pos = random_point(rng, bounds);
            state.thoughts.push(Thought::new(pos, rng));
        }
    }

    log::debug!(
        "Stage {}/{}: +{} marks, +{} cracks, +{} thoughts",
        stage,
        tuning.max_stage,
        new_marks,
        new_cracks,
        new_thoughts
    );
}

/// Spawn the explosion burst across the top half of the canvas
fn spawn_shards(state: &mut SceneState) {
    let count = state.tuning.shard_count;
    let (damping, fade) = (state.tuning.shard_damping, state.tuning.shard_fade);
    let area = Vec2::new(state.bounds.x, state.bounds.y / 2.0);
    for _ in 0..count {
        let pos = random_point(&mut state.rng, area);
        state
            .shards
            .push(Shard::new(pos, damping, fade, &mut state.rng));
    }
    log::info!("Explosion: {} shards", count);
}

fn enter_phase(state: &mut SceneState, phase: Phase) {
    log::info!("Phase {:?} -> {:?} (frame {})", state.phase, phase, state.frame);
    state.phase = phase;
}
