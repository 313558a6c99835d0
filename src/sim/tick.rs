//! Single-step worm update
//!
//! Advances a [`WormState`] by exactly one head position. Pure apart from the
//! draws taken from the [`TurnSource`]: the same state, bounds and draws always
//! produce the same result.

use glam::Vec2;

use super::field::FieldBounds;
use super::random::TurnSource;
use super::state::WormState;
use crate::settings::WormConfig;
use crate::{normalize_azimuth, step_vector};

/// Which branch a tick took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Head was outside the inset rectangle and moved toward the centre
    Recovered,
    /// Regular random-walk step
    Stepped {
        /// A new leg (turn + duration) was drawn this tick
        new_leg: bool,
        reflected_x: bool,
        reflected_y: bool,
    },
}

/// Advance the worm by one tick
pub fn tick(
    state: &mut WormState,
    field: &FieldBounds,
    config: &WormConfig,
    turns: &mut impl TurnSource,
) -> TickOutcome {
    let head = state.head();

    // Head left the field (shrinking resize) - head for the centre
    if !field.contains(head) {
        let new_head = head + recovery_step(head, field.center(), config.step_length);
        log::debug!(
            "Head {:?} outside field, recovering toward {:?} -> {:?}",
            head,
            field.center(),
            new_head
        );
        state.advance_head(new_head);
        return TickOutcome::Recovered;
    }

    let new_leg = state.steps_left == 0;
    if new_leg {
        let delta = turns.turn_delta(config.max_yaw);
        state.azimuth = normalize_azimuth(state.azimuth + delta);
        state.step = step_vector(state.azimuth, config.step_length);
        state.steps_left =
            turns.leg_length(config.min_steps_before_turn, config.max_steps_before_turn);
        log::debug!(
            "New leg: turn {:+} -> azimuth {}, {} steps",
            delta,
            state.azimuth,
            state.steps_left
        );
    }
    state.steps_left = state.steps_left.saturating_sub(1);

    let candidate = head + state.step;
    let mut new_head = candidate;

    let reflected_x = match reflect_component(candidate.x, state.step.x, field.min_x(), field.max_x()) {
        Some(x) => {
            new_head.x = x;
            state.step.x = -state.step.x;
            state.azimuth = reflect_azimuth_x(state.azimuth);
            log::trace!("Bounce on X at {:.1}, azimuth -> {}", candidate.x, state.azimuth);
            true
        }
        None => false,
    };

    let reflected_y = match reflect_component(candidate.y, state.step.y, field.min_y(), field.max_y()) {
        Some(y) => {
            new_head.y = y;
            state.step.y = -state.step.y;
            state.azimuth = reflect_azimuth_y(state.azimuth);
            log::trace!("Bounce on Y at {:.1}, azimuth -> {}", candidate.y, state.azimuth);
            true
        }
        None => false,
    };

    state.advance_head(new_head);

    TickOutcome::Stepped {
        new_leg,
        reflected_x,
        reflected_y,
    }
}

/// Mirror an out-of-range coordinate back by the step that overshot
///
/// Returns `None` when `candidate` is already within `[min, max]`.
#[inline]
pub fn reflect_component(candidate: f32, step: f32, min: f32, max: f32) -> Option<f32> {
    if candidate < min || candidate > max {
        Some(candidate - 2.0 * step)
    } else {
        None
    }
}

/// Heading after bouncing off a vertical (X) edge
#[inline]
pub fn reflect_azimuth_x(azimuth: i32) -> i32 {
    let pivot = if azimuth <= 180 { 180 } else { 540 };
    normalize_azimuth(pivot - azimuth)
}

/// Heading after bouncing off a horizontal (Y) edge
#[inline]
pub fn reflect_azimuth_y(azimuth: i32) -> i32 {
    normalize_azimuth(360 - azimuth)
}

/// Offset moving `head` up to one step toward `center` on each axis
///
/// Each component is `±step_length` by the sign of `center - head`, zero when
/// aligned, and never carries the head past the centre on that axis. The cap
/// is a deliberate change from a plain `signum * step_length` move, which can
/// overshoot the centre and leave the head no closer than before.
pub fn recovery_step(head: Vec2, center: Vec2, step_length: f32) -> Vec2 {
    let toward = |h: f32, c: f32| -> f32 {
        let gap = c - h;
        if gap > 0.0 {
            step_length.min(gap)
        } else if gap < 0.0 {
            -step_length.min(-gap)
        } else {
            0.0
        }
    };
    Vec2::new(toward(head.x, center.x), toward(head.y, center.y))
}
