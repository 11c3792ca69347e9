//! Scene painters
//!
//! [`draw_frame`] paints a [`SceneState`] back-to-front onto any [`Canvas`]. Painters
//! only read the state; every random wobble was already rolled by the simulation.

use glam::Vec2;

use super::canvas::{Canvas, Stroke, with_alpha};
use super::vertex::colors;
use crate::consts::{CRACK_WIDTH, STROKE_WIDTH};
use crate::settings::Settings;
use crate::sim::{
    AnxietyMark, ArmPose, Crack, FallenPose, Figure, Phase, Pose, SceneState, Shard, Thought,
    start_button_center, start_button_diameter, start_button_hit,
};

/// Figure proportions (pixels, relative to the hips)
const HEAD_CENTER: Vec2 = Vec2::new(0.0, -60.0);
const HEAD_RADIUS: f32 = 15.0;
const NECK: Vec2 = Vec2::new(0.0, -45.0);
const SHOULDERS: Vec2 = Vec2::new(0.0, -35.0);
const ARM_LENGTH: f32 = 30.0;
const LEG_SPREAD: f32 = 20.0;
const LEG_LENGTH: f32 = 40.0;

const BODY_STROKE: Stroke = Stroke::new(colors::FIGURE_BODY, STROKE_WIDTH);

/// Paint one frame for the current phase
pub fn draw_frame(state: &SceneState, settings: &Settings, canvas: &mut impl Canvas) {
    match state.phase {
        Phase::Idle => {
            draw_room(canvas);
            draw_start_button(state, canvas);
        }
        Phase::Escalating => {
            draw_room(canvas);
            draw_escalation(state, settings, canvas);
            draw_figure(&state.figure, canvas);
        }
        Phase::Exploding => {
            canvas.background(colors::AFTERMATH);
            for shard in state.shards.iter().filter(|s| s.is_active()) {
                draw_shard(shard, canvas);
            }
        }
        Phase::Fallen => {
            canvas.background(colors::AFTERMATH);
            draw_fallen_figure(&state.figure, canvas);
            let alpha = state.fade_alpha();
            if alpha > 0.0 {
                canvas.fill_rect(Vec2::ZERO, canvas.size(), with_alpha(colors::OVERLAY, alpha));
            }
        }
    }
}

/// A plain room: wall, floor, a window and a door
pub fn draw_room(canvas: &mut impl Canvas) {
    let size = canvas.size();
    let at = |fx: f32, fy: f32| Vec2::new(size.x * fx, size.y * fy);

    canvas.background(colors::ROOM_WALL);
    canvas.fill_rect(at(0.0, 0.75), at(1.0, 0.25), colors::ROOM_FLOOR);

    // Window with cross bars
    let frame = Stroke::new(colors::WINDOW_FRAME, STROKE_WIDTH);
    let (origin, extent) = (at(0.1, 0.2), at(0.3, 0.3));
    canvas.fill_rect(origin, extent, colors::WINDOW_PANE);
    canvas.stroke_path(
        &[
            origin,
            origin + Vec2::new(extent.x, 0.0),
            origin + extent,
            origin + Vec2::new(0.0, extent.y),
        ],
        true,
        frame,
    );
    canvas.line(at(0.1, 0.35), at(0.4, 0.35), frame);
    canvas.line(at(0.25, 0.2), at(0.25, 0.5), frame);

    canvas.fill_rect(at(0.75, 0.55), at(0.15, 0.4), colors::DOOR);
}

/// Pulsing start button, highlighted while hovered
pub fn draw_start_button(state: &SceneState, canvas: &mut impl Canvas) {
    let diameter = start_button_diameter(state.frame);
    let hovered = state
        .pointer
        .is_some_and(|p| start_button_hit(state.bounds, state.frame, p));
    let color = if hovered {
        colors::BUTTON_HOVER
    } else {
        colors::BUTTON
    };
    canvas.fill_ellipse(
        start_button_center(state.bounds),
        Vec2::splat(diameter / 2.0),
        color,
    );
}

fn draw_escalation(state: &SceneState, settings: &Settings, canvas: &mut impl Canvas) {
    canvas.push();
    if settings.screen_shake {
        canvas.translate(state.shake_offset);
    }

    for mark in &state.marks {
        draw_mark(mark, canvas);
    }

    if state.darkness > 0.0 {
        canvas.fill_rect(
            Vec2::ZERO,
            canvas.size(),
            with_alpha(colors::OVERLAY, state.darkness),
        );
    }

    if state.stage >= state.tuning.crack_visible_stage {
        for crack in &state.cracks {
            draw_crack(crack, canvas);
        }
    }

    if settings.thoughts {
        for thought in &state.thoughts {
            draw_thought(thought, canvas);
        }
    }

    canvas.pop();
}

fn draw_mark(mark: &AnxietyMark, canvas: &mut impl Canvas) {
    canvas.stroke_path(&mark.outline(), true, Stroke::new(colors::MARK, STROKE_WIDTH));
}

fn draw_crack(crack: &Crack, canvas: &mut impl Canvas) {
    if crack.points.len() < 2 {
        return;
    }
    canvas.stroke_path(&crack.points, false, Stroke::new(colors::CRACK, CRACK_WIDTH));
}

fn draw_shard(shard: &Shard, canvas: &mut impl Canvas) {
    let outline = shard.outline();
    canvas.fill_polygon(&outline, with_alpha(colors::SHARD_FILL, shard.opacity));
    canvas.stroke_path(
        &outline,
        true,
        Stroke::new(with_alpha(colors::SHARD_EDGE, shard.opacity), STROKE_WIDTH),
    );
}

fn draw_thought(thought: &Thought, canvas: &mut impl Canvas) {
    let alpha = thought.opacity();
    if alpha <= 0.0 {
        return;
    }
    let size = thought.size();
    let color = with_alpha(colors::THOUGHT, alpha * 0.8);

    canvas.stroke_ellipse(
        thought.pos,
        Vec2::new(size * 1.3, size),
        Stroke::new(color, STROKE_WIDTH),
    );
    // Trailing bubbles toward the lower left
    canvas.fill_ellipse(
        thought.pos + Vec2::new(-size * 1.1, size * 1.2),
        Vec2::splat(size * 0.25),
        color,
    );
    canvas.fill_ellipse(
        thought.pos + Vec2::new(-size * 1.6, size * 1.8),
        Vec2::splat(size * 0.15),
        color,
    );
}

fn draw_head_and_body(canvas: &mut impl Canvas) {
    canvas.fill_ellipse(HEAD_CENTER, Vec2::splat(HEAD_RADIUS), colors::FIGURE_HEAD);
    canvas.stroke_ellipse(HEAD_CENTER, Vec2::splat(HEAD_RADIUS), BODY_STROKE);
    canvas.line(NECK, Vec2::ZERO, BODY_STROKE);
}

/// Standing figure, collapsing with the stage
pub fn draw_figure(figure: &Figure, canvas: &mut impl Canvas) {
    let pose: Pose = figure.pose();

    canvas.push();
    canvas.translate(figure.origin());
    canvas.rotate(pose.rotation);

    draw_head_and_body(canvas);
    match pose.arms {
        ArmPose::Raised { angle } => {
            let reach = Vec2::new(angle.cos(), angle.sin()) * ARM_LENGTH;
            canvas.line(SHOULDERS, SHOULDERS + Vec2::new(-reach.x, reach.y), BODY_STROKE);
            canvas.line(SHOULDERS, SHOULDERS + reach, BODY_STROKE);
        }
        ArmPose::Collapsed => {
            let left = Vec2::new(-15.0, -60.0);
            let right = Vec2::new(15.0, -60.0);
            canvas.line(SHOULDERS, left, BODY_STROKE);
            canvas.line(SHOULDERS, right, BODY_STROKE);
            canvas.line(left, right, BODY_STROKE);
        }
    }

    let (sin, cos) = pose.leg_angle.sin_cos();
    canvas.line(
        Vec2::ZERO,
        Vec2::new(-LEG_SPREAD * cos, LEG_LENGTH * sin),
        BODY_STROKE,
    );
    canvas.line(
        Vec2::ZERO,
        Vec2::new(LEG_SPREAD * cos, LEG_LENGTH * sin),
        BODY_STROKE,
    );

    canvas.pop();
}

/// Figure lying on the floor after the explosion
pub fn draw_fallen_figure(figure: &Figure, canvas: &mut impl Canvas) {
    let pose: FallenPose = figure.fallen_pose();

    canvas.push();
    canvas.translate(figure.anchor);
    canvas.rotate(pose.rotation);
    canvas.translate(Vec2::new(0.0, pose.drop));

    draw_head_and_body(canvas);
    canvas.line(SHOULDERS, Vec2::new(-15.0, -50.0), BODY_STROKE);
    canvas.line(SHOULDERS, Vec2::new(15.0, -50.0), BODY_STROKE);
    canvas.line(Vec2::ZERO, Vec2::new(-20.0, 10.0), BODY_STROKE);
    canvas.line(Vec2::ZERO, Vec2::new(20.0, 10.0), BODY_STROKE);

    canvas.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::{DrawCommand, RecordingCanvas};
    use crate::sim::{TickInput, advance_stage, tick};

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn render(state: &SceneState, settings: &Settings) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(state.bounds);
        draw_frame(state, settings, &mut canvas);
        canvas
    }

    fn start(state: &mut SceneState) {
        let input = TickInput {
            click: Some(start_button_center(state.bounds)),
            ..Default::default()
        };
        tick(state, &input);
    }

    fn position(canvas: &RecordingCanvas, pred: impl Fn(&DrawCommand) -> bool) -> Option<usize> {
        canvas.commands.iter().position(pred)
    }

    #[test]
    fn test_idle_draws_room_then_button() {
        let state = SceneState::new(1, BOUNDS);
        let canvas = render(&state, &Settings::default());

        assert_eq!(canvas.commands[0], DrawCommand::Background(colors::ROOM_WALL));
        match canvas.commands.last() {
            Some(DrawCommand::FillEllipse { center, color, .. }) => {
                assert_eq!(*center, BOUNDS / 2.0);
                assert_eq!(*color, colors::BUTTON);
            }
            other => panic!("expected button, got {:?}", other),
        }
    }

    #[test]
    fn test_button_hover_color() {
        let mut state = SceneState::new(2, BOUNDS);
        state.pointer = Some(BOUNDS / 2.0);
        let canvas = render(&state, &Settings::default());
        assert!(matches!(
            canvas.commands.last(),
            Some(DrawCommand::FillEllipse { color, .. }) if *color == colors::BUTTON_HOVER
        ));
    }

    #[test]
    fn test_hovered_button_accepts_click() {
        // Pointer sits inside the drawn button but outside the next frame's
        let frame = (0..200u64)
            .find(|&f| start_button_diameter(f) - start_button_diameter(f + 1) > 0.2)
            .unwrap();
        let radius = (start_button_diameter(frame) + start_button_diameter(frame + 1)) / 4.0;
        let p = BOUNDS / 2.0 + Vec2::new(0.0, radius);

        let mut state = SceneState::new(8, BOUNDS);
        state.frame = frame;
        state.pointer = Some(p);
        let canvas = render(&state, &Settings::default());
        assert!(matches!(
            canvas.commands.last(),
            Some(DrawCommand::FillEllipse { color, .. }) if *color == colors::BUTTON_HOVER
        ));

        let input = TickInput {
            pointer: Some(p),
            click: Some(p),
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, Phase::Escalating);
    }

    #[test]
    fn test_escalation_is_back_to_front() {
        let mut state = SceneState::new(3, BOUNDS);
        start(&mut state);
        for _ in 0..6 {
            advance_stage(&mut state);
        }
        // Grow cracks and darkness a little
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        let canvas = render(&state, &Settings::default());

        let room = position(&canvas, |c| *c == DrawCommand::Background(colors::ROOM_WALL))
            .expect("room");
        let mark = position(&canvas, |c| {
            matches!(c, DrawCommand::StrokePath { stroke, closed: true, .. } if stroke.color == colors::MARK)
        })
        .expect("mark");
        let overlay = position(&canvas, |c| {
            matches!(c, DrawCommand::FillRect { color, .. } if color[..3] == colors::OVERLAY[..3])
        })
        .expect("overlay");
        let crack = position(&canvas, |c| {
            matches!(c, DrawCommand::StrokePath { stroke, closed: false, .. } if stroke.color == colors::CRACK)
        })
        .expect("crack");
        let head = position(&canvas, |c| {
            matches!(c, DrawCommand::FillEllipse { color, .. } if *color == colors::FIGURE_HEAD)
        })
        .expect("figure");

        assert!(room < mark);
        assert!(mark < overlay);
        assert!(overlay < crack);
        assert!(crack < head);
    }

    #[test]
    fn test_screen_shake_toggle() {
        let mut state = SceneState::new(4, BOUNDS);
        start(&mut state);
        advance_stage(&mut state);
        tick(&mut state, &TickInput::default());

        let shaken = render(&state, &Settings::default());
        assert!(shaken.commands.contains(&DrawCommand::Translate(state.shake_offset)));

        let calm = Settings {
            screen_shake: false,
            ..Settings::default()
        };
        let still = render(&state, &calm);
        // Only the figure translation remains
        let translates = still
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Translate(_)))
            .count();
        assert_eq!(translates, 1);
    }

    #[test]
    fn test_thoughts_toggle() {
        let mut state = SceneState::new(5, BOUNDS);
        start(&mut state);
        state
            .thoughts
            .push(Thought::new(Vec2::new(100.0, 100.0), &mut rand_pcg::Pcg32::new(1, 1)));

        let count_thoughts = |canvas: &RecordingCanvas| {
            canvas
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::StrokeEllipse { stroke, .. } if stroke.color[..3] == colors::THOUGHT[..3]))
                .count()
        };
        assert_eq!(count_thoughts(&render(&state, &Settings::default())), 1);
        let hidden = Settings {
            thoughts: false,
            ..Settings::default()
        };
        assert_eq!(count_thoughts(&render(&state, &hidden)), 0);
    }

    #[test]
    fn test_explosion_draws_active_shards_only() {
        let mut state = SceneState::new(6, BOUNDS);
        start(&mut state);
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, Phase::Exploding);
        state.shards[0].opacity = 0.0;

        let canvas = render(&state, &Settings::default());
        assert_eq!(canvas.visible()[0], DrawCommand::Background(colors::AFTERMATH));
        let polygons = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
            .count();
        assert_eq!(polygons, 59);
    }

    #[test]
    fn test_fallen_fades_to_black() {
        let mut state = SceneState::new(7, BOUNDS);
        state.phase = Phase::Fallen;
        state.figure.collapse_progress = 1.0;

        state.fade_timer = 10;
        let early = render(&state, &Settings::default());
        assert!(!early.commands.iter().any(|c| matches!(c, DrawCommand::FillRect { .. })));
        assert!(early.commands.contains(&DrawCommand::Rotate(state.figure.fallen_pose().rotation)));

        state.fade_timer = 300;
        let late = render(&state, &Settings::default());
        match late.commands.last() {
            Some(DrawCommand::FillRect { color, size, .. }) => {
                assert_eq!(*size, BOUNDS);
                assert!(color[3] > 0.5);
            }
            other => panic!("expected overlay, got {:?}", other),
        }
    }

    #[test]
    fn test_collapsed_arms_drawn_above_threshold() {
        let mut figure = Figure::new(BOUNDS);
        figure.collapse_progress = 0.8;
        let mut canvas = RecordingCanvas::new(BOUNDS);
        draw_figure(&figure, &mut canvas);
        let crossbar = DrawCommand::StrokePath {
            points: vec![Vec2::new(-15.0, -60.0), Vec2::new(15.0, -60.0)],
            closed: false,
            stroke: BODY_STROKE,
        };
        assert!(canvas.commands.contains(&crossbar));
        assert_eq!(canvas.commands.first(), Some(&DrawCommand::Push));
        assert_eq!(canvas.commands.last(), Some(&DrawCommand::Pop));
    }
}
