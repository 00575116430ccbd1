use bevy::prelude::*;

use crate::simulation::controller::{BodyControls, Command, Controller, RunState};
use crate::simulation::params::{lerp, SPEED_EPSILON};
use crate::simulation::states::NVec2;

/// Which arm the keyboard controls adjust while stopped
#[derive(Resource, Default)]
struct ControlCursor {
    body: usize,
}

/// Commands raised by UI widgets, drained by the next physics step
#[derive(Resource, Default)]
struct PendingCommands(Vec<Command>);

#[derive(Component)]
struct HudText;

#[derive(Component)]
struct RunButton;

#[derive(Component)]
struct RunButtonText;

/// Label and colours of the start/stop button for one run state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunButtonStyle {
    pub label: &'static str,
    pub fill: Color,
    pub border: Color,
}

pub fn run_button_style(state: RunState) -> RunButtonStyle {
    match state {
        RunState::Stopped => RunButtonStyle {
            label: "Start",
            fill: Color::srgb(0.0, 0.89, 0.19),
            border: Color::srgb(0.0, 0.46, 0.17),
        },
        RunState::Running => RunButtonStyle {
            label: "Stop",
            fill: Color::srgb(0.9, 0.16, 0.22),
            border: Color::srgb(0.3, 0.25, 0.18),
        },
    }
}

const PIVOT_RADIUS: f32 = 5.0;
const MIN_RADIUS: f64 = 4.0;
const MAX_RADIUS: f64 = 40.0;
const VIEW_SCALE: f32 = 1.5; // world units per screen pixel
const CONTROL_RATE: f64 = 0.25; // normalized control change per second of key hold
const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 50.0;

const ARM_COLOR: Color = Color::WHITE;
const PIVOT_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const BOB_COLOR: Color = Color::srgb(0.0, 0.47, 0.95);
const SELECTED_COLOR: Color = Color::srgb(1.0, 0.8, 0.0);

pub fn run_2d(controller: Controller) {
    info!("run_2d: starting Bevy 2D viewer with {} bodies", controller.bodies().len());

    App::new()
        .insert_resource(controller)
        .insert_resource(ClearColor(Color::BLACK))
        .init_resource::<ControlCursor>()
        .init_resource::<PendingCommands>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pendulum".into(),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                run_button_system,
                control_system,
                physics_step_system,
                run_button_style_system,
                draw_pendulum_system,
                hud_system,
            )
                .chain(),
        )
        .run();
}

fn setup_system(mut commands: Commands) {
    let mut camera = Camera2dBundle::default();
    camera.projection.scale = VIEW_SCALE;
    commands.spawn(camera);

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 22.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        }),
        HudText,
    ));

    let style = run_button_style(RunState::Stopped);
    commands
        .spawn((
            ButtonBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(50.0),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-0.5 * BUTTON_WIDTH)),
                    width: Val::Px(BUTTON_WIDTH),
                    height: Val::Px(BUTTON_HEIGHT),
                    border: UiRect::all(Val::Px(3.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: BackgroundColor(style.fill),
                border_color: BorderColor(style.border),
                ..default()
            },
            RunButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                TextBundle::from_section(
                    style.label,
                    TextStyle {
                        font_size: 28.0,
                        color: Color::WHITE,
                        ..default()
                    },
                ),
                RunButtonText,
            ));
        });
}

/// Clicking the start/stop button queues a toggle
fn run_button_system(
    buttons: Query<&Interaction, (Changed<Interaction>, With<RunButton>)>,
    mut pending: ResMut<PendingCommands>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            pending.0.push(Command::ToggleRun);
        }
    }
}

fn run_button_style_system(
    controller: Res<Controller>,
    mut buttons: Query<(&mut BackgroundColor, &mut BorderColor), With<RunButton>>,
    mut labels: Query<&mut Text, With<RunButtonText>>,
) {
    let style = run_button_style(controller.state());
    for (mut fill, mut border) in &mut buttons {
        fill.0 = style.fill;
        border.0 = style.border;
    }
    for mut text in &mut labels {
        text.sections[0].value = style.label.to_string();
    }
}

/// Keyboard stand-in for the per-arm sliders; only active while stopped
fn control_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut cursor: ResMut<ControlCursor>,
    mut controller: ResMut<Controller>,
) {
    if controller.is_running() {
        return;
    }

    let n = controller.controls().len();
    if n == 0 {
        return;
    }
    if keys.just_pressed(KeyCode::Tab) {
        cursor.body = (cursor.body + 1) % n;
    }
    cursor.body = cursor.body.min(n - 1);

    let step = CONTROL_RATE * time.delta_seconds_f64();
    let axis = |up: KeyCode, down: KeyCode| -> f64 {
        let mut delta = 0.0;
        if keys.pressed(up) {
            delta += step;
        }
        if keys.pressed(down) {
            delta -= step;
        }
        delta
    };
    let (d_mass, d_length, d_theta) = (
        axis(KeyCode::KeyQ, KeyCode::KeyA),
        axis(KeyCode::KeyW, KeyCode::KeyS),
        axis(KeyCode::KeyE, KeyCode::KeyD),
    );
    if d_mass == 0.0 && d_length == 0.0 && d_theta == 0.0 {
        return;
    }

    let current = controller.controls()[cursor.body];
    let moved = BodyControls {
        mass: current.mass + d_mass,
        length: current.length + d_length,
        theta: current.theta + d_theta,
    };
    controller.set_controls(cursor.body, moved);
}

fn physics_step_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut pending: ResMut<PendingCommands>,
    mut controller: ResMut<Controller>,
) {
    let mut commands = std::mem::take(&mut pending.0);
    if keys.just_pressed(KeyCode::Space) {
        commands.push(Command::ToggleRun);
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        commands.push(Command::SpeedUp);
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        commands.push(Command::SlowDown);
    }

    controller.tick(time.delta_seconds_f64(), &commands);
}

// Simulation space has y pointing down, Bevy has y pointing up
fn to_screen(p: NVec2) -> Vec2 {
    Vec2::new(p.x as f32, -p.y as f32)
}

fn draw_pendulum_system(
    controller: Res<Controller>,
    cursor: Res<ControlCursor>,
    mut gizmos: Gizmos,
) {
    let params = controller.parameters();
    let mut pivot = to_screen(controller.engine().origin);

    for (i, (pos, body)) in controller
        .world_positions()
        .into_iter()
        .zip(controller.bodies())
        .enumerate()
    {
        let bob = to_screen(pos);
        gizmos.line_2d(pivot, bob, ARM_COLOR);

        let radius = lerp(MIN_RADIUS, MAX_RADIUS, params.normalize_mass(body.mass)) as f32;
        let color = if !controller.is_running() && i == cursor.body {
            SELECTED_COLOR
        } else {
            BOB_COLOR
        };
        gizmos.circle_2d(bob, radius, color);
        pivot = bob;
    }

    gizmos.circle_2d(to_screen(controller.engine().origin), PIVOT_RADIUS, PIVOT_COLOR);
}

fn hud_system(
    controller: Res<Controller>,
    cursor: Res<ControlCursor>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = query.get_single_mut() else {
        return;
    };
    text.sections[0].value = hud_lines(&controller, cursor.body);
}

/// "Speed: 4X" at or above 1x, "Speed: 1/4X" below
pub fn speed_label(speedup: f64) -> String {
    if speedup >= 1.0 - SPEED_EPSILON {
        format!("Speed: {}X", speedup.round() as i64)
    } else {
        format!("Speed: 1/{}X", (1.0 / speedup).round() as i64)
    }
}

pub fn hud_lines(controller: &Controller, selected: usize) -> String {
    let mut lines = vec![
        speed_label(controller.speedup()),
        format!(
            "{}  (space: start/stop, left/right: speed)",
            if controller.is_running() { "Running" } else { "Stopped" }
        ),
        format!("Integrator: {}", controller.integrator().name()),
        format!("Initial energy: {:.0}", controller.initial_energy()),
        format!("Current energy: {:.0}", controller.energy()),
        match controller.energy_drift_percent() {
            Some(drift) => format!("Energy change: {drift:.6}%"),
            None => "Energy change: n/a".to_string(),
        },
    ];

    if !controller.is_running() {
        lines.push(String::new());
        lines.push("tab: next body, q/a mass, w/s length, e/d angle".to_string());
        for (i, body) in controller.bodies().iter().enumerate() {
            let marker = if i == selected { ">" } else { " " };
            lines.push(format!(
                "{marker} Body {i}  mass: {:.2} kg  length: {:.2} m  angle: {:.2}°",
                body.mass,
                body.length,
                body.theta.to_degrees().rem_euclid(360.0)
            ));
        }
    }

    lines.join("\n")
}
