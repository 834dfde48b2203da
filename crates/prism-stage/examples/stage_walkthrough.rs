//! Prism Stage Walkthrough Example
//!
//! Drives a slider and a checkbox through a synthetic pointer session
//! (no window needed) and prints every signal the widgets emit:
//! - hover enter/exit while the pointer roams
//! - capture and live value changes while the slider is dragged
//! - click/toggle on release
//!
//! Run with: cargo run -p prism-stage --example stage_walkthrough

use glam::{Affine2, Vec2};
use winit::event::{ElementState, MouseButton};

use prism_stage::prelude::*;

const SLIDER_SHEET: &str = r#"{
    "frames": {
        "Line_Cap_Left": { "frame": { "x": 0, "y": 0, "w": 4, "h": 4 } },
        "Line_Cap_Right": { "frame": { "x": 4, "y": 0, "w": 4, "h": 4 } },
        "Line": { "frame": { "x": 8, "y": 0, "w": 8, "h": 4 } },
        "Pill": { "frame": { "x": 16, "y": 0, "w": 20, "h": 10 } },
        "Pill_Active": { "frame": { "x": 36, "y": 0, "w": 20, "h": 10 } },
        "Pill_Hover": { "frame": { "x": 56, "y": 0, "w": 20, "h": 10 } }
    },
    "meta": { "image": "slider.png" }
}"#;

const CHECKBOX_SHEET: &str = r#"{
    "frames": {
        "Checked": { "frame": { "x": 0, "y": 0, "w": 16, "h": 16 } },
        "Checked_Hover": { "frame": { "x": 16, "y": 0, "w": 16, "h": 16 } },
        "Unchecked": { "frame": { "x": 32, "y": 0, "w": 16, "h": 16 } },
        "Unchecked_Hover": { "frame": { "x": 48, "y": 0, "w": 16, "h": 16 } }
    }
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut stage = StageManager::new();
    stage.register_atlas("slider", &SpriteSheet::from_json(SLIDER_SHEET)?)?;
    stage.register_atlas("checkbox", &SpriteSheet::from_json(CHECKBOX_SHEET)?)?;

    let slider = Slider::new(
        SliderConfig {
            id: "volume".into(),
            placement: Affine2::from_translation(Vec2::new(20.0, 20.0)),
            width: 120.0,
            min: 0.0,
            max: 10.0,
            ..SliderConfig::default()
        },
        stage.atlas("slider")?.clone(),
    )?;
    slider
        .value_changed
        .connect(|value| println!("volume -> {value:.2}"));
    slider
        .base()
        .signals
        .hover_entered
        .connect(|_| println!("volume: hover enter"));
    slider
        .base()
        .signals
        .hover_exited
        .connect(|_| println!("volume: hover exit"));
    let slider_id = stage.scene_mut().add(Box::new(slider));

    let checkbox = Checkbox::new(
        CheckboxConfig {
            id: "mute".into(),
            placement: Affine2::from_translation(Vec2::new(20.0, 60.0)),
            ..CheckboxConfig::default()
        },
        stage.atlas("checkbox")?.clone(),
    )?;
    checkbox
        .toggled
        .connect(|checked| println!("mute -> {checked}"));
    stage.scene_mut().add(Box::new(checkbox));

    // A synthetic pointer session: roam over the slider, grab the pill,
    // drag right, release, then click the checkbox.
    let script: &[(f32, f32, Option<ElementState>)] = &[
        (10.0, 10.0, None),
        (25.0, 25.0, None),                              // hover the pill
        (25.0, 25.0, Some(ElementState::Pressed)),       // grab it
        (60.0, 25.0, None),                              // drag
        (95.0, 25.0, None),                              // drag further
        (95.0, 25.0, Some(ElementState::Released)),      // let go
        (28.0, 68.0, None),                              // over the checkbox
        (28.0, 68.0, Some(ElementState::Pressed)),
        (28.0, 68.0, Some(ElementState::Released)),
        (200.0, 200.0, None),                            // leave everything
    ];

    for &(x, y, button) in script {
        stage.tracker_mut().handle_cursor_moved(Vec2::new(x, y));
        if let Some(state) = button {
            stage
                .tracker_mut()
                .handle_mouse_input(state, MouseButton::Left);
        }
        stage.frame();
    }

    let slider_alive = stage.scene().get(slider_id).is_some();
    println!("session over; slider still in scene: {slider_alive}");

    Ok(())
}
