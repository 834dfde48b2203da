use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use glam::Vec2;

use crate::scene::{InteractionPoint, PointId, PointerKind, Scene, Sprite};
use crate::sheet::{TextureMap, TextureRegion};
use crate::StageError;

use super::*;

fn region(w: f32, h: f32) -> TextureRegion {
    TextureRegion { x: 0.0, y: 0.0, w, h }
}

fn slider_textures() -> TextureMap {
    let mut map = TextureMap::new();
    map.insert("Line_Cap_Left".to_string(), region(4.0, 4.0));
    map.insert("Line_Cap_Right".to_string(), region(4.0, 4.0));
    map.insert("Line".to_string(), region(8.0, 4.0));
    map.insert("Pill".to_string(), region(20.0, 10.0));
    map.insert("Pill_Active".to_string(), region(20.0, 10.0));
    map.insert("Pill_Hover".to_string(), region(20.0, 10.0));
    map
}

fn checkbox_textures() -> TextureMap {
    let mut map = TextureMap::new();
    map.insert("Checked".to_string(), region(16.0, 16.0));
    map.insert("Checked_Hover".to_string(), region(16.0, 16.0));
    map.insert("Unchecked".to_string(), region(16.0, 16.0));
    map.insert("Unchecked_Hover".to_string(), region(16.0, 16.0));
    map
}

fn button_textures() -> TextureMap {
    let mut map = TextureMap::new();
    map.insert("Active".to_string(), region(32.0, 12.0));
    map.insert("Active_Hover".to_string(), region(32.0, 12.0));
    map.insert("Inactive".to_string(), region(32.0, 12.0));
    map.insert("Inactive_Hover".to_string(), region(32.0, 12.0));
    map
}

fn ten_unit_slider() -> SliderConfig {
    SliderConfig {
        id: "volume".to_string(),
        width: 100.0,
        min: 0.0,
        max: 10.0,
        ..SliderConfig::default()
    }
}

fn mouse_at(x: f32, y: f32) -> InteractionPoint {
    InteractionPoint::new(PointId(0), PointerKind::Mouse, Vec2::new(x, y))
}

fn pass(scene: &mut Scene, point: &mut InteractionPoint) {
    scene.dispatch(std::slice::from_mut(point));
}

#[test]
fn slider_requires_all_track_textures() {
    let mut textures = slider_textures();
    textures.remove("Pill_Active");
    let err = Slider::new(ten_unit_slider(), textures).unwrap_err();
    assert!(matches!(err, StageError::MissingTexture { name, .. } if name == "Pill_Active"));
}

#[test]
fn slider_rejects_inverted_range() {
    let config = SliderConfig {
        min: 5.0,
        max: 5.0,
        ..ten_unit_slider()
    };
    assert!(matches!(
        Slider::new(config, slider_textures()),
        Err(StageError::InvalidConfig { .. })
    ));
}

#[test]
fn slider_rejects_track_narrower_than_pill() {
    let config = SliderConfig {
        width: 15.0,
        ..ten_unit_slider()
    };
    assert!(matches!(
        Slider::new(config, slider_textures()),
        Err(StageError::InvalidConfig { .. })
    ));
}

#[test]
fn slider_takes_height_from_the_pill() {
    let slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();
    assert_eq!(slider.base().width(), 100.0);
    assert_eq!(slider.base().height(), 10.0);
}

#[test]
fn captured_slider_maps_local_x_to_value() {
    // min=0, max=10, width=100, pill=20: pressing at local x=40 while
    // captured computes 10 * clamp(40 - 10, 0, 80) / 80 = 3.75.
    let mut slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();

    let values = Arc::new(Mutex::new(Vec::new()));
    let values2 = values.clone();
    slider.value_changed.connect(move |v| {
        values2.lock().unwrap().push(*v);
    });

    let mut point = mouse_at(40.0, 5.0);
    point.local = point.pos;
    point.down = true;
    point.active = Some(slider.base().key());
    slider.base_mut().active = true;

    slider.point_collision(&point);
    assert_relative_eq!(slider.value(), 3.75);
    assert_eq!(*values.lock().unwrap(), vec![3.75]);

    // same position again: no redundant value-change
    slider.point_collision(&point);
    assert_eq!(*values.lock().unwrap(), vec![3.75]);
}

#[test]
fn slider_clamps_drags_past_the_track() {
    let mut slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();
    let mut point = mouse_at(0.0, 5.0);
    point.down = true;
    point.active = Some(slider.base().key());
    slider.base_mut().active = true;

    point.local = Vec2::new(1000.0, 5.0);
    slider.point_collision(&point);
    assert_eq!(slider.value(), 10.0);

    point.local = Vec2::new(-1000.0, 5.0);
    slider.point_collision(&point);
    assert_eq!(slider.value(), 0.0);
}

#[test]
fn slider_drag_through_the_scene() {
    let mut scene = Scene::new();
    let slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();

    let values = Arc::new(Mutex::new(Vec::new()));
    let values2 = values.clone();
    slider.value_changed.connect(move |v| {
        values2.lock().unwrap().push(*v);
    });

    let key = scene.add(Box::new(slider));

    // press on the pill (value 0 puts it at x in [0, 20])
    let mut point = mouse_at(10.0, 5.0);
    point.press();
    pass(&mut scene, &mut point);
    assert_eq!(point.active, Some(key));
    // pressing dead-center of the pill at value 0 computes value 0: no event
    assert!(values.lock().unwrap().is_empty());

    // drag to x=40: exactly one value-change, to 3.75
    point.pos = Vec2::new(40.0, 5.0);
    pass(&mut scene, &mut point);
    assert_eq!(*values.lock().unwrap(), vec![3.75]);

    // releasing over the moved pill clicks and frees capture
    point.release();
    pass(&mut scene, &mut point);
    assert_eq!(point.active, None);
    assert!(point.clicked);
}

#[test]
fn slider_narrow_phase_follows_the_pill() {
    let mut scene = Scene::new();
    let mut slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();
    slider.set_value(10.0);
    let key = scene.add(Box::new(slider));

    // at value 10 the pill occupies x in [80, 100]; the track's left end
    // is empty space
    let mut point = mouse_at(10.0, 5.0);
    pass(&mut scene, &mut point);
    assert_eq!(point.hover, None);

    point.pos = Vec2::new(90.0, 5.0);
    pass(&mut scene, &mut point);
    assert_eq!(point.hover, Some(key));
}

#[test]
fn slider_update_selects_pill_texture() {
    let mut slider = Slider::new(ten_unit_slider(), slider_textures()).unwrap();
    slider.update();
    assert_eq!(slider.pill_texture(), "Pill");

    slider.base_mut().hover = true;
    slider.update();
    assert_eq!(slider.pill_texture(), "Pill_Hover");

    slider.base_mut().active = true;
    slider.update();
    assert_eq!(slider.pill_texture(), "Pill_Active");
}

#[test]
fn checkbox_toggles_on_click() {
    let mut scene = Scene::new();
    let checkbox = Checkbox::new(
        CheckboxConfig {
            id: "mute".to_string(),
            ..CheckboxConfig::default()
        },
        checkbox_textures(),
    )
    .unwrap();

    let toggles = Arc::new(Mutex::new(Vec::new()));
    let toggles2 = toggles.clone();
    checkbox.toggled.connect(move |checked| {
        toggles2.lock().unwrap().push(*checked);
    });

    scene.add(Box::new(checkbox));

    let mut point = mouse_at(8.0, 8.0);
    point.press();
    pass(&mut scene, &mut point);
    point.release();
    pass(&mut scene, &mut point);
    assert_eq!(*toggles.lock().unwrap(), vec![true]);

    point.press();
    pass(&mut scene, &mut point);
    point.release();
    pass(&mut scene, &mut point);
    assert_eq!(*toggles.lock().unwrap(), vec![true, false]);
}

#[test]
fn checkbox_press_without_release_does_not_toggle() {
    let mut scene = Scene::new();
    let checkbox = Checkbox::new(CheckboxConfig::default(), checkbox_textures()).unwrap();

    let toggles = Arc::new(AtomicUsize::new(0));
    let toggles2 = toggles.clone();
    checkbox.toggled.connect(move |_| {
        toggles2.fetch_add(1, Ordering::SeqCst);
    });

    scene.add(Box::new(checkbox));

    let mut point = mouse_at(8.0, 8.0);
    point.press();
    pass(&mut scene, &mut point);
    assert_eq!(toggles.load(Ordering::SeqCst), 0);

    // dragging off before release abandons the click
    point.pos = Vec2::new(200.0, 200.0);
    pass(&mut scene, &mut point);
    point.release();
    pass(&mut scene, &mut point);
    assert_eq!(toggles.load(Ordering::SeqCst), 0);
}

#[test]
fn button_requires_its_texture_family() {
    let mut textures = button_textures();
    textures.remove("Inactive_Hover");
    assert!(matches!(
        Button::new(ButtonConfig::default(), textures),
        Err(StageError::MissingTexture { .. })
    ));
}

#[test]
fn button_update_selects_texture_by_state() {
    let mut button = Button::new(
        ButtonConfig {
            id: "ok".to_string(),
            ..ButtonConfig::default()
        },
        button_textures(),
    )
    .unwrap();
    assert_eq!(button.base().width(), 32.0);

    button.update();
    assert_eq!(button.texture(), "Inactive");

    button.base_mut().hover = true;
    button.update();
    assert_eq!(button.texture(), "Inactive_Hover");

    button.set_selected(true);
    button.update();
    assert_eq!(button.texture(), "Active_Hover");

    button.base_mut().hover = false;
    button.update();
    assert_eq!(button.texture(), "Active");
}
