//! Spinning cube demo
//!
//! Builds the classic three-entity scene (a camera, a sun, and a cube)
//! and runs the frame loop on the headless window backend for a few
//! seconds' worth of frames. Arrow keys (were a real window attached)
//! nudge the cube sideways through its update hook.

use lumen_engine::prelude::*;

const CUBE_SPEED: f32 = 4.0;

fn main() -> Result<(), GameError> {
    lumen_engine::foundation::logging::init();

    let mut game =
        Game::with_window("Cube Demo", Box::new(HeadlessWindow::with_frame_budget(240)));
    let keyboard = game.keyboard();

    game.add(
        Entity::new()
            .with(Transform::from_position(Vec3::new(0.0, 2.0, 10.0)))?
            .with(Camera::perspective(45.0))?,
    );

    game.add(
        Entity::new()
            .with(Transform::identity().with_rotation_euler(-0.8, 0.4, 0.0))?
            .with(Light::directional(Color::WHITE, 1.5))?,
    );

    game.add(Entity::new().with(Light::ambient(Color::rgb(0.2, 0.2, 0.25), 1.0))?);

    game.add(
        Entity::new()
            .with(Transform::identity().with_uniform_scale(2.0))?
            .with(Mesh::new("models/cube.obj").with_albedo(Color::rgb(0.8, 0.7, 0.5)))?
            .with(Motion::with_angular_velocity(Vec3::new(0.0, 1.0, 0.0)))?
            .with_update(move |entity, delta| {
                let mut direction = 0.0;
                if keyboard.is_down(Key::Left) {
                    direction -= 1.0;
                }
                if keyboard.is_down(Key::Right) {
                    direction += 1.0;
                }
                if direction != 0.0 {
                    if let Ok(transform) = entity.get_mut::<Transform>() {
                        transform.position.x += CUBE_SPEED * direction * delta;
                    }
                }
            }),
    );

    log::info!("scene assembled, entering the frame loop");
    game.run(800, 600)
}
