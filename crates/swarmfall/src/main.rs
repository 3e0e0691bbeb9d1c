//! Swarmfall: a headless horde-survival demo built on helix_engine.
//!
//! Runs a bounded fixed-step simulation: the player strafes in a
//! circle while firing, picks up an upgrade partway through, and the
//! session pauses briefly to show gameplay freezing while the pause
//! menu keeps ticking.

mod components;
mod config;
mod systems;

use helix_engine::prelude::*;
use log::info;

use crate::components::{Player, Weapon};
use crate::config::GameConfig;
use crate::systems::{HudSystem, PlayerControlSystem, SparkSystem, WeaponSystem};

const CONFIG_PATH: &str = "swarmfall.ron";
const FIXED_STEP: f32 = 1.0 / 60.0;
const DEMO_FRAMES: u32 = 600;

/// Scripted input driving the demo: always firing, strafing in a slow
/// circle.
struct DemoInput {
    elapsed: f32,
}

impl InputSource for DemoInput {
    fn is_action_pressed(&self, action: Action) -> bool {
        action == Action::Fire
    }

    fn movement_axis(&self) -> Vec2 {
        let angle = self.elapsed * 0.8;
        vec2(angle.cos(), angle.sin())
    }
}

fn spawn_player(session: &mut GameSession, config: &GameConfig) -> EntityId {
    let id = session.world.create_entity();
    session
        .world
        .add_component(id, TransformComponent::new(Vec2::zeros()))
        .add_component(id, MotionComponent::new())
        .add_component(id, Player::new(config.player.move_speed))
        .add_component(id, Weapon::new(config.weapons[0].clone()));
    if let Some(entity) = session.world.entity_mut(id) {
        entity.add_tag("player");
    }
    session.camera_mut().set_target(Some(id));
    id
}

fn main() -> Result<(), SessionError> {
    helix_engine::foundation::logging::init();

    let config = GameConfig::load_or_default(CONFIG_PATH);
    info!(
        "loaded config: {} weapon(s), player speed {}",
        config.weapons.len(),
        config.player.move_speed
    );

    let mut session = GameSession::new(SessionConfig::default())?;
    session.add_system(Box::new(PlayerControlSystem::new()));
    session.add_system(Box::new(WeaponSystem::new()));
    session.add_system(Box::new(MotionSystem::new()));
    session.add_system(Box::new(ProjectileSystem::new()));
    session.add_system(Box::new(SparkSystem::new(0.15)));
    session.add_system(Box::new(CameraSystem::new()));
    session.add_system(Box::new(HudSystem::new(2.0)));

    let player = spawn_player(&mut session, &config);
    info!("spawned player {player}");
    session.events_mut().publish(GameEvent::WaveStarted { wave: 1 });

    let mut render_ctx = NullRenderContext;
    for frame in 0..DEMO_FRAMES {
        // Damage upgrade a third of the way in
        if frame == DEMO_FRAMES / 3 {
            session.events_mut().publish(GameEvent::WeaponUpgraded {
                stat: StatId::Damage,
                amount: 0.25,
            });
        }
        // Brief pause window; gameplay systems freeze, render continues
        if frame == DEMO_FRAMES / 2 {
            session.set_paused(true);
            info!("paused at t={:.2}s", session.total_time());
        }
        if frame == DEMO_FRAMES / 2 + 60 {
            session.set_paused(false);
            info!("resumed at t={:.2}s", session.total_time());
        }

        let input = DemoInput {
            elapsed: session.total_time(),
        };
        session.fixed_frame(FIXED_STEP, &input, &mut render_ctx);

        if frame % 120 == 0 {
            info!(
                "frame {frame}: {} entities ({} active)",
                session.world.len(),
                session.world.active_count()
            );
        }
    }

    let position = session
        .world
        .get_component::<TransformComponent>(player)
        .map_or_else(Vec2::zeros, |t| t.position);
    info!(
        "demo complete after {:.2}s: player at ({:.1}, {:.1}), {} entities pooled or live",
        session.total_time(),
        position.x,
        position.y,
        session.world.len()
    );

    session.reset();
    Ok(())
}
