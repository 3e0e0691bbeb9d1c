//! Game-specific systems
//!
//! Priorities interleave with the engine's built-ins: player control
//! runs before motion integration, weapons fire before the projectile
//! system drains spawn requests, and sparks trail behind everything
//! that moved this frame.

use helix_engine::prelude::*;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::components::{Player, Weapon};

/// Player control runs before motion integration
pub const PLAYER_PRIORITY: i32 = 10;
/// Weapons fire before the projectile system drains requests
pub const WEAPON_PRIORITY: i32 = 15;
/// Sparks trail projectiles, so they run after integration
pub const SPARK_PRIORITY: i32 = 40;

/// Translates logical input into player velocity and aim.
#[derive(Debug, Default)]
pub struct PlayerControlSystem;

impl PlayerControlSystem {
    /// Create the control system
    pub fn new() -> Self {
        Self
    }
}

impl System for PlayerControlSystem {
    fn name(&self) -> &'static str {
        "PlayerControlSystem"
    }

    fn priority(&self) -> i32 {
        PLAYER_PRIORITY
    }

    fn update(&mut self, world: &mut World, ctx: &mut GameContext<'_>, _delta_time: f32) {
        let axis = ctx.input.movement_axis();
        for id in world.entities_with::<Player>() {
            let Some(player) = world.get_component_mut::<Player>(id) else {
                continue;
            };
            let speed = player.move_speed;
            if axis.norm_squared() > f32::EPSILON {
                player.aim = axis.normalize();
            }
            if let Some(motion) = world.get_component_mut::<MotionComponent>(id) {
                motion.velocity = axis * speed;
            }
        }
    }
}

/// Ticks weapon cooldowns, fires on input, and applies upgrades.
///
/// Firing never touches entity storage directly; it publishes a
/// projectile request the projectile system fulfils later in the same
/// frame.
pub struct WeaponSystem {
    upgrades: UpgradeRegistry,
    rng: StdRng,
}

impl WeaponSystem {
    /// Create a weapon system with the default upgrade table
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a weapon system with a fixed spread seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            upgrades: UpgradeRegistry::with_defaults(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply a stat upgrade to every carried weapon
    fn apply_upgrade(&self, world: &mut World, stat: StatId, amount: f32) {
        for id in world.entities_with::<Weapon>() {
            if let Some(weapon) = world.get_component_mut::<Weapon>(id) {
                self.upgrades.apply(&mut weapon.stats, stat, amount);
            }
        }
    }

    /// Aim direction with spread jitter applied
    fn jittered(&mut self, aim: Vec2, spread: f32) -> Vec2 {
        if spread <= 0.0 {
            return aim;
        }
        let angle = (self.rng.gen::<f32>() - 0.5) * spread;
        let (sin, cos) = angle.sin_cos();
        vec2(aim.x * cos - aim.y * sin, aim.x * sin + aim.y * cos)
    }
}

impl Default for WeaponSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WeaponSystem {
    fn name(&self) -> &'static str {
        "WeaponSystem"
    }

    fn priority(&self) -> i32 {
        WEAPON_PRIORITY
    }

    fn update(&mut self, world: &mut World, ctx: &mut GameContext<'_>, delta_time: f32) {
        for event in ctx
            .events
            .take_matching(|e| matches!(e, GameEvent::WeaponUpgraded { .. }))
        {
            if let GameEvent::WeaponUpgraded { stat, amount } = event {
                debug!("applying upgrade {stat:?} +{amount}");
                self.apply_upgrade(world, stat, amount);
            }
        }

        let firing = ctx.input.is_action_pressed(Action::Fire);
        for id in world.entities_with::<Weapon>() {
            let aim = world
                .get_component::<Player>(id)
                .map_or_else(|| vec2(1.0, 0.0), |p| p.aim);
            let position = world
                .get_component::<TransformComponent>(id)
                .map_or_else(Vec2::zeros, |t| t.position);

            let Some(weapon) = world.get_component_mut::<Weapon>(id) else {
                continue;
            };
            weapon.cooldown_remaining -= delta_time;
            if !firing || weapon.cooldown_remaining > 0.0 {
                continue;
            }
            weapon.cooldown_remaining = weapon.cooldown();

            let damage = weapon.damage();
            let speed = weapon.projectile_speed();
            let lifetime = weapon.spec.lifetime;
            let spread = weapon.spec.spread;
            let direction = self.jittered(aim, spread);
            ctx.events.publish(GameEvent::ProjectileRequested {
                position,
                velocity: direction * speed,
                damage,
                lifetime,
                shooter: Some(id),
            });
        }
    }
}

/// HUD bookkeeping runs last and keeps ticking while paused
pub const HUD_PRIORITY: i32 = 90;

/// Logs periodic frame statistics.
///
/// Keeps updating while the game is paused so the overlay stays live
/// behind the pause menu.
pub struct HudSystem {
    interval: f32,
    since_report: f32,
}

impl HudSystem {
    /// Create a HUD system reporting every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            since_report: 0.0,
        }
    }
}

impl System for HudSystem {
    fn name(&self) -> &'static str {
        "HudSystem"
    }

    fn priority(&self) -> i32 {
        HUD_PRIORITY
    }

    fn updates_during_pause(&self) -> bool {
        true
    }

    fn update(&mut self, world: &mut World, _ctx: &mut GameContext<'_>, delta_time: f32) {
        self.since_report += delta_time;
        if self.since_report < self.interval {
            return;
        }
        self.since_report = 0.0;
        debug!(
            "hud: {} entities ({} active), {} projectiles",
            world.len(),
            world.active_count(),
            world.entities_with_tag("projectile").len()
        );
    }
}

/// Short-lived trail particle emitted behind projectiles.
#[derive(Debug, Clone, Default)]
pub struct Spark {
    /// Current world position
    pub position: Vec2,
    /// Drift velocity
    pub velocity: Vec2,
    /// Seconds left before the spark is reclaimed
    pub remaining: f32,
}

/// Emits trail sparks behind live projectiles.
///
/// Sparks live outside entity storage in an object pool; expired ones
/// are reclaimed and overwritten on the next emission, never
/// reallocated.
pub struct SparkSystem {
    sparks: Pool<Spark>,
    expired: DeferredQueue<PoolKey>,
    rng: StdRng,
    spark_lifetime: f32,
}

impl SparkSystem {
    /// Create a spark system with the given per-spark lifetime
    pub fn new(spark_lifetime: f32) -> Self {
        Self {
            sparks: Pool::new(Spark::default, |spark| {
                *spark = Spark::default();
            }),
            expired: DeferredQueue::new(),
            rng: StdRng::seed_from_u64(0x5eed),
            spark_lifetime,
        }
    }

    /// Number of sparks currently alive
    pub fn active_sparks(&self) -> usize {
        self.sparks.active_count()
    }

    /// Total pool capacity, live plus reclaimed
    pub fn pooled_sparks(&self) -> usize {
        self.sparks.total_count()
    }
}

impl System for SparkSystem {
    fn name(&self) -> &'static str {
        "SparkSystem"
    }

    fn priority(&self) -> i32 {
        SPARK_PRIORITY
    }

    fn update(&mut self, world: &mut World, _ctx: &mut GameContext<'_>, delta_time: f32) {
        // Scan pass: age sparks, queue expiries; mutate only afterwards.
        for (key, spark) in self.sparks.iter_active_mut() {
            spark.remaining -= delta_time;
            if spark.remaining <= 0.0 {
                self.expired.defer(key);
            } else {
                spark.position += spark.velocity * delta_time;
            }
        }
        let Self {
            sparks, expired, ..
        } = self;
        expired.drain(|key| {
            sparks.release(key);
        });

        let lifetime = self.spark_lifetime;
        for id in world.entities_with_tag("projectile") {
            let Some(transform) = world.get_component::<TransformComponent>(id) else {
                continue;
            };
            let position = transform.position;
            let drift = vec2(
                self.rng.gen::<f32>() - 0.5,
                self.rng.gen::<f32>() - 0.5,
            ) * 12.0;
            self.sparks.acquire_with(|spark| {
                spark.position = position;
                spark.velocity = drift;
                spark.remaining = lifetime;
            });
        }
    }

    fn debug_entries(&self) -> Vec<DebugEntry> {
        vec![
            DebugEntry::new("sparks", self.sparks.active_count()),
            DebugEntry::new("pooled", self.sparks.total_count()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeaponSpec;

    struct Stick {
        axis: Vec2,
        fire: bool,
    }

    impl InputSource for Stick {
        fn is_action_pressed(&self, action: Action) -> bool {
            self.fire && action == Action::Fire
        }
        fn movement_axis(&self) -> Vec2 {
            self.axis
        }
    }

    fn context<'a>(
        camera: &'a mut CameraFollow,
        events: &'a mut EventBus,
        input: &'a Stick,
    ) -> GameContext<'a> {
        GameContext {
            camera,
            events,
            input,
        }
    }

    fn spec() -> WeaponSpec {
        WeaponSpec {
            name: "Test".to_string(),
            damage: 5.0,
            cooldown: 0.5,
            projectile_speed: 200.0,
            lifetime: 1.0,
            spread: 0.0,
        }
    }

    fn armed_player(world: &mut World) -> helix_engine::prelude::EntityId {
        let id = world.create_entity();
        world
            .add_component(id, TransformComponent::new(vec2(3.0, 4.0)))
            .add_component(id, MotionComponent::new())
            .add_component(id, Player::new(100.0))
            .add_component(id, Weapon::new(spec()));
        id
    }

    #[test]
    fn test_control_sets_velocity_and_aim() {
        let mut world = World::new();
        let id = armed_player(&mut world);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: vec2(0.0, 1.0),
            fire: false,
        };
        let mut ctx = context(&mut camera, &mut events, &input);

        let mut control = PlayerControlSystem::new();
        control.update(&mut world, &mut ctx, 0.016);

        let motion = world.get_component::<MotionComponent>(id).unwrap();
        assert!((motion.velocity.y - 100.0).abs() < 1e-4);
        let player = world.get_component::<Player>(id).unwrap();
        assert!((player.aim.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_idle_stick_keeps_last_aim() {
        let mut world = World::new();
        let id = armed_player(&mut world);
        world.get_component_mut::<Player>(id).unwrap().aim = vec2(0.0, -1.0);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: Vec2::zeros(),
            fire: false,
        };
        let mut ctx = context(&mut camera, &mut events, &input);

        PlayerControlSystem::new().update(&mut world, &mut ctx, 0.016);

        let player = world.get_component::<Player>(id).unwrap();
        assert!((player.aim.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_weapon_fires_on_cooldown() {
        let mut world = World::new();
        let id = armed_player(&mut world);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: Vec2::zeros(),
            fire: true,
        };
        let mut weapons = WeaponSystem::with_seed(7);

        // 10 frames at 0.1s with a 0.5s cooldown: two shots
        for _ in 0..10 {
            let mut ctx = context(&mut camera, &mut events, &input);
            weapons.update(&mut world, &mut ctx, 0.1);
        }

        let requests =
            events.take_matching(|e| matches!(e, GameEvent::ProjectileRequested { .. }));
        assert_eq!(requests.len(), 2);
        if let GameEvent::ProjectileRequested {
            velocity, shooter, ..
        } = &requests[0]
        {
            assert!((velocity.norm() - 200.0).abs() < 1e-3);
            assert_eq!(*shooter, Some(id));
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_weapon_idle_without_fire_input() {
        let mut world = World::new();
        armed_player(&mut world);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: Vec2::zeros(),
            fire: false,
        };
        let mut ctx = context(&mut camera, &mut events, &input);

        WeaponSystem::with_seed(7).update(&mut world, &mut ctx, 1.0);
        assert_eq!(events.pending_count(), 0);
    }

    #[test]
    fn test_upgrade_event_tightens_cooldown() {
        let mut world = World::new();
        let id = armed_player(&mut world);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        events.publish(GameEvent::WeaponUpgraded {
            stat: StatId::Cooldown,
            amount: 0.5,
        });
        let input = Stick {
            axis: Vec2::zeros(),
            fire: false,
        };
        let mut ctx = context(&mut camera, &mut events, &input);

        WeaponSystem::with_seed(7).update(&mut world, &mut ctx, 0.016);

        let weapon = world.get_component::<Weapon>(id).unwrap();
        assert!((weapon.cooldown() - 0.25).abs() < 1e-5);
        assert_eq!(events.pending_count(), 0);
    }

    #[test]
    fn test_hud_keeps_updating_while_paused() {
        let mut world = World::new();
        let mut scheduler = Scheduler::new();
        scheduler.add_system(&mut world, Box::new(PlayerControlSystem::new()));
        scheduler.add_system(&mut world, Box::new(HudSystem::new(1.0)));
        scheduler.set_paused(true);

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: Vec2::zeros(),
            fire: false,
        };
        let mut ctx = context(&mut camera, &mut events, &input);
        // Only the HUD runs while paused; nothing may panic.
        scheduler.update_pass(&mut world, &mut ctx, 0.5);
        assert!(HudSystem::new(1.0).updates_during_pause());
    }

    #[test]
    fn test_sparks_trail_and_expire() {
        let mut world = World::new();
        let id = world.create_entity();
        world.add_component(id, TransformComponent::new(vec2(1.0, 2.0)));
        world.entity_mut(id).unwrap().add_tag("projectile");

        let mut camera = CameraFollow::new(vec2(640.0, 480.0));
        let mut events = EventBus::new();
        let input = Stick {
            axis: Vec2::zeros(),
            fire: false,
        };

        let mut sparks = SparkSystem::new(0.05);
        for _ in 0..3 {
            let mut ctx = context(&mut camera, &mut events, &input);
            sparks.update(&mut world, &mut ctx, 0.016);
        }
        assert_eq!(sparks.active_sparks(), 3);

        // One long frame lets every spark expire; slots are reclaimed
        world.destroy(id);
        let mut ctx = context(&mut camera, &mut events, &input);
        sparks.update(&mut world, &mut ctx, 1.0);
        assert_eq!(sparks.active_sparks(), 0);
        assert_eq!(sparks.pooled_sparks(), 3);
    }
}
