//! Weapon cadence and target lock-on
//!
//! A single [`Targeting`] block on the world tracks the player-controlled
//! shooter: which weapon is equipped, the reticle latch accruing lock time,
//! the queue of confirmed locks, and the firing state machine. Gameplay
//! latches targets and calls [`World::fire_weapon`]; the system confirms
//! locks and works through the queue at the weapon's cadence, one shot per
//! elapsed fire delay.
//!
//! What a shot or a confirmed lock actually does is left to the [`FireHook`]
//! and lock hooks, so the same machinery drives missiles, beams, and
//! anything else gameplay code dreams up.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::ecs::component::EntityHook;
use crate::ecs::entity::EntityId;
use crate::ecs::system::System;
use crate::ecs::world::World;
use crate::foundation::math::Vec2;

/// Callback run once per shot with the shooter and the locked target
pub type FireHook = Rc<dyn Fn(&mut World, EntityId, EntityId)>;

/// Firing state of the equipped weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    /// Idle; a fire command starts working through the lock queue
    Ready,

    /// Emptying the lock queue at the weapon's cadence
    Firing,
}

/// Static description of one weapon
///
/// The state machine only reads `fire_delay`, `lockon_time`, and `special`;
/// the projectile tuning fields are carried for the fire hook, which builds
/// whatever the weapon launches from them.
#[derive(Clone)]
pub struct Weapon {
    /// Display name, also used by gameplay code to pick projectile art
    pub name: String,

    /// Seconds between consecutive shots of a burst
    pub fire_delay: f32,

    /// Seconds the reticle must hold a target before the lock confirms
    pub lockon_time: f32,

    /// Projectile launch velocity in the shooter's local frame
    pub initial_velocity: Vec2,

    /// Projectile speed cap, zero for none
    pub max_speed: f32,

    /// Projectile thrust acceleration
    pub acceleration: f32,

    /// Projectile turn speed in radians per second
    pub turn_rate: f32,

    /// Projectile velocity decay factor
    pub deceleration: f32,

    /// Particle effect for the projectile's trail
    pub projectile_effect: Option<String>,

    /// Projectile spawn point relative to the shooter
    pub muzzle_offset: Vec2,

    /// Replaces the lock-queue cadence entirely when set; firing such a
    /// weapon runs this hook once and leaves the state machine untouched
    pub special: Option<EntityHook>,
}

impl Weapon {
    /// Create a queue-driven weapon with inert projectile tuning
    pub fn new(name: &str, fire_delay: f32, lockon_time: f32) -> Self {
        Self {
            name: name.to_owned(),
            fire_delay,
            lockon_time,
            initial_velocity: Vec2::zeros(),
            max_speed: 0.0,
            acceleration: 0.0,
            turn_rate: 0.0,
            deceleration: 0.0,
            projectile_effect: None,
            muzzle_offset: Vec2::zeros(),
            special: None,
        }
    }

    /// Create a special-fire weapon that bypasses the lock queue
    pub fn with_special(name: &str, special: EntityHook) -> Self {
        let mut weapon = Self::new(name, 0.0, 0.0);
        weapon.special = Some(special);
        weapon
    }
}

/// Lock-on and firing state for the player-controlled shooter
///
/// Lives on the [`World`] rather than on an entity; the shooter is bound by
/// handle and the whole block resets itself if that entity dies.
pub struct Targeting {
    shooter: Option<EntityId>,
    current: Option<Weapon>,
    alternate: Option<Weapon>,
    target: Option<EntityId>,
    lock_time: f32,
    queue: VecDeque<EntityId>,
    state: WeaponState,
    cooldown: f32,

    /// Shot callback; spawns whatever the equipped weapon launches
    pub on_fire: Option<FireHook>,

    /// Lock-confirm callback, for reticle and audio feedback
    pub on_lock: Option<EntityHook>,
}

impl Targeting {
    /// Create an unbound targeting block with no weapons equipped
    pub fn new() -> Self {
        Self {
            shooter: None,
            current: None,
            alternate: None,
            target: None,
            lock_time: 0.0,
            queue: VecDeque::new(),
            state: WeaponState::Ready,
            cooldown: 0.0,
            on_fire: None,
            on_lock: None,
        }
    }

    /// Bind the shooter entity the weapons belong to
    pub fn bind(&mut self, shooter: EntityId) {
        self.shooter = Some(shooter);
    }

    /// The bound shooter, if any
    pub fn shooter(&self) -> Option<EntityId> {
        self.shooter
    }

    /// Equip a weapon plus an optional alternate, resetting all locks
    pub fn set_weapons(&mut self, current: Weapon, alternate: Option<Weapon>) {
        self.current = Some(current);
        self.alternate = alternate;
        self.reset_locks();
    }

    /// The equipped weapon
    pub fn current_weapon(&self) -> Option<&Weapon> {
        self.current.as_ref()
    }

    /// The stowed alternate weapon
    pub fn alternate_weapon(&self) -> Option<&Weapon> {
        self.alternate.as_ref()
    }

    /// Current firing state
    pub fn state(&self) -> WeaponState {
        self.state
    }

    /// Latch the reticle onto a target and start accruing lock time
    ///
    /// Only takes effect while no other target is latched; re-latching the
    /// same target is a no-op and the lock keeps accruing.
    pub fn set_target(&mut self, target: EntityId) {
        if self.target.is_none() {
            self.target = Some(target);
        }
    }

    /// Drop the latch if it points at the given target
    pub fn clear_target(&mut self, target: EntityId) {
        if self.target == Some(target) {
            self.target = None;
            self.lock_time = 0.0;
        }
    }

    /// The currently latched target, if any
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Confirmed locks waiting to be fired on, oldest first
    pub fn locked_targets(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.queue.iter().copied()
    }

    /// Drain the confirmed lock queue, for burst weapons that consume every
    /// lock in one volley
    pub fn take_locked_targets(&mut self) -> VecDeque<EntityId> {
        std::mem::take(&mut self.queue)
    }

    /// Exchange the equipped and alternate weapons
    ///
    /// A no-op without an alternate; otherwise all locks reset, since they
    /// were accrued against the outgoing weapon's lock-on time.
    pub fn swap_weapons(&mut self) {
        if self.alternate.is_none() {
            return;
        }
        std::mem::swap(&mut self.current, &mut self.alternate);
        if let Some(weapon) = &self.current {
            log::debug!("Swapped to {}", weapon.name);
        }
        self.reset_locks();
    }

    /// Drop the latch and every confirmed lock and return to [`WeaponState::Ready`]
    pub fn reset_locks(&mut self) {
        self.queue.clear();
        self.target = None;
        self.lock_time = 0.0;
        self.state = WeaponState::Ready;
        self.cooldown = 0.0;
    }

    /// Start firing; returns the shooter and, for special weapons, the hook
    /// to run in place of the cadence machinery
    pub(crate) fn begin_fire(&mut self) -> Option<(EntityId, Option<EntityHook>)> {
        let shooter = self.shooter?;
        let weapon = self.current.as_ref()?;
        if let Some(special) = &weapon.special {
            log::debug!("{} special fire", weapon.name);
            return Some((shooter, Some(Rc::clone(special))));
        }
        log::debug!("{} firing with {} locks queued", weapon.name, self.queue.len());
        self.state = WeaponState::Firing;
        Some((shooter, None))
    }
}

impl Default for Targeting {
    fn default() -> Self {
        Self::new()
    }
}

/// Advances lock-on accrual and the firing cadence
pub struct WeaponSystem;

impl WeaponSystem {
    /// Accrue lock time on the latched target and confirm it into the queue
    /// once it has been held past the weapon's lock-on time
    fn accumulate_lock(world: &mut World, delta_time: f32) {
        let Some(latched) = world.targeting.target else {
            return;
        };
        if !world.is_alive(latched) {
            world.targeting.target = None;
            world.targeting.lock_time = 0.0;
            return;
        }
        let Some(lockon_time) = world.targeting.current.as_ref().map(|w| w.lockon_time) else {
            return;
        };

        world.targeting.lock_time += delta_time;
        if world.targeting.lock_time > lockon_time {
            world.targeting.queue.push_back(latched);
            world.targeting.target = None;
            world.targeting.lock_time = 0.0;
            let hook = world.targeting.on_lock.clone();
            if let Some(hook) = hook {
                hook(world, latched);
            }
        }
    }

    /// Tick the shot cooldown and, while firing, pop locks and fire on them
    fn advance_cadence(world: &mut World, delta_time: f32) {
        world.targeting.cooldown -= delta_time;
        while world.targeting.state == WeaponState::Firing && world.targeting.cooldown < 0.0 {
            let Some(target) = world.targeting.queue.pop_front() else {
                break;
            };
            // A lock whose target died in the queue is dropped without
            // consuming the shot.
            if !world.is_alive(target) {
                continue;
            }
            let Some(shooter) = world.targeting.shooter else {
                break;
            };
            let Some(fire_delay) = world.targeting.current.as_ref().map(|w| w.fire_delay) else {
                break;
            };
            world.targeting.cooldown = fire_delay;
            let hook = world.targeting.on_fire.clone();
            if let Some(hook) = hook {
                hook(world, shooter, target);
            }
        }
        // An exhausted queue ends the burst even if the fire command came in
        // with nothing locked.
        if world.targeting.state == WeaponState::Firing && world.targeting.queue.is_empty() {
            log::debug!("Burst complete; weapon ready");
            world.targeting.state = WeaponState::Ready;
        }
    }
}

impl System for WeaponSystem {
    fn name(&self) -> &str {
        "weapon"
    }

    fn update(&mut self, world: &mut World, delta_time: f32) {
        let shooter_alive = world
            .targeting
            .shooter
            .is_some_and(|shooter| world.is_alive(shooter));
        if !shooter_alive {
            let idle = world.targeting.state == WeaponState::Ready
                && world.targeting.target.is_none()
                && world.targeting.queue.is_empty();
            if !idle {
                log::debug!("Shooter gone; weapon activity reset");
                world.targeting.reset_locks();
            }
            return;
        }
        Self::accumulate_lock(world, delta_time);
        Self::advance_cadence(world, delta_time);
    }
}
