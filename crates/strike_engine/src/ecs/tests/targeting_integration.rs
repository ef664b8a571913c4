//! Integration tests for the lock-and-fire loop
//!
//! Drives full sessions through lock accumulation, burst firing, and the
//! gameplay hooks a shooter game hangs off them: hitscan damage, homing
//! projectiles, and shooter death mid-burst.

use crate::config::SessionConfig;
use crate::ecs::component::Payload;
use crate::ecs::components::{Behavior, Body, Health, Propulsion, Steering};
use crate::ecs::entity::{EntityId, EntityTag, Team};
use crate::ecs::systems::{Weapon, WeaponState};
use crate::foundation::math::Vec2;
use crate::Session;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session_with_shooter() -> (Session, EntityId) {
        let mut session = Session::new(SessionConfig::default());
        let shooter = session.world.spawn(Vec2::new(600.0, 400.0), EntityTag::Ship);
        session.world.entity_mut(shooter).unwrap().team = Team::Friendly;
        session.world.attach(shooter, Payload::Body(Body::new(10.0)));
        session.world.targeting.bind(shooter);
        (session, shooter)
    }

    fn spawn_hazard(session: &mut Session, position: Vec2) -> EntityId {
        let hazard = session.world.spawn(position, EntityTag::Hazard);
        session.world.entity_mut(hazard).unwrap().team = Team::Enemy;
        session.world.attach(hazard, Payload::Body(Body::new(20.0)));
        let mut health = Health::new(1.0);
        health.on_death = Some(Rc::new(|world, owner| {
            world.despawn(owner);
        }));
        session.world.attach(hazard, Payload::Health(health));
        hazard
    }

    #[test]
    fn test_lock_fire_kill_flow() {
        let (mut session, _shooter) = session_with_shooter();
        let h1 = spawn_hazard(&mut session, Vec2::new(700.0, 400.0));
        let h2 = spawn_hazard(&mut session, Vec2::new(500.0, 400.0));

        session
            .world
            .targeting
            .set_weapons(Weapon::new("railgun", 0.2, 0.3), None);
        session.world.targeting.on_fire = Some(Rc::new(|world, _shooter, target| {
            world.deal_damage(target, 1.0);
        }));

        // Hold each target past the lock-on time.
        session.world.targeting.set_target(h1);
        session.tick(0.2);
        session.tick(0.2);
        session.world.targeting.set_target(h2);
        session.tick(0.2);
        session.tick(0.2);
        assert_eq!(session.world.targeting.locked_targets().count(), 2);

        session.world.fire_weapon();
        session.tick(0.2);

        // First shot landed and death resolved within the same frame.
        assert!(!session.world.is_alive(h1));
        assert!(session.world.is_alive(h2));

        // Cadence gap, then the second shot.
        session.tick(0.2);
        assert!(session.world.is_alive(h2));
        session.tick(0.2);
        assert!(!session.world.is_alive(h2));
        assert_eq!(session.world.targeting.state(), WeaponState::Ready);
    }

    #[test]
    fn test_missiles_track_locked_targets() {
        let (mut session, _shooter) = session_with_shooter();
        let hazard = spawn_hazard(&mut session, Vec2::new(800.0, 400.0));

        session
            .world
            .targeting
            .set_weapons(Weapon::new("seeker", 0.1, 0.1), None);
        session.world.targeting.on_fire = Some(Rc::new(|world, shooter, target| {
            let Some(origin) = world.entity(shooter).map(|e| e.position) else {
                return;
            };
            let missile = world.spawn(origin, EntityTag::Missile);
            world.entity_mut(missile).unwrap().team = Team::Friendly;
            world.attach(
                missile,
                Payload::Body(Body::with_velocity(1.0, Vec2::new(120.0, 0.0))),
            );
            let mut propulsion = Propulsion::new(300.0, 4.0);
            propulsion.linear_throttle = Vec2::new(1.0, 0.0);
            propulsion.directed = true;
            world.attach(missile, Payload::Propulsion(propulsion));
            world.attach(
                missile,
                Payload::Behavior(Behavior::new(Steering::Follow(target))),
            );
        }));

        session.world.targeting.set_target(hazard);
        session.tick(0.2);
        session.world.fire_weapon();
        session.tick(0.2);

        let missile = session
            .world
            .entity_ids()
            .into_iter()
            .find(|&id| session.world.entity(id).unwrap().tag == EntityTag::Missile)
            .expect("shot should have spawned a missile");

        let distance = |session: &Session| {
            let missile_position = session.world.entity(missile).unwrap().position;
            let hazard_position = session.world.entity(hazard).unwrap().position;
            (hazard_position - missile_position).norm()
        };

        let before = distance(&session);
        for _ in 0..5 {
            session.tick(0.1);
        }
        assert!(distance(&session) < before);
    }

    #[test]
    fn test_shooter_death_mid_burst() {
        let (mut session, shooter) = session_with_shooter();
        let h1 = spawn_hazard(&mut session, Vec2::new(700.0, 400.0));
        let h2 = spawn_hazard(&mut session, Vec2::new(500.0, 400.0));

        session
            .world
            .targeting
            .set_weapons(Weapon::new("railgun", 0.5, 0.05), None);
        let shots = Rc::new(RefCell::new(0));
        let count = Rc::clone(&shots);
        session.world.targeting.on_fire = Some(Rc::new(move |_world, _shooter, _target| {
            *count.borrow_mut() += 1;
        }));

        session.world.targeting.set_target(h1);
        session.tick(0.1);
        session.world.targeting.set_target(h2);
        session.tick(0.1);
        assert_eq!(session.world.targeting.locked_targets().count(), 2);

        session.world.fire_weapon();
        session.tick(0.1);
        assert_eq!(*shots.borrow(), 1);

        // The shooter dies with a lock still queued; the burst dies too.
        session.world.despawn(shooter);
        session.tick(0.1);
        assert_eq!(*shots.borrow(), 1);
        assert_eq!(session.world.targeting.state(), WeaponState::Ready);
        assert_eq!(session.world.targeting.locked_targets().count(), 0);
    }
}
