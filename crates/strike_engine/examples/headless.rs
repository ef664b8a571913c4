//! Headless skirmish demo
//!
//! Runs a small engagement without any windowing: a player ship locks onto
//! drifting hazards and fires homing missiles at them. Run with
//! `RUST_LOG=info` to watch the session unfold, or `RUST_LOG=trace` for the
//! per-system noise.

use std::rc::Rc;

use strike_engine::foundation::math::Rotation2;
use strike_engine::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

fn spawn_player(world: &mut World) -> EntityId {
    let ship = world.spawn(Vec2::new(600.0, 400.0), EntityTag::Ship);
    world.entity_mut(ship).unwrap().team = Team::Friendly;
    world.attach(ship, Payload::Body(Body::new(10.0)));

    let mut collider = Collider::new(48.0, 48.0);
    collider.keep_inside_level = true;
    collider.elastic = true;
    world.attach(ship, Payload::Collider(collider));

    let mut propulsion = Propulsion::new(220.0, 3.0);
    propulsion.directed = true;
    world.attach(ship, Payload::Propulsion(propulsion));

    // WASD-ish throttle control, fed synthetically below.
    world.attach(
        ship,
        Payload::KeyboardListener(KeyboardListener::new(Rc::new(
            |world, owner, key, pressed| {
                let Some(propulsion) = world.propulsion_mut(owner) else {
                    return;
                };
                let throttle = if pressed { 1.0 } else { 0.0 };
                match key {
                    KeyCode::W => propulsion.linear_throttle.x = throttle,
                    KeyCode::A => propulsion.angular_throttle = -throttle,
                    KeyCode::D => propulsion.angular_throttle = throttle,
                    _ => {}
                }
            },
        ))),
    );
    ship
}

fn spawn_hazard(world: &mut World, position: Vec2, velocity: Vec2) -> EntityId {
    let hazard = world.spawn(position, EntityTag::Hazard);
    world.entity_mut(hazard).unwrap().team = Team::Enemy;
    world.attach(hazard, Payload::Body(Body::with_velocity(40.0, velocity)));

    let mut collider = Collider::new(36.0, 36.0);
    collider.elastic = true;
    collider.keep_inside_level = true;
    world.attach(hazard, Payload::Collider(collider));

    let mut health = Health::new(2.0);
    health.death_effect = Some("hazard_burst".to_owned());
    health.on_death = Some(Rc::new(|world, owner| {
        if let Some(position) = world.entity(owner).map(|e| e.position) {
            let debris = world.spawn(position, EntityTag::Explosion);
            world.attach(
                debris,
                Payload::Timer(Timer::with_hook(
                    0.4,
                    Rc::new(|world, debris| {
                        world.despawn(debris);
                    }),
                )),
            );
        }
        world.despawn(owner);
    }));
    world.attach(hazard, Payload::Health(health));
    hazard
}

fn spawn_missile(world: &mut World, shooter: EntityId, target: EntityId) {
    let Some(weapon) = world.targeting.current_weapon().cloned() else {
        return;
    };
    let Some((origin, angle)) = world.entity(shooter).map(|e| (e.position, e.angle)) else {
        return;
    };
    let facing = Rotation2::new(angle);

    let missile = world.spawn(origin + facing * weapon.muzzle_offset, EntityTag::Missile);
    {
        let entity = world.entity_mut(missile).unwrap();
        entity.team = Team::Friendly;
        entity.angle = angle;
    }

    let mut body = Body::with_velocity(1.0, facing * weapon.initial_velocity);
    body.max_speed = weapon.max_speed;
    body.deceleration = weapon.deceleration;
    body.destroy_on_exit = true;
    world.attach(missile, Payload::Body(body));

    let mut propulsion = Propulsion::new(weapon.acceleration, weapon.turn_rate);
    propulsion.linear_throttle = Vec2::new(1.0, 0.0);
    propulsion.directed = true;
    propulsion.exhaust_effect = weapon.projectile_effect.clone();
    world.attach(missile, Payload::Propulsion(propulsion));

    world.attach(
        missile,
        Payload::Behavior(Behavior::new(Steering::Follow(target))),
    );

    let mut collider = Collider::new(8.0, 8.0);
    collider.mask = TeamMask::ENEMY;
    collider.on_collision = Some(Rc::new(|world, own, other| {
        world.deal_damage(other, 2.0);
        world.despawn(own);
    }));
    world.attach(missile, Payload::Collider(collider));
}

fn main() {
    strike_engine::foundation::logging::init();

    let mut session = Session::new(SessionConfig::default());
    let player = spawn_player(&mut session.world);
    let hazards = [
        spawn_hazard(&mut session.world, Vec2::new(200.0, 150.0), Vec2::new(70.0, 35.0)),
        spawn_hazard(&mut session.world, Vec2::new(1000.0, 600.0), Vec2::new(-55.0, -40.0)),
        spawn_hazard(&mut session.world, Vec2::new(300.0, 650.0), Vec2::new(60.0, -50.0)),
    ];

    let mut seeker = Weapon::new("seeker", 0.5, 0.75);
    seeker.initial_velocity = Vec2::new(120.0, 0.0);
    seeker.max_speed = 420.0;
    seeker.acceleration = 320.0;
    seeker.turn_rate = 5.0;
    seeker.projectile_effect = Some("missile_trail".to_owned());
    seeker.muzzle_offset = Vec2::new(30.0, 0.0);

    session.world.targeting.bind(player);
    session.world.targeting.set_weapons(seeker, None);
    session.world.targeting.on_fire = Some(Rc::new(spawn_missile));
    session.world.targeting.on_lock = Some(Rc::new(|_world, target| {
        log::info!("Lock confirmed on {target:?}");
    }));

    for frame in 0..900 {
        // Scripted input standing in for a real event loop.
        match frame {
            30 => session.world.input.push_key(KeyCode::W, true),
            90 => session.world.input.push_key(KeyCode::W, false),
            _ => {}
        }
        if frame == 60 {
            session.world.targeting.set_target(hazards[0]);
        }
        if frame == 150 {
            session.world.targeting.set_target(hazards[1]);
        }
        if frame == 240 {
            session.world.fire_weapon();
        }

        session.tick(FRAME);

        if frame % 300 == 299 {
            log::info!(
                "frame {frame}: {} entities, weapon {:?}",
                session.world.entity_count(),
                session.world.targeting.state()
            );
        }
    }

    let survivors = hazards
        .iter()
        .filter(|&&hazard| session.world.is_alive(hazard))
        .count();
    log::info!("Skirmish over: {survivors} of {} hazards left", hazards.len());
    session.shutdown();
}
