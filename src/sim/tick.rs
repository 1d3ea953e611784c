//! Fixed timestep simulation tick
//!
//! One call advances one scene by one step. Ordering inside a step is
//! significant: each stage reads the position/velocity the previous stage
//! corrected.

use super::collision::{resolve_ground, resolve_obstacle, sphere_box_collision};
use super::state::{LaunchEvent, LaunchState, SeaState};
use crate::consts::{BOAT_FORWARD_SPEED, BOAT_TURN_RATE};

/// Boat commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct SeaInput {
    /// Throttle held
    pub forward: bool,
    /// Steering in [-1, 1]; negative turns left
    pub turn: f32,
    /// Teleport the boat to (x, z) before the step
    pub place: Option<(f32, f32)>,
}

/// Launch commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct LaunchInput {
    /// Stop and re-seed from the launch parameters
    pub reset: bool,
    /// Begin flight (applied after `reset` when both are set)
    pub start: bool,
}

/// Advance the sea scene: waves, then boat coupling, then boat commands
pub fn tick_sea(state: &mut SeaState, input: &SeaInput, dt: f32) {
    state.time_ticks += 1;

    if let Some((x, z)) = input.place {
        state.boat.set_position(x, z);
    }

    state.sea.advance(dt);
    state.boat.update(&state.sea, dt);

    if input.forward {
        state.boat.move_forward(BOAT_FORWARD_SPEED * dt);
    }
    let turn = input.turn.clamp(-1.0, 1.0);
    if turn != 0.0 {
        state.boat.rotate(turn * BOAT_TURN_RATE * dt);
    }
}

/// Advance the launch scene by one step
///
/// Idle scenes only process commands. A running projectile is integrated,
/// bounced off the ground, resolved against each obstacle in id order,
/// appended to its trail, and finally checked for the stopping condition.
pub fn tick_launch(state: &mut LaunchState, input: &LaunchInput, dt: f32) {
    state.events.clear();

    if input.reset {
        state.reset();
    }
    if input.start {
        state.start();
    }

    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    let params = state.params().clone();
    let projectile = &mut state.projectile;

    projectile.integrate(&params, dt);

    let impact_speed = projectile.velocity.y.abs();
    if resolve_ground(projectile, params.restitution) {
        log::trace!("Ground bounce at {:?}, impact {:.3}", projectile.position, impact_speed);
        state.events.push(LaunchEvent::GroundBounce {
            speed: impact_speed,
        });
    }

    for obstacle in &state.obstacles {
        let contact = sphere_box_collision(projectile.position, projectile.radius, obstacle);
        if contact.collided {
            let speed = projectile.velocity.dot(contact.normal).abs();
            resolve_obstacle(projectile, &contact, params.restitution);
            log::trace!("Obstacle {} hit, normal {:?}", obstacle.id, contact.normal);
            state.events.push(LaunchEvent::ObstacleHit {
                id: obstacle.id,
                speed,
            });
        }
    }

    projectile.record_trail();

    if projectile.is_settled() {
        let position = projectile.position;
        state.stop();
        log::info!("Projectile stopped at {:?} after {} ticks", position, state.time_ticks);
        state.events.push(LaunchEvent::Stopped { position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LaunchParams;
    use crate::consts::{SIM_DT, TRAIL_CAPACITY, TRAIL_MIN_SPACING};
    use crate::sim::obstacle::ObstacleSet;
    use crate::assets::TextureId;
    use crate::sim::projectile::LaunchPhase;
    use glam::Vec3;

    fn start() -> LaunchInput {
        LaunchInput {
            start: true,
            ..Default::default()
        }
    }

    fn vacuum(params: LaunchParams) -> LaunchParams {
        LaunchParams {
            drag_coefficient: 0.0,
            damping_factor: 1.0,
            ..params
        }
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = LaunchState::default();
        let before = state.clone();
        tick_launch(&mut state, &LaunchInput::default(), SIM_DT);
        assert_eq!(state, before);
    }

    #[test]
    fn test_start_then_step() {
        let params = vacuum(LaunchParams {
            launch_speed: 50.0,
            launch_angle: 45.0,
            launch_yaw: 0.0,
            mass: 1.0,
            gravity: 9.81,
            ..Default::default()
        });
        let mut state = LaunchState::new(params, ObstacleSet::new()).unwrap();
        tick_launch(&mut state, &start(), 0.1);

        assert!(state.is_running());
        assert!((state.projectile.velocity.y - 34.374).abs() < 1e-2);
        // Updated velocity drives position (3.937, not 0.5 + 35.36·0.1)
        let expected_y = 0.5 + state.projectile.velocity.y * 0.1;
        assert!((state.projectile.position.y - expected_y).abs() < 1e-4);
        assert_eq!(state.projectile.trail.len(), 1);
    }

    #[test]
    fn test_vertical_elastic_bounce_preserves_speed() {
        let params = vacuum(LaunchParams {
            launch_speed: 20.0,
            launch_angle: 90.0,
            restitution: 1.0,
            gravity: 9.81,
            ..Default::default()
        });
        let mut state = LaunchState::new(params, ObstacleSet::new()).unwrap();
        let launch_vy = state.projectile.velocity.y;

        let mut input = start();
        let mut bounced = false;
        for _ in 0..2000 {
            tick_launch(&mut state, &input, SIM_DT);
            input = LaunchInput::default();
            if state
                .events
                .iter()
                .any(|e| matches!(e, LaunchEvent::GroundBounce { .. }))
            {
                bounced = true;
                break;
            }
        }

        assert!(bounced, "projectile never came back down");
        assert_eq!(state.projectile.position.y, state.projectile.radius);
        assert!(state.projectile.velocity.y > 0.0);
        // One tick of gravity is the integration tolerance
        assert!((state.projectile.velocity.y - launch_vy).abs() < 9.81 * SIM_DT * 1.5);
        assert!(state.is_running());
    }

    #[test]
    fn test_dead_drop_stops_and_stays_stopped() {
        let params = vacuum(LaunchParams {
            launch_speed: 0.0,
            restitution: 0.0,
            gravity: 9.81,
            ..Default::default()
        });
        let mut state = LaunchState::new(params, ObstacleSet::new()).unwrap();
        state.projectile.position = Vec3::new(0.0, 5.0, 0.0);
        state.projectile.velocity = Vec3::ZERO;

        let mut input = start();
        let mut stopped_at = None;
        for i in 0..1000 {
            tick_launch(&mut state, &input, SIM_DT);
            input = LaunchInput::default();
            if !state.is_running() {
                stopped_at = Some(i);
                break;
            }
        }

        assert!(stopped_at.is_some(), "projectile never stopped");
        assert_eq!(state.phase(), LaunchPhase::Idle);
        assert_eq!(state.projectile.velocity, Vec3::ZERO);
        assert!(state.projectile.position.y < 1.0);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, LaunchEvent::Stopped { .. }))
        );

        // No further integration until started again
        let settled = state.projectile.clone();
        for _ in 0..100 {
            tick_launch(&mut state, &LaunchInput::default(), SIM_DT);
        }
        assert_eq!(state.projectile, settled);
    }

    #[test]
    fn test_reset_mid_flight() {
        let mut state = LaunchState::default();
        tick_launch(&mut state, &start(), SIM_DT);
        for _ in 0..30 {
            tick_launch(&mut state, &LaunchInput::default(), SIM_DT);
        }
        assert!(state.projectile.position.y > state.projectile.radius);

        tick_launch(
            &mut state,
            &LaunchInput {
                reset: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(state.phase(), LaunchPhase::Idle);
        assert_eq!(state.projectile.position, state.projectile.launch_origin());
        assert!(state.projectile.trail.is_empty());
    }

    #[test]
    fn test_reset_and_start_same_tick_relaunches() {
        let mut state = LaunchState::default();
        tick_launch(&mut state, &start(), SIM_DT);
        let input = LaunchInput {
            reset: true,
            start: true,
        };
        tick_launch(&mut state, &input, SIM_DT);
        assert!(state.is_running());
        assert_eq!(state.projectile.trail.len(), 1);
    }

    #[test]
    fn test_projectile_bounces_off_wall() {
        // Flat shot straight into a wall on +Z
        let params = vacuum(LaunchParams {
            launch_speed: 20.0,
            launch_angle: 0.0,
            launch_yaw: 0.0,
            gravity: 0.0,
            restitution: 0.5,
            ..Default::default()
        });
        let mut obstacles = ObstacleSet::new();
        let wall = obstacles.push(Vec3::new(0.0, 0.5, 5.0), Vec3::new(10.0, 10.0, 1.0), TextureId::Stone);
        let mut state = LaunchState::new(params, obstacles).unwrap();

        let mut input = start();
        let mut hit = false;
        for _ in 0..240 {
            tick_launch(&mut state, &input, SIM_DT);
            input = LaunchInput::default();
            if state
                .events
                .iter()
                .any(|e| matches!(e, LaunchEvent::ObstacleHit { id, .. } if *id == wall))
            {
                hit = true;
                break;
            }
        }

        assert!(hit);
        assert!((state.projectile.velocity.z + 10.0).abs() < 1e-3);
        // Pushed out in front of the wall's near face (z = 4.5)
        assert!(state.projectile.position.z <= 4.5 - state.projectile.radius + 1e-3);
    }

    #[test]
    fn test_empty_obstacles_is_ground_only() {
        // A box far behind the launch point is never reached
        let params = LaunchParams::default();
        let mut behind = ObstacleSet::new();
        behind.push(Vec3::new(0.0, 1.0, -500.0), Vec3::splat(2.0), TextureId::Brick);
        let mut far_box = LaunchState::new(params.clone(), behind).unwrap();
        let mut ground_only = LaunchState::new(params, ObstacleSet::new()).unwrap();
        let mut input = start();
        for _ in 0..600 {
            tick_launch(&mut far_box, &input, SIM_DT);
            tick_launch(&mut ground_only, &input, SIM_DT);
            input = LaunchInput::default();
        }
        assert_eq!(far_box.projectile, ground_only.projectile);
    }

    #[test]
    fn test_trail_invariants_over_long_flight() {
        let params = LaunchParams {
            launch_speed: 100.0,
            launch_angle: 60.0,
            drag_coefficient: 0.0,
            damping_factor: 1.0,
            restitution: 0.9,
            ..Default::default()
        };
        let mut state = LaunchState::new(params, ObstacleSet::course()).unwrap();
        let mut input = start();
        for _ in 0..5000 {
            tick_launch(&mut state, &input, SIM_DT);
            input = LaunchInput::default();
            assert!(state.projectile.trail.len() <= TRAIL_CAPACITY);
        }
        let points = state.projectile.trail.to_vec();
        for pair in points.windows(2) {
            assert!((pair[1] - pair[0]).abs().max_element() > TRAIL_MIN_SPACING);
        }
    }

    #[test]
    fn test_sea_tick_order() {
        let mut state = SeaState::default();
        state.boat.set_position(2.0, 3.0);
        tick_sea(&mut state, &SeaInput::default(), 0.5);

        // Boat sampled the already-advanced sea
        assert!((state.sea.time() - 0.5).abs() < 1e-6);
        assert_eq!(state.boat.position.y, state.sea.height_at(2.0, 3.0));
    }

    #[test]
    fn test_sea_commands() {
        let mut state = SeaState::default();
        let input = SeaInput {
            forward: true,
            turn: 1.0,
            ..Default::default()
        };
        tick_sea(&mut state, &input, 1.0);
        // Moved 2 units toward -Z, then turned 50 degrees
        assert!((state.boat.position.z + BOAT_FORWARD_SPEED).abs() < 1e-5);
        assert!((state.boat.yaw() - BOAT_TURN_RATE).abs() < 1e-4);
    }

    #[test]
    fn test_sea_place() {
        let mut state = SeaState::default();
        let input = SeaInput {
            place: Some((10.0, -4.0)),
            ..Default::default()
        };
        tick_sea(&mut state, &input, SIM_DT);
        assert_eq!(state.boat.position.x, 10.0);
        assert_eq!(state.boat.position.z, -4.0);
        assert_eq!(state.boat.position.y, state.sea.height_at(10.0, -4.0));
    }
}
