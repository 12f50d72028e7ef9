//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision::check_body_obstacle;
use super::state::{LossCause, RunState, Session, SessionEvent};

/// Input commands collected between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lift every active body
    pub flap: bool,
    /// Start a fresh run (the driving loop decides whether mid-run resets are allowed)
    pub reset: bool,
    /// Idle/demo mode - flap automatically
    pub autopilot: bool,
}

/// Apply inputs at the tick boundary, then advance the session by one tick
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    if input.reset {
        session.request_reset();
        events.push(SessionEvent::Reset);
    }

    if session.run_state == RunState::Over {
        return events;
    }

    let flap = input.flap || (input.autopilot && autopilot_wants_flap(session));
    if flap && session.apply_impulse() {
        events.push(SessionEvent::Flap);
    }

    step(session, &mut events);
    events
}

/// One pass of the per-tick algorithm
pub fn step(session: &mut Session, events: &mut Vec<SessionEvent>) {
    if session.run_state == RunState::Over {
        log::warn!("Tick ignored: session is over");
        return;
    }

    session.time_ticks += 1;
    let config = session.config.clone();

    // Move bodies and ground
    for body in &mut session.bodies {
        body.advance(&config);
    }
    session.ground.advance();

    // Collisions and passing, marked against a stable set of bodies
    let mut lost: Vec<Option<LossCause>> = vec![None; session.bodies.len()];
    let mut points = 0;
    for obstacle in &mut session.obstacles {
        for (i, body) in session.bodies.iter().enumerate() {
            if lost[i].is_some() {
                continue;
            }
            if check_body_obstacle(body, obstacle, session.sprites.as_mut()) {
                lost[i] = Some(LossCause::Obstacle);
            }
            if !obstacle.passed && body.pos.x > obstacle.x {
                obstacle.passed = true;
                points += 1;
            }
        }
    }

    // Move obstacles and reap the ones that left the world
    for obstacle in &mut session.obstacles {
        obstacle.advance(&config);
    }
    session.obstacles.retain(|o| {
        let keep = !o.is_fully_offscreen();
        if !keep {
            log::debug!("Obstacle {} reaped", o.id);
        }
        keep
    });

    if points > 0 {
        session.score += points;
        events.push(SessionEvent::Scored {
            score: session.score,
        });
        let id = session.spawn_obstacle(config.obstacle_spawn_x());
        events.push(SessionEvent::ObstacleSpawned { id });
    }

    // Ground and ceiling
    for (i, body) in session.bodies.iter().enumerate() {
        if lost[i].is_some() {
            continue;
        }
        let height = session.sprites.body_size(body.frame).y as f32;
        if session.ground.is_below(body.pos.y + height) {
            lost[i] = Some(LossCause::Ground);
        } else if body.pos.y < 0.0 {
            lost[i] = Some(LossCause::Ceiling);
        }
    }

    // Compact
    let mut index = 0;
    session.bodies.retain(|body| {
        let cause = lost[index];
        index += 1;
        match cause {
            Some(cause) => {
                log::debug!("Body {} lost: {:?}", body.id, cause);
                events.push(SessionEvent::BodyLost { id: body.id, cause });
                false
            }
            None => true,
        }
    });

    if session.bodies.is_empty() {
        session.run_state = RunState::Over;
        log::info!("Game over - score {}", session.score);
        events.push(SessionEvent::GameOver {
            score: session.score,
        });
    }
}

/// Demo pilot: flap while sinking toward the lower barrier of the next gap
fn autopilot_wants_flap(session: &Session) -> bool {
    let Some(body) = session.bodies.first() else {
        return false;
    };
    let config = &session.config;
    let falling = body.next_displacement(config) > 0.0;
    if !falling {
        return false;
    }

    let height = session.sprites.body_size(body.frame).y as f32;
    let floor = session
        .obstacles
        .iter()
        .find(|o| o.x + o.size.x as f32 >= body.pos.x)
        .map(|o| o.bottom_edge as f32)
        .unwrap_or(session.ground.y as f32);

    body.pos.y + height + body.next_displacement(config) * 2.0 > floor - 20.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::obstacle::FixedGaps;
    use crate::sim::sprites::ProceduralSprites;
    use glam::Vec2;
    use std::sync::Arc;

    fn scripted(config: Config, gaps: Vec<i32>, bodies: usize) -> Session {
        let sprites = Box::new(ProceduralSprites::new(&config));
        Session::with_parts(Arc::new(config), sprites, Box::new(FixedGaps::new(gaps)), bodies)
            .expect("valid config")
    }

    #[test]
    fn test_body_falls_through_gap_and_scores() {
        // Obstacle starts just right of the body and passes it on the fourth tick
        let config = Config {
            first_obstacle_x: 240.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![250], 1);

        let mut all = Vec::new();
        for _ in 0..4 {
            all.extend(tick(&mut session, &TickInput::default()));
        }

        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.bodies().len(), 1);
        assert_eq!(session.score(), 1);
        assert!(session.obstacles()[0].passed);
        assert_eq!(session.obstacles().len(), 2);
        assert_eq!(session.obstacles()[1].x, 600.0);
        assert!(all.contains(&SessionEvent::Scored { score: 1 }));
        assert!(!all.iter().any(|e| matches!(e, SessionEvent::BodyLost { .. })));
    }

    #[test]
    fn test_no_pass_before_body_is_strictly_past() {
        let config = Config {
            first_obstacle_x: 240.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![250], 1);
        // x = 240, 235, 230 on the first three checks: never strictly behind the body
        for _ in 0..3 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.score(), 0);
        assert!(!session.obstacles()[0].passed);
    }

    #[test]
    fn test_falls_to_ground_without_impulse() {
        let mut session = Session::new(Arc::new(Config::default()), 3).expect("valid");
        let mut over_at = None;
        for t in 1..=100 {
            let events = tick(&mut session, &TickInput::default());
            if session.is_over() {
                assert!(events.contains(&SessionEvent::BodyLost {
                    id: 1,
                    cause: LossCause::Ground,
                }));
                assert!(events.contains(&SessionEvent::GameOver { score: 0 }));
                over_at = Some(t);
                break;
            }
        }
        // Lower edge starts at 398: +21 over the first 3 ticks, then 16 per tick until past 730
        assert_eq!(over_at, Some(23));
        assert!(session.bodies().is_empty());
    }

    #[test]
    fn test_ceiling_ends_run() {
        let mut session = Session::new(Arc::new(Config::default()), 3).expect("valid");
        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        let mut cause = None;
        for _ in 0..200 {
            for event in tick(&mut session, &flap) {
                if let SessionEvent::BodyLost { cause: c, .. } = event {
                    cause = Some(c);
                }
            }
            if session.is_over() {
                break;
            }
        }
        assert!(session.is_over());
        assert_eq!(cause, Some(LossCause::Ceiling));
    }

    #[test]
    fn test_frozen_when_over() {
        let mut session = Session::new(Arc::new(Config::default()), 3).expect("valid");
        while !session.is_over() {
            tick(&mut session, &TickInput::default());
        }
        let before = session.snapshot();
        let events = tick(
            &mut session,
            &TickInput {
                flap: true,
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let config = Arc::new(Config::default());
        let mut session = Session::new(config.clone(), 11).expect("valid");
        while !session.is_over() {
            tick(&mut session, &TickInput::default());
        }

        let events = tick(
            &mut session,
            &TickInput {
                reset: true,
                ..Default::default()
            },
        );
        assert_eq!(events.first(), Some(&SessionEvent::Reset));

        // The reset tick also advanced once; compare against a fresh session advanced once
        let mut fresh = Session::new(config, 11).expect("valid");
        tick(&mut fresh, &TickInput::default());
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.bodies().len(), 1);
        assert_eq!(session.bodies()[0].pos, fresh.bodies()[0].pos);
        assert_eq!(session.obstacles().len(), 1);
        assert_eq!(session.obstacles()[0].x, fresh.obstacles()[0].x);
        assert_eq!(session.time_ticks(), 1);
    }

    #[test]
    fn test_request_reset_matches_construction() {
        let config = Arc::new(Config::default());
        let mut session = Session::new(config, 5).expect("valid");
        while !session.is_over() {
            tick(&mut session, &TickInput::default());
        }
        session.request_reset();

        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_ticks(), 0);
        assert_eq!(session.bodies().len(), 1);
        assert_eq!(session.bodies()[0].pos, Vec2::new(230.0, 350.0));
        assert_eq!(session.bodies()[0].rotation, 0);
        assert_eq!(session.bodies()[0].ticks_since_impulse, 0);
        assert_eq!(session.obstacles().len(), 1);
        assert_eq!(session.obstacles()[0].x, 700.0);
        assert!(!session.obstacles()[0].passed);
        assert_eq!(session.ground().x1, 0.0);
    }

    #[test]
    fn test_multiple_bodies_score_once() {
        let config = Config {
            first_obstacle_x: 240.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![250], 3);
        for _ in 0..4 {
            tick(&mut session, &TickInput::default());
        }
        assert_eq!(session.bodies().len(), 3);
        assert_eq!(session.score(), 1);
        assert_eq!(session.obstacles().len(), 2);
    }

    #[test]
    fn test_collision_removes_body() {
        // Gap far above the body: the lower barrier sits across its path
        let config = Config {
            first_obstacle_x: 240.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![50], 1);
        let events = tick(&mut session, &TickInput::default());
        assert!(events.contains(&SessionEvent::BodyLost {
            id: 1,
            cause: LossCause::Obstacle,
        }));
        assert!(session.is_over());
    }

    #[test]
    fn test_body_lost_once_when_hitting_barrier_and_ground() {
        // Spawned on the ground line inside the lower barrier: the first tick
        // both overlaps the barrier and pushes the lower edge past the ground
        let config = Config {
            first_obstacle_x: 240.0,
            spawn_y: 682.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![50], 1);
        let events = tick(&mut session, &TickInput::default());

        let losses: Vec<&SessionEvent> = events
            .iter()
            .filter(|e| matches!(e, SessionEvent::BodyLost { .. }))
            .collect();
        assert_eq!(
            losses,
            vec![&SessionEvent::BodyLost {
                id: 1,
                cause: LossCause::Obstacle,
            }]
        );
        assert!(session.is_over());
    }

    #[test]
    fn test_obstacles_are_reaped() {
        let config = Config {
            first_obstacle_x: -100.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![250], 1);
        // Passed on the first tick (230 > -100), moved to -105 and reaped
        tick(&mut session, &TickInput::default());
        assert_eq!(session.score(), 1);
        assert_eq!(session.obstacles().len(), 1);
        assert_eq!(session.obstacles()[0].x, 600.0);
    }

    #[test]
    fn test_flap_event_and_lift() {
        let mut session = Session::new(Arc::new(Config::default()), 3).expect("valid");
        let events = tick(
            &mut session,
            &TickInput {
                flap: true,
                ..Default::default()
            },
        );
        assert!(events.contains(&SessionEvent::Flap));
        assert_eq!(session.bodies()[0].pos.y, 350.0 - 11.0);
    }

    #[test]
    fn test_autopilot_flaps_when_sinking() {
        let config = Config {
            first_obstacle_x: 400.0,
            ..Default::default()
        };
        let mut session = scripted(config, vec![150], 1);
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // Gap floor at 350: the body starts sinking below it and must flap
        let mut flapped = false;
        for _ in 0..5 {
            if tick(&mut session, &auto).contains(&SessionEvent::Flap) {
                flapped = true;
                break;
            }
        }
        assert!(flapped);
    }

    #[test]
    fn test_determinism() {
        let config = Arc::new(Config::default());
        let mut a = Session::new(config.clone(), 99999).expect("valid");
        let mut b = Session::new(config, 99999).expect("valid");
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..500 {
            let ea = tick(&mut a, &auto);
            let eb = tick(&mut b, &auto);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
