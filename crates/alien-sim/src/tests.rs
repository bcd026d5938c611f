//! Tests for the engine tick loop, actor interactions and control groups.

use glam::DVec2;

use alien_core::collision::collision_check;
use alien_core::constants::*;
use alien_core::enums::{Direction, DoorRole, RockMode};
use alien_core::events::Notification;
use alien_core::input::{InputState, Key};
use alien_core::level::{ActorRecord, LevelDocument, ObjectRecord};
use alien_tiles::{CollisionTable, GridError};

use crate::actors::Actor;
use crate::engine::{SimConfig, SimError, Simulation};

const FLOOR: u32 = 0x0101;
const WATER: u32 = 0x0201;
const WATER_BODY: u32 = 0x0202;

/// Player standing on the floor of `room()` at column 2.
const PLAYER_X: f64 = 64.0;
const PLAYER_Y: f64 = 178.0;

/// 10x8 tiles, solid floor along the bottom row.
fn room() -> Vec<Vec<u32>> {
    let mut tiles = vec![vec![SPRITE_EMPTY; 10]; 8];
    tiles[7] = vec![FLOOR; 10];
    tiles
}

fn object(name: &str, x: f64, y: f64, actor: ActorRecord) -> ObjectRecord {
    ObjectRecord {
        name: name.to_string(),
        x,
        y,
        actor,
    }
}

fn player_at(x: f64, y: f64) -> ObjectRecord {
    object(DEFAULT_PLAYER_NAME, x, y, ActorRecord::Player {})
}

fn make_sim(level: Vec<Vec<u32>>, objects: Vec<ObjectRecord>) -> Simulation {
    let doc = LevelDocument {
        version: LEVEL_VERSION,
        level,
        objects,
    };
    Simulation::from_document(&doc, CollisionTable::standard(), SimConfig::default()).unwrap()
}

fn run(sim: &mut Simulation, input: &InputState, ticks: usize) -> Vec<Notification> {
    let mut out = Vec::new();
    for _ in 0..ticks {
        out.extend(sim.tick(input).unwrap().notifications);
    }
    out
}

fn deaths(notifications: &[Notification]) -> Vec<(String, Option<u32>)> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Died { reason, sprite } => Some((reason.clone(), *sprite)),
            _ => None,
        })
        .collect()
}

fn reported_events(notifications: &[Notification]) -> Vec<String> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Position(report) => Some(report.events.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

fn door_state(sim: &Simulation, name: &str) -> bool {
    match sim.actor(name) {
        Some(Actor::Door(door)) => door.state,
        other => panic!("{name} is not a door: {other:?}"),
    }
}

fn enemy() -> ActorRecord {
    ActorRecord::Enemy {
        sprite: 0x0A10,
        aggression_level: 0,
        killable: true,
    }
}

fn worm() -> ActorRecord {
    ActorRecord::Worm {
        sprite: 0x0C00,
        max_height: WORM_DEFAULT_MAX_HEIGHT,
    }
}

// ---- Player on static terrain ----

#[test]
fn test_player_rests_on_floor() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 30);

    let player = sim.player().unwrap();
    assert_eq!(player.body.pos, DVec2::new(PLAYER_X, PLAYER_Y), "player should not sink");
    assert!(player.grounded);
}

#[test]
fn test_first_tick_reports_restart_then_quiet() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);

    let first = sim.tick(&InputState::new()).unwrap();
    assert_eq!(first.time.tick, 1);
    match first.notifications.as_slice() {
        [Notification::Position(report)] => {
            assert_eq!(report.events, vec!["RESTART".to_string()]);
            assert_eq!(report.x, 2.0);
            assert_eq!(report.timestamp, 0.0);
        }
        other => panic!("expected one position report, got {other:?}"),
    }

    let second = sim.tick(&InputState::new()).unwrap();
    assert!(second.notifications.is_empty(), "standing still reports nothing");
}

#[test]
fn test_walking_reports_position() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    let right = InputState::new().with(Key::Right);
    let out = run(&mut sim, &right, 10);
    assert_eq!(out.len(), 10, "one report per moving tick");
    assert!(sim.player().unwrap().body.pos.x > PLAYER_X);
}

#[test]
fn test_wall_stops_player() {
    let mut tiles = room();
    for row in tiles.iter_mut().take(7) {
        row[5] = FLOOR;
    }
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new().with(Key::Right), 120);

    let player = sim.player().unwrap();
    assert!(
        player.body.pos.x + player.body.size.x <= 5.0 * TILE_SIZE,
        "player passed through the wall: x = {}",
        player.body.pos.x
    );
}

#[test]
fn test_jump_without_super_jump_stays_at_base_speed() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    sim.tick(&InputState::new().with(Key::Space)).unwrap();
    let after_jump = sim.player().unwrap().body.vel.y;
    assert!(after_jump < 0.0, "player should be moving up");

    for _ in 0..10 {
        sim.tick(&InputState::new().with(Key::Up)).unwrap();
        let vel = sim.player().unwrap().body.vel.y;
        assert!(vel.abs() <= JUMP_SPEED, "vertical speed {vel} exceeds a normal jump");
    }
}

#[test]
fn test_super_jump_with_marker() {
    let mut tiles = room();
    tiles[0][2] = PERMISSION_TILE_BASE + 4;
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    sim.tick(&InputState::new().with(Key::Space)).unwrap();
    sim.tick(&InputState::new().with(Key::Up)).unwrap();
    let vel = sim.player().unwrap().body.vel.y;
    assert!((vel - (GRAVITY - SUPER_JUMP_SPEED)).abs() < 1e-9, "got {vel}");
}

#[test]
fn test_exit_finishes_once() {
    let mut tiles = room();
    tiles[6][2] = SPRITE_EXIT;
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);

    let out = run(&mut sim, &InputState::new(), 20);
    let finished = out
        .iter()
        .filter(|n| matches!(n, Notification::Finished))
        .count();
    assert_eq!(finished, 1);
    assert!(sim.player().unwrap().finished);
    assert_eq!(
        reported_events(&out).iter().filter(|e| *e == "EXIT").count(),
        1
    );
}

#[test]
fn test_finished_player_ignores_input() {
    let mut tiles = room();
    tiles[6][2] = SPRITE_EXIT;
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);
    run(&mut sim, &InputState::new().with(Key::Right), 10);
    assert_eq!(sim.player().unwrap().body.pos.x, PLAYER_X);
}

#[test]
fn test_drowning_in_water() {
    let mut tiles = room();
    tiles[7] = vec![WATER; 10];
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);

    let out = run(&mut sim, &InputState::new(), 40);
    assert_eq!(deaths(&out), vec![("water".to_string(), Some(WATER))]);
    assert!(!sim.player().unwrap().alive);
    assert!(reported_events(&out).contains(&"DIED_WATER".to_string()));

    let y = sim.player().unwrap().body.pos.y;
    run(&mut sim, &InputState::new(), 5);
    assert_eq!(sim.player().unwrap().body.pos.y, y, "dead player is frozen");
}

#[test]
fn test_water_body_kills_on_contact() {
    let mut tiles = room();
    tiles[7] = vec![WATER_BODY; 10];
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    let out = run(&mut sim, &InputState::new(), 1);
    assert_eq!(deaths(&out).len(), 1);
}

#[test]
fn test_water_walker_skims_while_moving() {
    let mut tiles = room();
    tiles[0] = vec![PERMISSION_TILE_BASE + 1; 10];
    tiles[7] = vec![WATER; 10];
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);

    let out = run(&mut sim, &InputState::new().with(Key::Right), 20);
    assert!(deaths(&out).is_empty());
    let player = sim.player().unwrap();
    assert!(player.alive && player.grounded);
}

#[test]
fn test_gravity_flip_walks_on_ceiling() {
    let mut tiles = room();
    tiles[1] = vec![FLOOR; 10];
    tiles[0] = vec![PERMISSION_TILE_BASE + 3; 10];
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    let out = run(&mut sim, &InputState::new().with(Key::Up).with(Key::Down), 1);
    assert!(reported_events(&out).contains(&"GRAVITY_INVERTED".to_string()));
    run(&mut sim, &InputState::new(), 120);

    let player = sim.player().unwrap();
    assert!(player.gravity < 0.0);
    assert_eq!(player.body.pos.y, 2.0 * TILE_SIZE, "head rests under the ceiling row");
    assert!(player.grounded);
}

#[test]
fn test_fly_marker_lifts_player() {
    let mut tiles = room();
    tiles[0][2] = PERMISSION_TILE_BASE + 2;
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    sim.tick(&InputState::new().with(Key::Up)).unwrap();
    let player = sim.player().unwrap();
    let vel = player.body.vel.y;
    assert!((vel - (-FLY_SPEED + GRAVITY)).abs() < 1e-9, "got {vel}");
    assert!(player.body.pos.y < PLAYER_Y);

    run(&mut sim, &InputState::new().with(Key::Up), 9);
    assert!(sim.player().unwrap().body.pos.y < PLAYER_Y - 10.0, "still climbing");
}

#[test]
fn test_up_and_down_together_do_not_fly() {
    let mut tiles = room();
    tiles[0][2] = PERMISSION_TILE_BASE + 2;
    let mut sim = make_sim(tiles, vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    run(&mut sim, &InputState::new().with(Key::Up).with(Key::Down), 5);
    let player = sim.player().unwrap();
    assert_eq!(player.body.pos.y, PLAYER_Y);
    assert!(player.gravity > 0.0, "no flip without the upside-down marker");
}

#[test]
fn test_up_without_fly_marker_stays_grounded() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 1);

    run(&mut sim, &InputState::new().with(Key::Up), 10);
    let player = sim.player().unwrap();
    assert_eq!(player.body.pos.y, PLAYER_Y);
    assert!(player.grounded);
}

// ---- Creatures ----

#[test]
fn test_stomping_killable_enemy() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("enemy_1", PLAYER_X, 190.0, enemy()),
        ],
    );
    let out = run(&mut sim, &InputState::new(), 1);

    match sim.actor("enemy_1") {
        Some(Actor::Enemy(enemy)) => assert!(!enemy.alive),
        other => panic!("unexpected {other:?}"),
    }
    assert!(deaths(&out).is_empty());
    assert!(reported_events(&out).contains(&"KILLED_ENEMY".to_string()));

    // Dying enemies fall and spin.
    run(&mut sim, &InputState::new(), 10);
    match sim.actor("enemy_1") {
        Some(Actor::Enemy(enemy)) => assert!(enemy.rotation > 0.0),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_stomped_enemy_takes_player_fall_speed() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, 100.0),
            object("enemy_1", PLAYER_X, 192.0, enemy()),
        ],
    );

    for _ in 0..60 {
        // The enemy updates before the player, so it sees last tick's speed.
        let falling = sim.player().unwrap().body.vel.y;
        run(&mut sim, &InputState::new(), 1);
        let Some(Actor::Enemy(enemy)) = sim.actor("enemy_1") else {
            panic!("enemy_1 missing");
        };
        if !enemy.alive {
            assert!(falling > 0.0, "player should land on the enemy from above");
            assert_eq!(enemy.body.vel.y, falling);
            return;
        }
    }
    panic!("the player never stomped the enemy");
}

#[test]
fn test_aggressive_enemy_kills_player_beneath() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object(
                "enemy_1",
                PLAYER_X,
                160.0,
                ActorRecord::Enemy {
                    sprite: 0x0A10,
                    aggression_level: 1,
                    killable: true,
                },
            ),
        ],
    );
    let out = run(&mut sim, &InputState::new(), 3);
    assert_eq!(deaths(&out), vec![("enemy".to_string(), Some(0x0A10))]);
}

#[test]
fn test_passive_enemy_stays_home() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("enemy_1", 256.0, 64.0, enemy()),
        ],
    );
    run(&mut sim, &InputState::new(), 30);
    assert_eq!(
        sim.actor("enemy_1").unwrap().body().pos,
        DVec2::new(256.0, 64.0)
    );
}

#[test]
fn test_enemy_requires_player() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("enemy_1", 256.0, 64.0, enemy()),
        ],
    );
    sim.remove_actor(DEFAULT_PLAYER_NAME);
    let err = sim.tick(&InputState::new()).unwrap_err();
    assert!(matches!(err, SimError::MissingActor(name) if name == DEFAULT_PLAYER_NAME));
    assert!(sim.actor("enemy_1").is_some(), "failed update keeps the actor");
}

#[test]
fn test_worm_kills_on_contact() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("worm_1", PLAYER_X, 192.0, worm()),
        ],
    );
    let out = run(&mut sim, &InputState::new(), 1);
    assert_eq!(deaths(&out), vec![("worm/worm_1".to_string(), Some(0x0C00))]);
    assert!(reported_events(&out).contains(&"DIED_WORM/WORM_1".to_string()));
}

#[test]
fn test_worm_rears_up_to_player_overhead() {
    // Player on a ledge at row 7, worm on the floor four rows below.
    let mut tiles = vec![vec![SPRITE_EMPTY; 10]; 12];
    for tile in tiles[7].iter_mut().take(4) {
        *tile = FLOOR;
    }
    tiles[11] = vec![FLOOR; 10];
    let mut sim = make_sim(
        tiles,
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("worm_1", PLAYER_X, 320.0, worm()),
        ],
    );

    let first = run(&mut sim, &InputState::new(), 1);
    assert!(deaths(&first).is_empty());
    match sim.actor("worm_1") {
        Some(Actor::Worm(worm)) => {
            assert!(worm.rearing);
            assert!(worm.body.size.y > ACTOR_SIZE);
            assert!((worm.body.pos.y + worm.body.size.y - 352.3).abs() < 1e-6, "base stays put");
        }
        other => panic!("unexpected {other:?}"),
    }

    let out = run(&mut sim, &InputState::new(), 10);
    assert_eq!(deaths(&out).len(), 1, "the worm reaches the player");
}

#[test]
fn test_frog_eats_worm() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(256.0, PLAYER_Y),
            object("frog_1", PLAYER_X, 192.0, ActorRecord::Frog { sprite: 0x0D00 }),
            object("worm_1", PLAYER_X, 192.0, worm()),
        ],
    );
    run(&mut sim, &InputState::new(), 1);
    assert_eq!(sim.actor("worm_1").and_then(Actor::alive), Some(false));
}

#[test]
fn test_snail_settles_on_floor() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(256.0, PLAYER_Y),
            object("snail_1", PLAYER_X, 100.0, ActorRecord::Snail { sprite: 0x0E00 }),
        ],
    );
    run(&mut sim, &InputState::new(), 60);
    let body = sim.actor("snail_1").unwrap().body();
    let bottom = body.pos.y + body.size.y;
    assert!((224.0..=224.5).contains(&bottom), "snail bottom at {bottom}");
}

// ---- Rocks ----

#[test]
fn test_rock_petrifies_quicksand_run() {
    let mut tiles = room();
    for x in 3..=5 {
        tiles[7][x] = SPRITE_QUICKSAND;
    }
    let mut sim = make_sim(
        tiles,
        vec![
            player_at(256.0, PLAYER_Y),
            object("rock_1", 128.0, 192.0, ActorRecord::Rock { sprite: 0x0601 }),
        ],
    );
    run(&mut sim, &InputState::new(), 1);

    let Some(Actor::Rock(rock)) = sim.actor("rock_1") else {
        panic!("rock_1 missing");
    };
    assert_eq!(rock.mode, RockMode::Ground);
    assert_eq!(rock.body.pos, DVec2::new(96.0, 224.0));
    assert_eq!(rock.body.size, DVec2::new(96.0, 32.0));
    assert_eq!(rock.collider(), rock.body.aabb());

    run(&mut sim, &InputState::new(), 30);
    assert_eq!(
        sim.actor("rock_1").unwrap().body().pos,
        DVec2::new(96.0, 224.0),
        "ground slabs never move"
    );
}

#[test]
fn test_player_stands_on_rock() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, 100.0),
            object("rock_1", PLAYER_X, 192.0, ActorRecord::Rock { sprite: 0x0601 }),
        ],
    );
    run(&mut sim, &InputState::new(), 60);
    let player = sim.player().unwrap();
    let rock_top = sim.actor("rock_1").unwrap().collider().unwrap().y;
    assert!(
        (player.body.pos.y + player.body.size.y - rock_top).abs() < 1.0,
        "player feet {} vs rock top {rock_top}",
        player.body.pos.y + player.body.size.y
    );
}

fn rock_x(sim: &Simulation) -> f64 {
    sim.actor("rock_1").unwrap().body().pos.x
}

#[test]
fn test_rock_pushed_only_while_action_held() {
    // Rock overlaps the player's right edge by 3px.
    let start = PLAYER_X + PLAYER_WIDTH - 3.0;
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("rock_1", start, 192.0, ActorRecord::Rock { sprite: 0x0601 }),
        ],
    );
    run(&mut sim, &InputState::new(), 5);
    assert_eq!(rock_x(&sim), start, "no push without the action key");

    let strip = sim.actor("rock_1").unwrap().body().contact_strip();
    let hit = collision_check(&strip, &sim.player().unwrap().body.aabb()).unwrap();
    assert_eq!(hit.normal.x, 3.0);

    run(&mut sim, &InputState::new().with(Key::P), 1);
    assert_eq!(rock_x(&sim), start + hit.normal.x);

    run(&mut sim, &InputState::new().with(Key::P), 5);
    assert_eq!(rock_x(&sim), start + hit.normal.x, "clear of the player, no more push");
}

#[test]
fn test_frog_ignores_deep_push() {
    let frog = ActorRecord::Frog { sprite: 0x0D00 };
    let shallow = PLAYER_X + PLAYER_WIDTH - 3.0;
    let deep = PLAYER_X + PLAYER_WIDTH - 8.0;

    let push = InputState::new().with(Key::P);
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("frog_1", deep, 192.0, frog.clone()),
        ],
    );
    run(&mut sim, &push, 5);
    assert_eq!(sim.actor("frog_1").unwrap().body().pos.x, deep);

    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("frog_1", shallow, 192.0, frog),
        ],
    );
    run(&mut sim, &push, 1);
    assert_eq!(sim.actor("frog_1").unwrap().body().pos.x, shallow + 3.0);
}

// ---- Control groups ----

fn switch(group: u32) -> ActorRecord {
    ActorRecord::Switch {
        sprite: 0x0704,
        control_group: group,
        active_state: 0x0705,
    }
}

#[test]
fn test_two_switches_open_door_together() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object(
                "door_a",
                256.0,
                PLAYER_Y,
                ActorRecord::Door {
                    direction: DoorRole::Target,
                    control_group: 1,
                    sprite: 0x0801,
                },
            ),
            object("switch_a", PLAYER_X, 192.0, switch(1)),
            object("switch_b", PLAYER_X + 8.0, 192.0, switch(1)),
        ],
    );
    assert!(!door_state(&sim, "door_a"), "no recompute at reset");

    let push = InputState::new().with(Key::P);
    run(&mut sim, &push, 1);
    assert!(door_state(&sim, "door_a"), "both switches toggled");
    assert!(sim.context().control_groups.get(1).unwrap().state());

    run(&mut sim, &push, 5);
    assert!(door_state(&sim, "door_a"), "holding the key does not toggle again");

    run(&mut sim, &InputState::new(), 1);
    run(&mut sim, &push, 1);
    assert!(!door_state(&sim, "door_a"), "switches moved past the active state");
}

#[test]
fn test_single_switch_is_not_enough() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("door_a", 256.0, PLAYER_Y, ActorRecord::Door {
                direction: DoorRole::Target,
                control_group: 1,
                sprite: 0x0801,
            }),
            object("switch_a", PLAYER_X, 192.0, switch(1)),
            object("switch_far", 256.0, 192.0, switch(1)),
        ],
    );
    run(&mut sim, &InputState::new().with(Key::P), 1);
    assert!(!door_state(&sim, "door_a"));
    match sim.actor("switch_a") {
        Some(Actor::Switch(s)) => assert!(s.is_active()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_door_teleports_to_target() {
    let door = |role| ActorRecord::Door {
        direction: role,
        control_group: 2,
        sprite: 0x0801,
    };
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("door_dst", 224.0, PLAYER_Y, door(DoorRole::Target)),
            object("door_src", PLAYER_X, 192.0, door(DoorRole::Source)),
        ],
    );
    run(&mut sim, &InputState::new(), 1);
    assert_eq!(sim.player().unwrap().body.pos, DVec2::new(224.0, PLAYER_Y));
}

#[test]
fn test_door_target_side_does_not_teleport() {
    let door = |role| ActorRecord::Door {
        direction: role,
        control_group: 2,
        sprite: 0x0801,
    };
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("door_dst", PLAYER_X, 192.0, door(DoorRole::Target)),
            object("door_src", 256.0, 192.0, door(DoorRole::Source)),
        ],
    );
    run(&mut sim, &InputState::new(), 3);
    assert_eq!(sim.player().unwrap().body.pos, DVec2::new(PLAYER_X, PLAYER_Y));
}

#[test]
fn test_hitswitch_extends_platform() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object(
                "hit_1",
                PLAYER_X,
                192.0,
                ActorRecord::HitSwitch {
                    control_group: 3,
                    sprite: 0x0710,
                },
            ),
            object(
                "platform_1",
                160.0,
                128.0,
                ActorRecord::Platform {
                    direction: Direction::Right,
                    distance: 2,
                    control_group: 3,
                    sprite: 0x0720,
                },
            ),
        ],
    );
    run(&mut sim, &InputState::new(), 1);

    let Some(Actor::Platform(platform)) = sim.actor("platform_1") else {
        panic!("platform_1 missing");
    };
    assert!(platform.state);
    assert_eq!(platform.body.pos, DVec2::new(160.0, 128.0));
    assert_eq!(platform.body.size, DVec2::new(96.0, 32.0));
    assert_eq!(sim.actor("hit_1").and_then(Actor::is_active), Some(true));
}

#[test]
fn test_set_control_group_moves_membership() {
    let mut sim = make_sim(
        room(),
        vec![
            player_at(PLAYER_X, PLAYER_Y),
            object("switch_a", 256.0, 192.0, switch(1)),
            object("rock_1", 32.0, 192.0, ActorRecord::Rock { sprite: 0x0601 }),
        ],
    );
    sim.set_control_group("switch_a", 5).unwrap();

    let groups = &sim.context().control_groups;
    assert_eq!(groups.get(1).unwrap().sensors().count(), 0);
    assert_eq!(groups.get(5).unwrap().sensors().collect::<Vec<_>>(), vec!["switch_a"]);
    assert_eq!(sim.actor("switch_a").unwrap().control_group(), Some(5));

    assert!(matches!(
        sim.set_control_group("rock_1", 5),
        Err(SimError::NotGroupMember(_))
    ));
    assert!(matches!(
        sim.set_control_group("nobody", 5),
        Err(SimError::UnknownActor(_))
    ));
}

// ---- Lifecycle ----

fn every_kind() -> Vec<ObjectRecord> {
    vec![
        player_at(PLAYER_X, PLAYER_Y),
        object("enemy_1", 256.0, 64.0, enemy()),
        object("worm_1", 288.0, 192.0, worm()),
        object("rock_1", 128.0, 192.0, ActorRecord::Rock { sprite: 0x0601 }),
        object("frog_1", 160.0, 192.0, ActorRecord::Frog { sprite: 0x0D00 }),
        object("snail_1", 192.0, 100.0, ActorRecord::Snail { sprite: 0x0E00 }),
        object("bomb_1", 224.0, 100.0, ActorRecord::Bomb { sprite: 0x0F00 }),
        object("switch_a", PLAYER_X, 192.0, switch(1)),
        object(
            "platform_1",
            96.0,
            64.0,
            ActorRecord::Platform {
                direction: Direction::Left,
                distance: 1,
                control_group: 1,
                sprite: 0x0720,
            },
        ),
    ]
}

#[test]
fn test_reset_restores_initial_snapshot() {
    let mut tiles = room();
    tiles[7][4] = SPRITE_QUICKSAND;
    let mut sim = make_sim(tiles, every_kind());
    let initial = sim.snapshot();

    run(&mut sim, &InputState::new().with(Key::P).with(Key::Right), 30);
    assert_ne!(sim.snapshot(), initial, "the level should have changed");

    sim.reset().unwrap();
    assert_eq!(sim.snapshot(), initial);
}

#[test]
fn test_document_round_trip() {
    let sim = make_sim(room(), every_kind());
    let doc = sim.to_document();
    assert_eq!(doc.version, LEVEL_VERSION);
    assert_eq!(doc.level, room());
    assert_eq!(doc.objects.len(), every_kind().len());

    let rebuilt =
        Simulation::from_document(&doc, CollisionTable::standard(), SimConfig::default()).unwrap();
    assert_eq!(rebuilt.to_document(), doc);
    assert_eq!(rebuilt.snapshot(), sim.snapshot());
}

#[test]
fn test_missing_player_fails_reset() {
    let doc = LevelDocument {
        version: LEVEL_VERSION,
        level: room(),
        objects: vec![object("enemy_1", 0.0, 0.0, enemy())],
    };
    let err = Simulation::from_document(&doc, CollisionTable::standard(), SimConfig::default())
        .err()
        .expect("no player");
    assert!(matches!(err, SimError::MissingActor(_)));
}

#[test]
fn test_custom_player_name() {
    let doc = LevelDocument {
        version: LEVEL_VERSION,
        level: room(),
        objects: vec![object("hero", PLAYER_X, PLAYER_Y, ActorRecord::Player {})],
    };
    let config = SimConfig {
        player_name: "hero".to_string(),
        ..SimConfig::default()
    };
    let sim = Simulation::from_document(&doc, CollisionTable::standard(), config).unwrap();
    assert!(sim.player().is_some());
}

#[test]
fn test_set_tile_grows_grid_and_rebuilds_index() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    let before = sim.context().spatial_index().len();

    sim.set_tile(12, 2, FLOOR).unwrap();
    assert_eq!(sim.context().grid.width(), 13);
    assert_eq!(sim.context().spatial_index().len(), before + 1);
    assert_eq!(sim.to_document().level[2][12], FLOOR);

    let err = sim.set_tile(-1, 0, FLOOR).unwrap_err();
    assert!(matches!(
        err,
        SimError::Grid(GridError::NegativeCoordinate { x: -1, y: 0 })
    ));
}

#[test]
fn test_clock_advances_by_tick_duration() {
    let mut sim = make_sim(room(), vec![player_at(PLAYER_X, PLAYER_Y)]);
    run(&mut sim, &InputState::new(), 60);
    assert_eq!(sim.time().tick, 60);
    assert!((sim.time().elapsed_ms - 60.0 * TICK_MS).abs() < 1e-6);
}

#[test]
fn test_determinism_same_inputs() {
    let mut tiles = room();
    tiles[7][4] = SPRITE_QUICKSAND;
    let mut a = make_sim(tiles.clone(), every_kind());
    let mut b = make_sim(tiles, every_kind());

    for i in 0..200 {
        let input = if i % 40 < 20 {
            InputState::new().with(Key::Right).with(Key::P)
        } else {
            InputState::new().with(Key::Left).with(Key::Space)
        };
        let ra = serde_json::to_string(&a.tick(&input).unwrap()).unwrap();
        let rb = serde_json::to_string(&b.tick(&input).unwrap()).unwrap();
        assert_eq!(ra, rb, "reports diverged at tick {i}");
    }
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config: SimConfig = serde_json::from_str(r#"{ "tick_ms": 20.0 }"#).unwrap();
    assert_eq!(config.tick_ms, 20.0);
    assert_eq!(config.flip_debounce_ms, GRAVITY_FLIP_DEBOUNCE_MS);
    assert_eq!(config.player_name, DEFAULT_PLAYER_NAME);
}
