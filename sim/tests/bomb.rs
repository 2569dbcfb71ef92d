mod support;

use fps_sim::{Bomb, SimError, Vec3, World, ms_to_ticks};

fn held_until_done(mut action: impl FnMut() -> bool) -> u32 {
    let mut ticks = 1;
    while !action() {
        ticks += 1;
    }
    ticks
}

#[test]
fn plant_and_defuse_take_their_configured_time() {
    let sim = support::simulation(World::new());
    let tick_ms = sim.settings().tick_ms;

    let mut bomb = Bomb::new(3_000, 5_000, tick_ms);
    assert_eq!(bomb.plant_progress(), (0, ms_to_ticks(3_000, tick_ms)));
    assert_eq!(held_until_done(|| bomb.plant()), 200);

    assert_eq!(held_until_done(|| bomb.defuse(false)), 334);
    bomb.reset();
    assert_eq!(held_until_done(|| bomb.defuse(true)), 167);
}

#[test]
fn blast_damage_falls_off_with_distance() {
    let mut sim = support::simulation(World::new());
    let distances = [0.0, 200.0, 400.0, 600.0, 800.0, 950.0, 1_200.0];
    for (id, x) in distances.iter().enumerate() {
        sim.spawn_player(id as u64, Vec3::new(*x, 0.0, 0.0)).unwrap();
    }

    let mut bomb = Bomb::new(3_000, 5_000, sim.settings().tick_ms);
    bomb.set_position(Vec3::zeros());
    let report = sim.detonate(&bomb).unwrap();

    let damage: Vec<i32> = report.damaged.iter().map(|(_, d)| *d).collect();
    assert_eq!(damage, vec![500, 500, 92, 74, 26, 4]);
    assert!(damage.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(report.killed, vec![0, 1]);

    let health: Vec<i32> = sim.players().map(|p| p.health()).collect();
    assert_eq!(health, vec![0, 0, 8, 26, 74, 96, 100]);
}

#[test]
fn dead_players_are_not_hit_twice() {
    let mut sim = support::simulation(World::new());
    sim.spawn_player(1, Vec3::zeros()).unwrap();

    let mut bomb = Bomb::new(3_000, 5_000, sim.settings().tick_ms);
    bomb.set_position(Vec3::new(0.0, 0.0, 100.0));
    assert_eq!(sim.detonate(&bomb).unwrap().killed, vec![1]);

    let second = sim.detonate(&bomb).unwrap();
    assert!(second.damaged.is_empty());
    assert!(second.killed.is_empty());
}

#[test]
fn unplanted_bomb_cannot_explode() {
    let mut sim = support::simulation(World::new());
    let bomb = Bomb::new(3_000, 5_000, sim.settings().tick_ms);
    assert!(matches!(sim.detonate(&bomb), Err(SimError::BombNotPlanted)));
}
