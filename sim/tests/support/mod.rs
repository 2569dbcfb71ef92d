// Shared helpers for the scenario tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use fps_sim::{
    ArmorType, Axis, DamageProfile, Loadout, Material, PlayerId, PlayerInput, SimSettings,
    Simulation, TickReport, Vec3, Wall, WeaponStats, World,
};

// Install the logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

// Simulation over `world` with default tunables.
pub fn simulation(world: World) -> Simulation {
    init_logging();
    Simulation::new(world, SimSettings::default()).expect("default settings are valid")
}

// Wide wall facing z, tall enough to catch any level shot.
pub fn back_wall(z: f32) -> Wall {
    Wall::new(Vec3::new(-1_000.0, 0.0, z), Axis::Z, 2_000.0, 400.0).with_material(Material::Standard)
}

pub fn pistol() -> Loadout {
    Loadout::new(
        WeaponStats::new(DamageProfile::new(35.0, 0.5), 30_000, 300),
        ArmorType::None,
    )
}

pub fn rifle() -> Loadout {
    Loadout::new(
        WeaponStats::new(DamageProfile::new(33.0, 0.7), 45_000, 300),
        ArmorType::None,
    )
}

pub fn inputs(entries: impl IntoIterator<Item = (PlayerId, PlayerInput)>) -> BTreeMap<PlayerId, PlayerInput> {
    entries.into_iter().collect()
}

// Run `ticks` ticks with the same input for one player.
pub fn run(sim: &mut Simulation, id: PlayerId, input: PlayerInput, ticks: u32) -> Vec<TickReport> {
    (0..ticks)
        .map(|_| sim.tick(&inputs([(id, input)])).expect("tick should succeed"))
        .collect()
}
