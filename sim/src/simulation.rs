use std::collections::BTreeMap;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::ballistics::{AttackResult, Shot, fire};
use crate::bomb::Bomb;
use crate::error::SimError;
use crate::geometry::Vec3;
use crate::movement::advance_player;
use crate::player::{Loadout, Player, PlayerId, PlayerInput, PlayerSnapshot};
use crate::settings::SimSettings;
use crate::world::World;

/// What one tick produced.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Attacks resolved this tick, by ascending shooter id.
    pub attacks: Vec<(PlayerId, AttackResult)>,
}

/// Damage dealt by one explosion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlastReport {
    pub damaged: Vec<(PlayerId, i32)>,
    pub killed: Vec<PlayerId>,
}

/// Authoritative match state: the world plus every player, advanced one tick at a time.
pub struct Simulation {
    world: World,
    settings: SimSettings,
    players: BTreeMap<PlayerId, Player>,
    tick: u64,
}

/// Log a contract violation and hand it back to the caller.
fn violation(err: SimError) -> SimError {
    error!("{err}");
    err
}

impl Simulation {
    pub fn new(mut world: World, settings: SimSettings) -> Result<Self, SimError> {
        settings.validate().map_err(violation)?;
        world.set_floor_tolerance(settings.floor_tolerance);
        Ok(Self {
            world,
            settings,
            players: BTreeMap::new(),
            tick: 0,
        })
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Number of ticks advanced so far.
    #[inline]
    pub fn tick_id(&self) -> u64 {
        self.tick
    }

    pub fn spawn_player(&mut self, id: PlayerId, position: Vec3) -> Result<&mut Player, SimError> {
        if self.players.contains_key(&id) {
            return Err(violation(SimError::DuplicatePlayer(id)));
        }
        info!("player {id} spawned at {position:?}");
        Ok(self
            .players
            .entry(id)
            .or_insert_with(|| Player::new(id, position, &self.settings)))
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, SimError> {
        self.players
            .get(&id)
            .ok_or_else(|| violation(SimError::UnknownPlayer(id)))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, SimError> {
        self.players
            .get_mut(&id)
            .ok_or_else(|| violation(SimError::UnknownPlayer(id)))
    }

    fn live_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, SimError> {
        let player = self.player_mut(id)?;
        if !player.is_alive() {
            return Err(violation(SimError::PlayerDead(id)));
        }
        Ok(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn is_alive(&self, id: PlayerId) -> Result<bool, SimError> {
        self.player(id).map(Player::is_alive)
    }

    pub fn set_loadout(&mut self, id: PlayerId, loadout: Loadout) -> Result<(), SimError> {
        self.player_mut(id)?.set_loadout(loadout);
        Ok(())
    }

    /// Add money to a player's balance (negative to spend). Returns the new balance.
    pub fn earn_money(&mut self, id: PlayerId, amount: i32) -> Result<i32, SimError> {
        let max = self.settings.max_money;
        let player = self.player_mut(id)?;
        player.earn_money(amount, max);
        Ok(player.money())
    }

    pub fn respawn(&mut self, id: PlayerId, position: Vec3) -> Result<(), SimError> {
        let settings = self.settings;
        self.player_mut(id)?.respawn(position, &settings);
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Every live player moves first, in ascending id order; players without an input
    /// entry only fall or stand. Attacks are resolved afterwards, also by ascending id,
    /// so every shot sees the positions of the end of the tick.
    pub fn tick(&mut self, inputs: &BTreeMap<PlayerId, PlayerInput>) -> Result<TickReport, SimError> {
        for id in inputs.keys() {
            self.live_player_mut(*id)?;
        }
        self.tick += 1;

        let idle = PlayerInput::default();
        for (id, player) in self.players.iter_mut() {
            if !player.is_alive() {
                continue;
            }
            let input = inputs.get(id).unwrap_or(&idle);
            advance_player(&self.world, &self.settings, player, input);
        }

        let mut report = TickReport {
            tick: self.tick,
            attacks: Vec::new(),
        };
        for (id, input) in inputs {
            if !input.attack {
                continue;
            }
            if !self.player(*id)?.is_alive() {
                warn!("player {id} was killed earlier in tick {}; attack dropped", self.tick);
                continue;
            }
            let result = self.attack(*id)?;
            report.attacks.push((*id, result));
        }
        Ok(report)
    }

    /// Fire the player's weapon along its current look direction.
    pub fn attack(&mut self, id: PlayerId) -> Result<AttackResult, SimError> {
        let settings = self.settings;
        let shot = Shot::from_player(self.live_player_mut(id)?, &settings);
        let result = fire(&self.world, &mut self.players, &shot, &settings);
        if result.money_award != 0 {
            self.live_player_mut(id)?
                .earn_money(result.money_award, settings.max_money);
        }
        Ok(result)
    }

    /// Apply the explosion of a planted bomb to every live player.
    pub fn detonate(&mut self, bomb: &Bomb) -> Result<BlastReport, SimError> {
        if bomb.position().is_none() {
            return Err(violation(SimError::BombNotPlanted));
        }
        let mut report = BlastReport::default();
        for (id, player) in self.players.iter_mut() {
            if !player.is_alive() {
                continue;
            }
            let damage = bomb.damage_at(&player.position());
            if damage == 0 {
                continue;
            }
            report.damaged.push((*id, damage));
            if player.lower_health(damage) {
                report.killed.push(*id);
            }
        }
        info!(
            "bomb exploded: {} damaged, {} killed",
            report.damaged.len(),
            report.killed.len()
        );
        Ok(report)
    }

    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players
            .values()
            .map(|p| p.snapshot(&self.settings))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(World::new(), SimSettings::default()).unwrap()
    }

    #[test]
    fn duplicate_and_unknown_players_are_errors() {
        let mut sim = sim();
        sim.spawn_player(1, Vec3::zeros()).unwrap();
        assert!(matches!(
            sim.spawn_player(1, Vec3::zeros()),
            Err(SimError::DuplicatePlayer(1))
        ));
        assert!(matches!(sim.is_alive(7), Err(SimError::UnknownPlayer(7))));

        let mut inputs = BTreeMap::new();
        inputs.insert(7, PlayerInput::default());
        assert!(matches!(sim.tick(&inputs), Err(SimError::UnknownPlayer(7))));
        assert_eq!(sim.tick_id(), 0);
    }

    #[test]
    fn dead_players_cannot_act() {
        let mut sim = sim();
        sim.spawn_player(1, Vec3::zeros()).unwrap().lower_health(1_000);
        assert!(matches!(sim.attack(1), Err(SimError::PlayerDead(1))));

        let mut inputs = BTreeMap::new();
        inputs.insert(1, PlayerInput::default());
        assert!(matches!(sim.tick(&inputs), Err(SimError::PlayerDead(1))));

        sim.respawn(1, Vec3::zeros()).unwrap();
        assert!(sim.is_alive(1).unwrap());
        assert!(sim.tick(&inputs).is_ok());
    }

    #[test]
    fn money_is_clamped_through_simulation() {
        let mut sim = sim();
        sim.spawn_player(1, Vec3::zeros()).unwrap();
        assert_eq!(sim.earn_money(1, 20_000).unwrap(), 16_000);
        assert_eq!(sim.earn_money(1, -17_000).unwrap(), 0);
    }

    #[test]
    fn detonation_requires_a_planted_bomb() {
        let mut sim = sim();
        sim.spawn_player(1, Vec3::zeros()).unwrap();
        sim.spawn_player(2, Vec3::new(0.0, 0.0, 5_000.0)).unwrap();

        let mut bomb = Bomb::new(3_000, 5_000, sim.settings().tick_ms);
        assert!(matches!(sim.detonate(&bomb), Err(SimError::BombNotPlanted)));

        bomb.set_position(Vec3::new(0.0, 0.0, 100.0));
        let report = sim.detonate(&bomb).unwrap();
        assert_eq!(report.damaged, vec![(1, 500)]);
        assert_eq!(report.killed, vec![1]);
        assert!(!sim.is_alive(1).unwrap());
        assert!(sim.is_alive(2).unwrap());
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = SimSettings {
            tick_ms: 0,
            ..SimSettings::default()
        };
        assert!(matches!(
            Simulation::new(World::new(), settings),
            Err(SimError::InvalidSettings(_))
        ));
    }
}
