/*!
Ballistics resolver.

A shot is a ray from the shooter's eye. Surfaces from the world and the nearest
hit-volume of every other live player are merged by distance and walked in order:

- a player takes damage and costs the shot the per-player anti-force
- a wall or box costs the shot its material's anti-force
- floors are passed through

The walk stops, inclusively, at the first hit that leaves no penetration power.
*/

use std::collections::BTreeMap;

use log::{debug, info};
use rapier3d::parry::query::Ray;
use serde::{Deserialize, Serialize};

use crate::damage::DamageProfile;
use crate::geometry::{Point3, SurfaceDescriptor, Vec3};
use crate::player::{BodyPart, Player, PlayerId, hit_volume::nearest_hit};
use crate::settings::SimSettings;
use crate::world::{SurfaceHit, World};

/// One fired bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub shooter: PlayerId,
    pub origin: Vec3,
    pub direction: Vec3,
    pub penetration_power: i32,
    pub damage: DamageProfile,
    pub max_distance: f32,
    pub kill_award: i32,
}

impl Shot {
    /// Shot fired by `player` with its current weapon and look.
    pub fn from_player(player: &Player, settings: &SimSettings) -> Self {
        let weapon = player.loadout().weapon;
        Self {
            shooter: player.id(),
            origin: player.eye_position(settings),
            direction: player.look_direction(),
            penetration_power: weapon.penetration_power,
            damage: weapon.damage,
            max_distance: weapon.max_distance,
            kill_award: weapon.kill_award,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitTarget {
    Player {
        id: PlayerId,
        part: BodyPart,
        damage: i32,
        killed: bool,
    },
    Surface(SurfaceDescriptor),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub distance: f32,
    pub point: Vec3,
    pub target: HitTarget,
    /// Penetration power left after this hit.
    pub remaining_power: i32,
}

impl Hit {
    pub fn player_id(&self) -> Option<PlayerId> {
        match self.target {
            HitTarget::Player { id, .. } => Some(id),
            HitTarget::Surface(_) => None,
        }
    }

    pub fn is_headshot(&self) -> bool {
        matches!(
            self.target,
            HitTarget::Player {
                part: BodyPart::Head,
                ..
            }
        )
    }
}

/// Everything one attack did. An empty hit list is a miss.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackResult {
    pub hits: Vec<Hit>,
    /// Money owed to the shooter for kills.
    pub money_award: i32,
    /// At least one player died.
    pub kill: bool,
}

impl AttackResult {
    pub fn killed(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.hits.iter().filter_map(|h| match h.target {
            HitTarget::Player {
                id, killed: true, ..
            } => Some(id),
            _ => None,
        })
    }
}

/// Candidate struck by the ray, before penetration is applied.
enum Candidate<'w> {
    Surface(SurfaceHit<'w>),
    Player {
        id: PlayerId,
        part: BodyPart,
        distance: f32,
    },
}

impl Candidate<'_> {
    fn distance(&self) -> f32 {
        match self {
            Candidate::Surface(h) => h.distance,
            Candidate::Player { distance, .. } => *distance,
        }
    }
}

/// Fire `shot` through `world` and every live player except the shooter.
///
/// Damage is applied to the players as the ray reaches them. Money is reported in the
/// result, not credited; the caller owns the shooter.
pub fn fire(
    world: &World,
    players: &mut BTreeMap<PlayerId, Player>,
    shot: &Shot,
    settings: &SimSettings,
) -> AttackResult {
    let mut result = AttackResult::default();
    let Some(direction) = shot.direction.try_normalize(f32::EPSILON) else {
        return result;
    };
    let max_distance = shot.max_distance.max(0.0);
    let ray = Ray::new(Point3::from(shot.origin), direction);

    // Snapshot every target before anything is damaged.
    // Surfaces met at the same distance are one hit: the hardest of them.
    let mut surfaces: Vec<SurfaceHit<'_>> = Vec::new();
    for hit in world
        .cast_ray(&shot.origin, &direction, max_distance)
        .filter(|h| h.surface.is_shot_target())
    {
        match surfaces.last_mut() {
            Some(last) if last.distance == hit.distance => {
                if hit.surface.anti_force() > last.surface.anti_force() {
                    *last = hit;
                }
            }
            _ => surfaces.push(hit),
        }
    }
    let mut candidates: Vec<Candidate<'_>> = surfaces.into_iter().map(Candidate::Surface).collect();
    for (id, player) in players.iter() {
        if *id == shot.shooter || !player.is_alive() {
            continue;
        }
        if let Some((part, distance)) = nearest_hit(&player.hit_volumes(settings), &ray, max_distance) {
            candidates.push(Candidate::Player {
                id: *id,
                part,
                distance,
            });
        }
    }
    // Stable: on equal distance surfaces come before players, players by id.
    candidates.sort_by(|a, b| a.distance().total_cmp(&b.distance()));

    let initial = shot.penetration_power;
    let mut power = initial;
    for candidate in candidates {
        let distance = candidate.distance();
        let point = ray.point_at(distance).coords;
        let (target, cost) = match candidate {
            Candidate::Surface(hit) => {
                let descriptor = hit.surface.describe(hit.plane);
                (HitTarget::Surface(descriptor), descriptor.force)
            }
            Candidate::Player { id, part, .. } => {
                let Some(victim) = players.get_mut(&id) else {
                    continue;
                };
                let fraction = if initial > 0 {
                    power.max(0) as f32 / initial as f32
                } else {
                    1.0
                };
                let damage = shot.damage.damage(part, victim.loadout().armor, fraction);
                let killed = victim.lower_health(damage);
                if killed {
                    info!("player {} killed player {} ({:?})", shot.shooter, id, part);
                    result.kill = true;
                    result.money_award = result.money_award.saturating_add(shot.kill_award);
                }
                let target = HitTarget::Player {
                    id,
                    part,
                    damage,
                    killed,
                };
                (target, settings.player_anti_force)
            }
        };

        power = power.saturating_sub(cost);
        debug!("shot from {} hit {:?} at {distance}, power left {power}", shot.shooter, target);
        result.hits.push(Hit {
            distance,
            point,
            target,
            remaining_power: power,
        });
        if power <= 0 {
            break;
        }
    }

    result
}
