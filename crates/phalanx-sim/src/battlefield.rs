//! The host loop.
//!
//! One [`Battlefield::tick`]:
//! 1. refresh the soldier and army registries on the blackboard
//! 2. move formation anchors toward their army waypoints
//! 3. for each soldier in id order: reset steering, run its tree, integrate, update its weapon
//! 4. resolve sword hits, then arrows
//! 5. count down and remove the dead
//!
//! Soldiers are integrated one at a time, so sensor leaves see this tick's position for soldiers
//! earlier in id order and last tick's for the rest.

use std::collections::BTreeMap;
use std::sync::Arc;

use phalanx_bt::{TreeLoader, TreeSource, ARMIES, SOLDIERS, TARGET, WAYPOINT};
use phalanx_core::{ArmyId, Blackboard, FormationId, SoldierId, TickContext, Vec2};
use phalanx_formation::{Formation, FormationLoader, FormationTemplate};
use phalanx_steer::Movable;

use crate::archetype::Archetype;
use crate::army::Army;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::roster::Roster;
use crate::scenario::Scenario;
use crate::soldier::Soldier;
use crate::weapon::segment_distance;

/// State of the battle as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Two or more armies still have living soldiers.
    Ongoing,
    Victory(ArmyId),
    /// Nobody is left standing.
    Draw,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub dt_seconds: f32,
    pub hits: usize,
    pub deaths: Vec<SoldierId>,
    pub removed: Vec<SoldierId>,
}

pub struct Battlefield {
    config: SimConfig,
    trees: TreeLoader,
    templates: FormationLoader,
    archetypes: BTreeMap<String, Arc<Archetype>>,
    armies: BTreeMap<ArmyId, Army>,
    roster: Roster,
    blackboard: Blackboard,
    tick: u64,
    elapsed: f32,
    next_army: u32,
    next_formation: u32,
    next_soldier: u64,
}

impl Battlefield {
    /// A battlefield reading trees and formations from the configured directories.
    pub fn new(config: SimConfig) -> Self {
        let trees = TreeLoader::new(TreeSource::dir(&config.trees_dir));
        Self::with_trees(config, trees)
    }

    /// A battlefield with a caller-provided tree loader (e.g. in-memory definitions).
    pub fn with_trees(config: SimConfig, trees: TreeLoader) -> Self {
        let templates = FormationLoader::new(&config.formations_dir);
        let archetypes = config
            .archetypes
            .iter()
            .map(|(name, archetype)| (name.clone(), Arc::new(archetype.clone())))
            .collect();
        Self {
            config,
            trees,
            templates,
            archetypes,
            armies: BTreeMap::new(),
            roster: Roster::default(),
            blackboard: Blackboard::new(),
            tick: 0,
            elapsed: 0.0,
            next_army: 1,
            next_formation: 1,
            next_soldier: 1,
        }
    }

    pub fn from_scenario(config: SimConfig, scenario: &Scenario) -> Result<Self, SimError> {
        let mut field = Self::new(config);
        field.populate(scenario)?;
        Ok(field)
    }

    /// Spawn everything `scenario` describes.
    pub fn populate(&mut self, scenario: &Scenario) -> Result<(), SimError> {
        for spec in &scenario.armies {
            let army = self.spawn_army(&spec.name, spec.color, spec.waypoint);

            for formation_spec in &spec.formations {
                let formation =
                    self.spawn_formation(army, &formation_spec.template, formation_spec.position)?;
                let offset = formation_spec
                    .army_offset
                    .unwrap_or(formation_spec.position - spec.waypoint);
                if let Some(f) = self.roster.formations.get_mut(&formation) {
                    f.set_army_offset(offset);
                }

                for squad in &formation_spec.soldiers {
                    for _ in 0..squad.count {
                        let position = squad.position.unwrap_or(formation_spec.position);
                        let soldier = self.spawn_soldier(army, &squad.archetype, position, 0.0)?;
                        if !self.assign(soldier, formation, true)? {
                            tracing::warn!(
                                soldier = %soldier,
                                formation = %formation,
                                template = %formation_spec.template,
                                "formation full, soldier left unassigned"
                            );
                        }
                    }
                }
            }

            for squad in &spec.soldiers {
                for _ in 0..squad.count {
                    let position = squad.position.unwrap_or(spec.waypoint);
                    self.spawn_soldier(army, &squad.archetype, position, 0.0)?;
                }
            }

            if let Some(target) = spec.march_to {
                self.set_waypoint(army, target)?;
            }
        }

        tracing::info!(
            scenario = %scenario.name,
            armies = self.armies.len(),
            formations = self.roster.formations.len(),
            soldiers = self.roster.soldiers.len(),
            "scenario loaded"
        );
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// Mutable blackboard access, e.g. to install a `TRACE_LOG`.
    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn army(&self, id: ArmyId) -> Option<&Army> {
        self.armies.get(&id)
    }

    pub fn armies(&self) -> impl Iterator<Item = &Army> + '_ {
        self.armies.values()
    }

    pub fn soldier(&self, id: SoldierId) -> Option<&Soldier> {
        self.roster.soldier(id)
    }

    pub fn formation(&self, id: FormationId) -> Option<&Formation> {
        self.roster.formation(id)
    }

    pub fn alive_count(&self, army: ArmyId) -> usize {
        self.roster
            .soldiers()
            .filter(|s| s.army() == army && s.is_alive())
            .count()
    }

    pub fn spawn_army(&mut self, name: &str, color: [u8; 3], waypoint: Vec2) -> ArmyId {
        let id = ArmyId(self.next_army);
        self.next_army += 1;
        self.armies.insert(id, Army::new(id, name, color, waypoint));
        tracing::debug!(army = %id, name, "army created");
        id
    }

    pub fn set_waypoint(&mut self, army: ArmyId, waypoint: Vec2) -> Result<(), SimError> {
        let army = self
            .armies
            .get_mut(&army)
            .ok_or(SimError::UnknownArmy(army))?;
        army.set_waypoint(waypoint);
        Ok(())
    }

    /// Create a formation from the named template with its anchor at `position`.
    pub fn spawn_formation(
        &mut self,
        army: ArmyId,
        template: &str,
        position: Vec2,
    ) -> Result<FormationId, SimError> {
        let template = self.templates.load(template)?;
        self.spawn_formation_from(army, &template, position)
    }

    pub fn spawn_formation_from(
        &mut self,
        army: ArmyId,
        template: &FormationTemplate,
        position: Vec2,
    ) -> Result<FormationId, SimError> {
        let owner = self
            .armies
            .get_mut(&army)
            .ok_or(SimError::UnknownArmy(army))?;
        let id = FormationId(self.next_formation);
        self.next_formation += 1;

        let anchor = Movable::new(self.config.formation_limits).at(position, 0.0);
        let formation = Formation::from_template(id, army, template)
            .with_anchor(anchor)
            .with_army_offset(position - owner.waypoint);
        owner.formations.push(id);
        self.roster.formations.insert(id, formation);
        tracing::debug!(formation = %id, army = %army, template = template.name(), "formation created");
        Ok(id)
    }

    /// Remove a formation, leaving its members unassigned. Returns the released soldiers.
    pub fn remove_formation(&mut self, id: FormationId) -> Result<Vec<SoldierId>, SimError> {
        let mut formation = self
            .roster
            .formations
            .remove(&id)
            .ok_or(SimError::UnknownFormation(id))?;
        let released = formation.release_all();
        for soldier in &released {
            if let Some(s) = self.roster.soldiers.get_mut(soldier) {
                s.leave_formation();
            }
        }
        if let Some(army) = self.armies.get_mut(&formation.army()) {
            army.formations.retain(|f| *f != id);
        }
        tracing::debug!(formation = %id, released = released.len(), "formation removed");
        Ok(released)
    }

    pub fn spawn_soldier(
        &mut self,
        army: ArmyId,
        archetype: &str,
        position: Vec2,
        facing: f32,
    ) -> Result<SoldierId, SimError> {
        if !self.armies.contains_key(&army) {
            return Err(SimError::UnknownArmy(army));
        }
        let archetype = self
            .archetypes
            .get(archetype)
            .cloned()
            .ok_or_else(|| SimError::UnknownArchetype(archetype.to_string()))?;
        let tree = self.trees.load(&archetype.tree)?;

        let id = SoldierId(self.next_soldier);
        self.next_soldier += 1;
        let mut soldier = Soldier::new(id, army, archetype, tree, self.config.cleanup_seconds);
        soldier.body.set_position(position, Some(facing));
        self.roster.soldiers.insert(id, soldier);
        Ok(id)
    }

    /// Put `soldier` into `formation`, leaving any formation it was in.
    ///
    /// Returns `false` and changes nothing when the soldier is dead or the formation has no room.
    pub fn assign(
        &mut self,
        soldier: SoldierId,
        formation: FormationId,
        snap: bool,
    ) -> Result<bool, SimError> {
        let current = {
            let s = self
                .roster
                .soldiers
                .get(&soldier)
                .ok_or(SimError::UnknownSoldier(soldier))?;
            if !s.is_alive() {
                return Ok(false);
            }
            s.formation()
        };
        let target = self
            .roster
            .formations
            .get(&formation)
            .ok_or(SimError::UnknownFormation(formation))?;
        if current == Some(formation) || target.is_full() {
            return Ok(false);
        }

        self.roster.leave_formation(soldier);
        let (Some(s), Some(f)) = (
            self.roster.soldiers.get_mut(&soldier),
            self.roster.formations.get_mut(&formation),
        ) else {
            return Ok(false);
        };
        Ok(f.add(s, snap))
    }

    /// Deal damage outside of combat (scripted events, tests). Returns `true` on a killing blow.
    pub fn damage(&mut self, soldier: SoldierId, amount: f32) -> Result<bool, SimError> {
        if !self.roster.soldiers.contains_key(&soldier) {
            return Err(SimError::UnknownSoldier(soldier));
        }
        Ok(self.roster.damage(soldier, amount))
    }

    pub fn outcome(&self) -> Outcome {
        let mut standing = self
            .roster
            .soldiers()
            .filter(|s| s.is_alive())
            .map(Soldier::army);
        let Some(first) = standing.next() else {
            return Outcome::Draw;
        };
        if standing.all(|army| army == first) {
            Outcome::Victory(first)
        } else {
            Outcome::Ongoing
        }
    }

    pub fn tick(&mut self, dt_seconds: f32) -> TickReport {
        let ctx = TickContext::clamped(self.tick, dt_seconds, self.config.max_frame_seconds);
        let dt = ctx.dt_seconds;
        let mut report = TickReport {
            tick: ctx.tick,
            dt_seconds: dt,
            ..TickReport::default()
        };

        self.refresh_registries();

        for formation in self.roster.formations.values_mut() {
            if let Some(army) = self.armies.get(&formation.army()) {
                formation.follow(army.waypoint, dt);
            }
        }

        let ids: Vec<SoldierId> = self.roster.soldiers.keys().copied().collect();
        for id in &ids {
            self.step_soldier(&ctx, *id);
        }

        let alive_before: Vec<SoldierId> = ids
            .iter()
            .copied()
            .filter(|id| self.roster.soldier(*id).is_some_and(Soldier::is_alive))
            .collect();
        report.hits += self.resolve_melee(&ids);
        report.hits += self.resolve_arrows(dt);
        report.deaths = alive_before
            .into_iter()
            .filter(|id| !self.roster.soldier(*id).is_some_and(Soldier::is_alive))
            .collect();
        for id in &report.deaths {
            self.blackboard.remove_for(TARGET, id);
            self.blackboard.remove_for(WAYPOINT, id);
        }

        report.removed = self.remove_dead();

        self.tick += 1;
        self.elapsed += dt;
        tracing::trace!(
            tick = report.tick,
            hits = report.hits,
            deaths = report.deaths.len(),
            "tick complete"
        );
        report
    }

    fn refresh_registries(&mut self) {
        let soldiers = self
            .roster
            .soldiers()
            .filter(|s| s.is_alive())
            .map(|s| (s.id(), s.army()))
            .collect();
        self.blackboard.replace(SOLDIERS, soldiers);
        let armies = self
            .armies
            .values()
            .map(|army| (army.id, army.waypoint))
            .collect();
        self.blackboard.replace(ARMIES, armies);
    }

    fn step_soldier(&mut self, ctx: &TickContext, id: SoldierId) {
        let dt = ctx.dt_seconds;
        let healing = self.config.healing_per_second * dt;
        let tree = {
            let Some(soldier) = self.roster.soldiers.get_mut(&id) else {
                return;
            };
            if !soldier.is_alive() {
                soldier.decay(dt);
                return;
            }
            soldier.heal(healing);
            soldier.body.reset_steering();
            Arc::clone(soldier.tree())
        };

        tree.run(ctx, id, &mut self.roster, &mut self.blackboard);

        if let Some(soldier) = self.roster.soldiers.get_mut(&id) {
            soldier.body.apply(dt);
            soldier.update_weapon(dt);
        }
    }

    /// Each swinging sword hits at most one enemy per swing: the lowest id it touches.
    fn resolve_melee(&mut self, ids: &[SoldierId]) -> usize {
        let mut hits = 0;
        for attacker in ids {
            let Some(a) = self.roster.soldier(*attacker) else {
                continue;
            };
            if !a.is_alive() {
                continue;
            }
            let victim = self
                .roster
                .soldiers()
                .filter(|v| v.is_alive() && v.army() != a.army())
                .find(|v| a.strikes(v))
                .map(|v| (v.id(), a.weapon().damage()));
            let Some((victim, damage)) = victim else {
                continue;
            };
            if let Some(a) = self.roster.soldiers.get_mut(attacker) {
                a.end_swing();
            }
            tracing::debug!(attacker = %attacker, victim = %victim, damage, "sword hit");
            self.roster.damage(victim, damage);
            hits += 1;
        }
        hits
    }

    /// Arrows hit the first living enemy along this tick's flight path.
    fn resolve_arrows(&mut self, dt: f32) -> usize {
        let mut hits = 0;
        let arrows = std::mem::take(&mut self.roster.arrows);
        let mut flying = Vec::with_capacity(arrows.len());

        for mut arrow in arrows {
            let (start, end) = arrow.advance(dt);
            let victim = self
                .roster
                .soldiers()
                .filter(|s| s.is_alive() && s.army() != arrow.army)
                .filter(|s| segment_distance(s.body.position, start, end) <= s.archetype().radius)
                .map(|s| (s.id(), start.distance(s.body.position)))
                .fold(None, |best: Option<(SoldierId, f32)>, (id, d)| match best {
                    Some((_, bd)) if bd <= d => best,
                    _ => Some((id, d)),
                });

            match victim {
                Some((victim, _)) => {
                    tracing::debug!(archer = %arrow.owner, victim = %victim, damage = arrow.damage, "arrow hit");
                    self.roster.damage(victim, arrow.damage);
                    hits += 1;
                }
                None if arrow.is_spent() => {}
                None => flying.push(arrow),
            }
        }

        self.roster.arrows = flying;
        hits
    }

    fn remove_dead(&mut self) -> Vec<SoldierId> {
        let removed: Vec<SoldierId> = self
            .roster
            .soldiers()
            .filter(|s| s.needs_removal())
            .map(Soldier::id)
            .collect();
        for id in &removed {
            self.roster.leave_formation(*id);
            self.roster.soldiers.remove(id);
            self.blackboard.remove_for(TARGET, id);
            self.blackboard.remove_for(WAYPOINT, id);
            tracing::debug!(soldier = %id, "removed dead soldier");
        }
        removed
    }
}
