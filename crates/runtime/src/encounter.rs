//! One battle: roster, turn queue and scheduler.
//!
//! The encounter is the only owner of its actors. Turn order is driven by the
//! scheduler; callers pull ready actors with [`Encounter::next_turn`], act on
//! them and re-arm them with [`Encounter::wait_turn`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use battle_core::stats::guard;
use battle_core::{Actor, ActorId, ActorParams, AttackOutcome, Weapon, attack_with};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::TurnEvent;
use crate::scheduler::{TurnQueue, TurnScheduler};

/// Serialisable view of an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub started: bool,
    pub party: Vec<Actor>,
    pub enemies: Vec<Actor>,
    /// Ready actors, earliest first.
    pub queue: Vec<ActorId>,
}

pub struct Encounter {
    config: RuntimeConfig,
    roster: BTreeMap<ActorId, Actor>,
    party: Vec<ActorId>,
    enemies: Vec<ActorId>,
    next_id: u32,
    scheduler: TurnScheduler,
    started: bool,
}

impl Encounter {
    /// Creates an empty encounter with its own queue and scheduler.
    ///
    /// Fails if the configured roster limits are invalid. Must be called
    /// within a tokio runtime.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = TurnScheduler::spawn(Arc::new(TurnQueue::new()), &config);
        Ok(Self {
            config,
            roster: BTreeMap::new(),
            party: Vec::new(),
            enemies: Vec::new(),
            next_id: 0,
            scheduler,
            started: false,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TurnEvent> {
        self.scheduler.subscribe()
    }

    /// Builds a controlled actor, equips `weapon` and adds it to the party.
    ///
    /// The roster is unchanged on any failure: a full party, invalid stats or
    /// a weapon the class cannot wield.
    pub fn add_party_member(&mut self, params: ActorParams, weapon: Weapon) -> Result<ActorId> {
        if !params.class.is_controlled() {
            return Err(RuntimeError::WrongRole {
                class: params.class,
                role: "party member",
            });
        }
        guard::in_range(
            count(&self.party) + 1,
            0,
            self.config.party_size,
            "Active party members",
        )?;

        let id = ActorId(self.next_id);
        let mut actor = Actor::construct(id, params)?;
        if let Err(denied) = actor.equip(weapon) {
            warn!(target: "battle::encounter", actor = %id, %denied, "starting weapon rejected");
            return Err(denied.into());
        }

        info!(target: "battle::encounter", actor = %actor, "party member joined");
        self.party.push(id);
        self.enroll(actor);
        Ok(id)
    }

    /// Builds an autonomous actor and adds it to the enemy side.
    pub fn add_enemy(&mut self, params: ActorParams) -> Result<ActorId> {
        if params.class.is_controlled() {
            return Err(RuntimeError::WrongRole {
                class: params.class,
                role: "enemy",
            });
        }
        guard::in_range(
            count(&self.enemies) + 1,
            0,
            self.config.max_enemies,
            "Active enemies",
        )?;

        let id = ActorId(self.next_id);
        let actor = Actor::construct(id, params)?;

        info!(target: "battle::encounter", actor = %actor, "enemy joined");
        self.enemies.push(id);
        self.enroll(actor);
        Ok(id)
    }

    fn enroll(&mut self, actor: Actor) {
        self.next_id += 1;
        self.roster.insert(actor.id(), actor);
    }

    /// Starts the battle by arming every enemy, then every party member.
    pub fn begin(&mut self) -> Result<()> {
        if self.started {
            return Err(RuntimeError::AlreadyStarted);
        }
        let present = count(&self.party);
        if present < self.config.party_size {
            warn!(
                target: "battle::encounter",
                present,
                required = self.config.party_size,
                "cannot begin with an incomplete party"
            );
            return Err(RuntimeError::PartyIncomplete {
                required: self.config.party_size,
                present,
            });
        }

        for id in self.enemies.iter().chain(&self.party) {
            if let Some(actor) = self.roster.get(id) {
                self.scheduler.wait_turn(actor)?;
            }
        }
        self.started = true;

        info!(
            target: "battle::encounter",
            party = self.party.len(),
            enemies = self.enemies.len(),
            "encounter started"
        );
        Ok(())
    }

    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Waits for the next living actor whose turn has come.
    ///
    /// Suspends indefinitely if no actor is armed.
    pub async fn next_turn(&self) -> Result<ActorId> {
        if !self.started {
            return Err(RuntimeError::NotStarted);
        }
        loop {
            let id = self.scheduler.dequeue_next_ready().await;
            match self.roster.get(&id) {
                Some(actor) if !actor.is_defeated() => return Ok(id),
                _ => debug!(target: "battle::encounter", actor = %id, "skipping stale turn"),
            }
        }
    }

    /// Re-arms an actor after it acted.
    pub fn wait_turn(&self, id: ActorId) -> Result<Duration> {
        let actor = self.living(id)?;
        Ok(self.scheduler.wait_turn(actor)?)
    }

    /// Resolves `attacker` hitting `target`. Both must be alive. A target
    /// brought to 0 HP is withdrawn from the turn order.
    pub fn attack(&mut self, attacker: ActorId, target: ActorId) -> Result<AttackOutcome> {
        let attacker = self.living(attacker)?.clone();
        self.living(target)?;
        let victim = self
            .roster
            .get_mut(&target)
            .ok_or(RuntimeError::UnknownActor(target))?;

        let outcome = attack_with(&attacker, victim, &self.config.combat)?;
        info!(
            target: "battle::combat",
            attacker = %outcome.attacker,
            defender = %outcome.target,
            damage = outcome.damage,
            taken = outcome.taken,
            hp = outcome.hp_after,
            "attack resolved"
        );

        if outcome.defeated {
            self.withdraw(target);
            info!(target: "battle::combat", actor = %target, "actor defeated");
        }
        Ok(outcome)
    }

    /// Swaps the actor's weapon, returning the previous one. A denied weapon
    /// leaves the actor unchanged. The pending turn timer is not re-armed.
    pub fn change_weapon(&mut self, id: ActorId, weapon: Weapon) -> Result<Option<Weapon>> {
        let actor = self
            .roster
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownActor(id))?;

        match actor.equip(weapon) {
            Ok(previous) => {
                debug!(target: "battle::encounter", actor = %id, "weapon changed");
                Ok(previous)
            }
            Err(denied) => {
                warn!(target: "battle::encounter", actor = %id, %denied, "weapon change rejected");
                Err(denied.into())
            }
        }
    }

    /// Takes an actor out of the turn order: cancels its timer and drops its
    /// queue entries. Returns false if there was nothing to withdraw.
    pub fn withdraw(&self, id: ActorId) -> bool {
        let mut withdrawn = self.scheduler.cancel(id);
        while self.scheduler.remove_from_queue(id) {
            withdrawn = true;
        }
        withdrawn
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.get(&id)
    }

    pub fn party(&self) -> impl Iterator<Item = &Actor> {
        self.side(&self.party)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Actor> {
        self.side(&self.enemies)
    }

    /// True once every enemy, or every party member, is defeated.
    pub fn is_over(&self) -> bool {
        let wiped = |ids: &[ActorId]| {
            !ids.is_empty()
                && ids
                    .iter()
                    .all(|id| self.roster.get(id).is_none_or(Actor::is_defeated))
        };
        wiped(&self.party[..]) || wiped(&self.enemies[..])
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            started: self.started,
            party: self.party().cloned().collect(),
            enemies: self.enemies().cloned().collect(),
            queue: self.scheduler.queue().snapshot(),
        }
    }

    /// Stops the scheduler. Queued turns are discarded with the encounter.
    pub async fn shutdown(mut self) -> Result<()> {
        info!(target: "battle::encounter", "encounter shutting down");
        self.scheduler.shutdown().await
    }

    fn side<'a>(&'a self, ids: &'a [ActorId]) -> impl Iterator<Item = &'a Actor> + 'a {
        ids.iter().filter_map(|id| self.roster.get(id))
    }

    fn living(&self, id: ActorId) -> Result<&Actor> {
        let actor = self.roster.get(&id).ok_or(RuntimeError::UnknownActor(id))?;
        if actor.is_defeated() {
            return Err(RuntimeError::Defeated(id));
        }
        Ok(actor)
    }
}

fn count(ids: &[ActorId]) -> i32 {
    i32::try_from(ids.len()).unwrap_or(i32::MAX)
}
