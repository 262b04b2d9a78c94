//! Minimal host harness
//!
//! Stands in for the scene engine the simulation runs inside: it owns the
//! objects, keeps one [`BallRecord`] per object between ticks, and copies the
//! simulated height back into each object's vertical coordinate. The z axis
//! is up; x and y are never touched by the simulation.

use std::collections::BTreeMap;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::{BallParams, Phase, PhaseStep, SimulationState, advance_traced};

/// A ball-shaped object in the host scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: u32,
    /// Centre of the ball (z = height above ground)
    pub position: DVec3,
}

/// Everything the host persists for one object between ticks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallRecord {
    pub state: SimulationState,
    pub phase: Phase,
    /// Simulated seconds since the record was created
    pub elapsed: f64,
}

impl BallRecord {
    /// Record for an object seen for the first time at height `z`
    pub fn first_encounter(z: f64) -> Self {
        Self {
            state: SimulationState::at_height(z),
            phase: Phase::Freefall,
            elapsed: 0.0,
        }
    }

    /// Check a record from outside the simulation before it is ticked
    ///
    /// Rejects anything the phase functions could not have produced
    /// themselves.
    pub fn validate(&self, id: u32, params: &BallParams) -> Result<()> {
        let s = &self.state;
        let finite = [
            s.vertical_speed,
            s.height,
            s.stored_energy,
            s.remaining_time,
            self.elapsed,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidSetting {
                field: "record",
                reason: "values must be finite",
            });
        }
        if s.stored_energy < 0.0 {
            return Err(Error::InvalidSetting {
                field: "record.stored_energy",
                reason: "must not be negative",
            });
        }

        let below_ground = Error::BelowGround {
            id,
            height: s.height,
            radius: params.radius,
        };
        if s.height < params.radius - params.rest_height_epsilon {
            return Err(below_ground);
        }
        // A falling ball below contact height must still be able to reach it
        let depth = params.radius - s.height;
        if self.phase == Phase::Freefall
            && depth > 0.0
            && !s.is_resting(params)
            && s.vertical_speed * s.vertical_speed + 2.0 * params.gravity * depth < 0.0
        {
            return Err(below_ground);
        }

        if self.phase.in_contact() && s.clearance(params) > params.rest_height_epsilon {
            return Err(Error::InvalidSetting {
                field: "record.height",
                reason: "squeeze and stretch sit at the contact height",
            });
        }
        if self.phase == Phase::Squeeze && s.vertical_speed > params.rest_speed_epsilon {
            return Err(Error::InvalidSetting {
                field: "record.vertical_speed",
                reason: "squeeze needs a downward speed",
            });
        }
        Ok(())
    }
}

/// Serializable copy of a whole scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub params: BallParams,
    pub objects: Vec<SceneObject>,
    pub records: BTreeMap<u32, BallRecord>,
    pub time_ticks: u64,
    pub next_id: u32,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Objects plus their per-object simulation records
#[derive(Debug, Clone)]
pub struct Scene {
    params: BallParams,
    /// Sorted by id for deterministic iteration
    objects: Vec<SceneObject>,
    records: BTreeMap<u32, BallRecord>,
    /// Ticks run so far
    time_ticks: u64,
    next_id: u32,
}

impl Scene {
    /// Empty scene; `params` must pass [`BallParams::validate`]
    pub fn new(params: BallParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            objects: Vec::new(),
            records: BTreeMap::new(),
            time_ticks: 0,
            next_id: 1,
        })
    }

    pub fn params(&self) -> &BallParams {
        &self.params
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Simulated seconds since the scene was created
    pub fn time(&self) -> f64 {
        self.time_ticks as f64 * self.params.tick_length
    }

    pub fn object(&self, id: u32) -> Option<&SceneObject> {
        self.objects
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.objects[i])
    }

    /// Simulation record, present once the object has been ticked
    pub fn record(&self, id: u32) -> Option<&BallRecord> {
        self.records.get(&id)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_above_ground(&self, id: u32, position: DVec3) -> Result<()> {
        if !(position.z >= self.params.radius) {
            return Err(Error::BelowGround {
                id,
                height: position.z,
                radius: self.params.radius,
            });
        }
        check_finite(position)
    }

    /// Add a ball at `position`; its record is created on the next tick
    pub fn spawn(&mut self, position: DVec3) -> Result<u32> {
        self.check_above_ground(self.next_id, position)?;
        let id = self.next_entity_id();
        self.objects.push(SceneObject { id, position });
        log::debug!("Spawned ball {} at {:?}", id, position);
        Ok(id)
    }

    /// Spawn `count` balls at seeded random positions
    ///
    /// x and y fall within `±spread`, the centre height within
    /// `[min_height, max_height]`.
    pub fn scatter(
        &mut self,
        count: u32,
        seed: u64,
        spread: f64,
        min_height: f64,
        max_height: f64,
    ) -> Result<Vec<u32>> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let position = DVec3::new(
                rng.random_range(-spread..=spread),
                rng.random_range(-spread..=spread),
                rng.random_range(min_height..=max_height),
            );
            ids.push(self.spawn(position)?);
        }
        log::info!("Scattered {} balls (seed {})", count, seed);
        Ok(ids)
    }

    /// Teleport an object; its simulation restarts from rest at the new height
    pub fn move_object(&mut self, id: u32, position: DVec3) -> Result<()> {
        self.check_above_ground(id, position)?;
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(Error::UnknownObject(id))?;
        object.position = position;
        self.records.remove(&id);
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<SceneObject> {
        let index = self
            .objects
            .binary_search_by_key(&id, |o| o.id)
            .map_err(|_| Error::UnknownObject(id))?;
        self.records.remove(&id);
        Ok(self.objects.remove(index))
    }

    /// Advance every ball by one tick
    pub fn tick(&mut self) {
        self.tick_with(|_, _| {});
    }

    /// Advance every ball by one tick, reporting each phase step with its
    /// object id
    pub fn tick_with<F: FnMut(u32, &PhaseStep)>(&mut self, mut observe: F) {
        let params = self.params;

        for object in &mut self.objects {
            let id = object.id;
            let z = object.position.z;
            let record = self.records.entry(id).or_insert_with(|| {
                log::debug!("Ball {} enters the simulation at height {:.3}", id, z);
                BallRecord::first_encounter(z)
            });

            let was_resting = record.state.is_resting(&params);
            record.phase = advance_traced(
                &mut record.state,
                record.phase,
                &params,
                &mut |step: &PhaseStep| observe(id, step),
            );
            record.elapsed += params.tick_length;
            object.position.z = record.state.height;

            if !was_resting && record.state.is_resting(&params) {
                log::info!("Ball {} came to rest after {:.1}s", id, record.elapsed);
            }
        }

        self.time_ticks += 1;
    }

    /// Every object has been simulated and is lying still on the ground
    pub fn all_resting(&self) -> bool {
        self.objects.iter().all(|o| {
            self.records
                .get(&o.id)
                .is_some_and(|r| r.phase == Phase::Freefall && r.state.is_resting(&self.params))
        })
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            params: self.params,
            objects: self.objects.clone(),
            records: self.records.clone(),
            time_ticks: self.time_ticks,
            next_id: self.next_id,
        }
    }

    /// Rebuild a scene from a snapshot, re-validating its parameters
    pub fn restore(snapshot: SceneSnapshot) -> Result<Self> {
        let mut scene = Self::new(snapshot.params)?;
        for object in &snapshot.objects {
            // Objects already simulated are checked through their record,
            // which may sit a rounding error below the contact height
            match snapshot.records.get(&object.id) {
                Some(record) => {
                    check_finite(object.position)?;
                    record.validate(object.id, &scene.params)?;
                }
                None => scene.check_above_ground(object.id, object.position)?,
            }
        }
        scene.objects = snapshot.objects;
        scene.objects.sort_by_key(|o| o.id);
        scene.records = snapshot.records;
        // Drop records whose object no longer exists
        let ids: Vec<u32> = scene.objects.iter().map(|o| o.id).collect();
        scene.records.retain(|id, _| ids.binary_search(id).is_ok());
        scene.time_ticks = snapshot.time_ticks;
        let max_id = scene.objects.last().map_or(0, |o| o.id);
        scene.next_id = snapshot.next_id.max(max_id + 1);
        Ok(scene)
    }
}

fn check_finite(position: DVec3) -> Result<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidSetting {
            field: "position",
            reason: "must be finite",
        })
    }
}
