//! Projectiles
//!
//! A projectile flies in a straight line toward the point its target stood on
//! at launch; it does not re-track. It either arrives (and hands back its
//! payload exactly once) or runs past its range cap and fizzles.

use bevy::math::Vec2;

use super::constants::ARRIVAL_TOLERANCE;
use super::error::{check_non_negative, check_positive, SimError};
use super::skill::SkillEffect;
use super::unit::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u32);

/// What happens when a projectile arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectilePayload {
    /// Re-apply a skill effect to the captured target
    SkillEffect {
        caster: UnitId,
        /// Caster x at launch, used when the caster is gone by arrival time
        caster_x: f32,
        skill_name: String,
        target: UnitId,
        effect: SkillEffect,
    },
}

/// Result of advancing a projectile by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectileStep {
    InFlight,
    /// Reached its target point; the payload is handed over exactly once
    Arrived(ProjectilePayload),
    /// Ran out of range without arriving
    Expired,
    /// Already finished on an earlier tick
    Inactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub source: UnitId,
    pub origin: Vec2,
    pub position: Vec2,
    pub target_point: Vec2,
    direction: Vec2,
    speed: f32,
    max_range: f32,
    tolerance: f32,
    payload: Option<ProjectilePayload>,
    alive: bool,
}

impl Projectile {
    pub fn new(
        id: ProjectileId,
        source: UnitId,
        origin: Vec2,
        target_point: Vec2,
        speed: f32,
        max_range: f32,
        payload: ProjectilePayload,
    ) -> Result<Self, SimError> {
        check_positive("projectile", "speed", speed)?;
        check_non_negative("projectile", "max_range", max_range)?;
        Ok(Self {
            id,
            source,
            origin,
            position: origin,
            target_point,
            direction: (target_point - origin).normalize_or_zero(),
            speed,
            max_range,
            tolerance: ARRIVAL_TOLERANCE,
            payload: Some(payload),
            alive: true,
        })
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn payload(&self) -> Option<&ProjectilePayload> {
        self.payload.as_ref()
    }

    /// Inside the tolerance box around the target point. Axis-wise, not radial.
    fn has_arrived(&self) -> bool {
        (self.position.x - self.target_point.x).abs() < self.tolerance
            && (self.position.y - self.target_point.y).abs() < self.tolerance
    }

    pub fn step(&mut self) -> ProjectileStep {
        if !self.alive {
            return ProjectileStep::Inactive;
        }
        // Launched at its own position: it can never fly, so it fizzles
        if self.direction == Vec2::ZERO {
            self.alive = false;
            self.payload = None;
            return ProjectileStep::Expired;
        }

        self.position += self.direction * self.speed;

        if self.has_arrived() {
            self.alive = false;
            return match self.payload.take() {
                Some(payload) => ProjectileStep::Arrived(payload),
                None => ProjectileStep::Expired,
            };
        }
        if self.position.distance(self.origin) > self.max_range {
            self.alive = false;
            self.payload = None;
            return ProjectileStep::Expired;
        }
        ProjectileStep::InFlight
    }
}
