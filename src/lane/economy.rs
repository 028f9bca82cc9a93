//! Economy
//!
//! A single regenerating energy pool. Deploying heroes spends it; upgrading
//! spends it too, in exchange for a larger pool and faster regeneration.

use serde::Serialize;

use super::unit_config::EconomyConfig;

/// Read-only view handed to rendering and reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EconomySnapshot {
    pub energy: f32,
    pub max_energy: f32,
    pub regen_rate: f32,
    pub upgrade_clicks: u32,
    /// `None` once no more upgrades are available
    pub next_upgrade_cost: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Economy {
    energy: f32,
    max_energy: f32,
    regen_rate: f32,
    upgrade_clicks: u32,
    config: EconomyConfig,
}

impl Economy {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            energy: config.starting_energy,
            max_energy: config.max_energy,
            regen_rate: config.regen_rate,
            upgrade_clicks: 0,
            config: config.clone(),
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    pub fn regen_rate(&self) -> f32 {
        self.regen_rate
    }

    pub fn upgrade_clicks(&self) -> u32 {
        self.upgrade_clicks
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.energy >= cost
    }

    /// Unconditional. Callers check `can_afford` first.
    pub fn spend(&mut self, amount: f32) {
        self.energy -= amount;
    }

    /// One tick of regeneration, clamped to the pool size.
    pub fn regenerate(&mut self) {
        if self.energy < self.max_energy {
            self.energy = (self.energy + self.regen_rate).min(self.max_energy);
        }
    }

    /// Cost of the next upgrade: base + step per upgrade already bought.
    pub fn upgrade_cost(&self) -> f32 {
        self.config.upgrade_base_cost + self.config.upgrade_cost_step * self.upgrade_clicks as f32
    }

    pub fn can_upgrade(&self) -> bool {
        self.upgrade_clicks < self.config.max_upgrades && self.energy >= self.upgrade_cost()
    }

    /// Buy one upgrade. Returns the energy spent, or `None` if refused.
    pub fn upgrade(&mut self) -> Option<f32> {
        if !self.can_upgrade() {
            return None;
        }
        let cost = self.upgrade_cost();
        self.energy -= cost;
        self.max_energy += self.config.upgrade_max_energy_step;
        self.regen_rate += self.config.upgrade_regen_step;
        self.upgrade_clicks += 1;
        Some(cost)
    }

    pub fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            energy: self.energy,
            max_energy: self.max_energy,
            regen_rate: self.regen_rate,
            upgrade_clicks: self.upgrade_clicks,
            next_upgrade_cost: (self.upgrade_clicks < self.config.max_upgrades)
                .then(|| self.upgrade_cost()),
        }
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(&EconomyConfig::default())
    }
}
