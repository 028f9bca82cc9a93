//! Attack Resolver
//!
//! Cooldown-gated direct damage. An `Attack` does not remember its target:
//! the same attack can be pointed at a different unit (or at the enemy
//! stronghold's proxy) every tick.

use super::constants::MIN_ATTACK_COOLDOWN;
use super::cooldown::CooldownGate;
use super::error::{check_non_negative, SimError};
use super::Timestamp;

/// What a single hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Health actually removed (never more than the target had left)
    pub dealt: f32,
    /// True when this hit brought the target to zero health
    pub killed: bool,
}

impl DamageOutcome {
    pub const NONE: DamageOutcome = DamageOutcome {
        dealt: 0.0,
        killed: false,
    };
}

/// Anything that can be hit.
///
/// Plain units lose health and enter their death pipeline; the stronghold
/// proxy routes the loss into its structure. Hitting something that is
/// already down returns `DamageOutcome::NONE`.
pub trait Damageable {
    fn receive_damage(&mut self, amount: f32, now: Timestamp) -> DamageOutcome;
}

/// An active attack-speed buff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuffState {
    /// Cooldown to restore when the buff runs out
    pub original_cooldown: f32,
    /// Time at which the buff is reverted
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attack {
    /// Damage dealt per hit
    pub damage: f32,
    gate: CooldownGate,
    buff: Option<BuffState>,
}

impl Attack {
    pub fn new(damage: f32, cooldown: f32) -> Result<Self, SimError> {
        check_non_negative("attack", "damage", damage)?;
        check_non_negative("attack", "cooldown", cooldown)?;
        Ok(Self {
            damage,
            gate: CooldownGate::new(cooldown),
            buff: None,
        })
    }

    /// Current cooldown (buffed value while a buff is active).
    pub fn cooldown(&self) -> f32 {
        self.gate.duration
    }

    pub fn last_fired(&self) -> Option<Timestamp> {
        self.gate.last_time()
    }

    pub fn can_attack(&self, now: Timestamp) -> bool {
        self.gate.is_ready(now)
    }

    /// Hit `target` if the cooldown allows it.
    ///
    /// Returns `None` (and changes nothing) while on cooldown. Otherwise the
    /// damage is applied through the target's `Damageable` capability and
    /// the cooldown restarts at `now`.
    pub fn attack_target<T: Damageable + ?Sized>(
        &mut self,
        now: Timestamp,
        target: &mut T,
    ) -> Option<DamageOutcome> {
        if !self.gate.is_ready(now) {
            return None;
        }
        let outcome = target.receive_damage(self.damage, now);
        self.gate.trigger(now);
        Some(outcome)
    }

    pub fn buff(&self) -> Option<&BuffState> {
        self.buff.as_ref()
    }

    /// Shorten the cooldown by `amount` until `expires_at`.
    ///
    /// The reduction is always computed from the pre-buff cooldown, so
    /// re-buffing refreshes the expiry without compounding. Returns true
    /// when the unit was not buffed before.
    pub fn apply_speed_buff(&mut self, amount: f32, expires_at: Timestamp) -> bool {
        let fresh = self.buff.is_none();
        let original = self
            .buff
            .map(|buff| buff.original_cooldown)
            .unwrap_or(self.gate.duration);

        // The floor only limits the reduction, it never slows a fast attacker down
        self.gate.duration = (original - amount).max(MIN_ATTACK_COOLDOWN).min(original);
        self.buff = Some(BuffState {
            original_cooldown: original,
            expires_at,
        });
        fresh
    }

    /// Restore the original cooldown once the buff has run out.
    ///
    /// Returns the restored cooldown when a buff expired this call.
    pub fn expire_buff(&mut self, now: Timestamp) -> Option<f32> {
        match self.buff {
            Some(buff) if now >= buff.expires_at => {
                self.gate.duration = buff.original_cooldown;
                self.buff = None;
                Some(buff.original_cooldown)
            }
            _ => None,
        }
    }
}
