//! Rescales the attack interval of weapons carried by spawned instances.

use game_core::{Character, EntityInstance, ItemData};
use tracing::debug;

use super::{HookContext, InstanceHook};
use crate::error::HookError;

/// Scales every equipable weapon's attack interval by `1 / Aggression`.
///
/// Items are per-instance copies made at spawn, so each instance is scaled
/// exactly once from the template's unmodified value. An item with a
/// malformed interval is left as is and reported after the others are
/// scaled.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeaponIntervalHook;

impl InstanceHook for WeaponIntervalHook {
    fn name(&self) -> &'static str {
        "weapon_interval"
    }

    fn on_instance_start(
        &self,
        ctx: &HookContext<'_>,
        instance: &mut EntityInstance,
    ) -> Result<(), HookError> {
        let template = instance.template_name().to_string();
        let Some(aggression) = ctx.bindings.aggression_for(&template) else {
            return Ok(());
        };
        if instance.ai.is_none() {
            return Ok(());
        }
        let Some(humanoid) = instance
            .character
            .as_mut()
            .and_then(Character::as_humanoid_mut)
        else {
            return Ok(());
        };

        let multiplier = aggression.value();
        let mut rescaled = 0usize;
        let mut malformed = None;
        for item in humanoid.inventory_mut().all_items_mut() {
            if !(item.is_weapon() && item.is_equipable()) {
                continue;
            }
            match rescale(item, multiplier) {
                Ok(()) => rescaled += 1,
                Err(e) => {
                    debug!(
                        target: "runtime::hooks",
                        hook = self.name(),
                        instance = %instance.name,
                        error = %e,
                        "Skipping item"
                    );
                    if malformed.is_none() {
                        malformed = Some(e);
                    }
                }
            }
        }

        debug!(
            target: "runtime::hooks",
            hook = self.name(),
            %template,
            multiplier,
            rescaled,
            "Rescaled weapon intervals"
        );
        // The remaining items are already scaled; report the first bad one.
        malformed.map_or(Ok(()), Err)
    }
}

fn rescale(item: &mut ItemData, multiplier: f32) -> Result<(), HookError> {
    let interval = item.shared.ai_attack_interval;
    if !interval.is_finite() || interval < 0.0 {
        return Err(HookError::MalformedItem {
            item: item.name.clone(),
            interval,
        });
    }
    item.shared.ai_attack_interval = interval * (1.0 / multiplier);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ItemType;

    #[test]
    fn rescale_divides_by_the_multiplier() {
        let mut item = ItemData::new("SpearFlint", ItemType::TwoHandedWeapon, 1.5);
        rescale(&mut item, 2.0).unwrap();
        assert_eq!(item.shared.ai_attack_interval, 0.75);
    }

    #[test]
    fn rescale_rejects_non_finite_intervals() {
        let mut item = ItemData::new("Broken", ItemType::OneHandedWeapon, f32::INFINITY);
        assert!(matches!(
            rescale(&mut item, 2.0),
            Err(HookError::MalformedItem { .. })
        ));
        assert_eq!(item.shared.ai_attack_interval, f32::INFINITY);
    }
}
