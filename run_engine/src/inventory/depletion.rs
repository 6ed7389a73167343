//! Depletion policy - which instance a unit of consumption lands on.
//!
//! Finite instances come first, the one closest to running out before the
//! others, so nearly spent copies are used up before fresh ones. Equal counts
//! fall back to the earliest issued instance. Infinite instances are only
//! picked when no finite instance with uses remaining exists. Broken
//! instances (finite, zero uses) are never picked.

use std::cmp::Ordering;

use story_rules::{ItemId, Uses};

use super::{InstanceId, ItemInstance};

/// Total order over depletion candidates; the minimum is depleted first.
pub fn depletion_order(a: &ItemInstance, b: &ItemInstance) -> Ordering {
    let rank = |uses: Uses| match uses {
        Uses::Finite(left) => (0u8, left),
        Uses::Infinite => (1u8, 0),
    };
    rank(a.uses_left)
        .cmp(&rank(b.uses_left))
        .then_with(|| a.instance_id.cmp(&b.instance_id))
}

/// Check if an instance can absorb a unit of consumption.
pub fn is_candidate(instance: &ItemInstance, item_id: &ItemId) -> bool {
    &instance.item_id == item_id && !instance.is_broken()
}

/// Pick the instance of `item_id` that the next unit of consumption hits.
pub fn select_for_depletion<'a, I>(instances: I, item_id: &ItemId) -> Option<InstanceId>
where
    I: IntoIterator<Item = &'a ItemInstance>,
{
    instances
        .into_iter()
        .filter(|inst| is_candidate(inst, item_id))
        .min_by(|a, b| depletion_order(a, b))
        .map(|inst| inst.instance_id)
}
