//! Inventory manager - the live collection of item instances.
//!
//! `give` issues fresh instances from the registry's rules, `consume` spends
//! uses one unit at a time according to the [depletion policy](depletion).
//! Neither operation fails: an unknown item id skips the line and a short
//! supply consumes what is there.

pub mod depletion;
mod instance;

pub use depletion::{depletion_order, select_for_depletion};
pub use instance::*;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use story_rules::{ItemId, ItemRegistry, Resolved, Uses};

/// What a `consume` call actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Consumption {
    pub requested: u32,
    /// Units absorbed, including units that landed on infinite instances.
    pub consumed: u32,
    /// Instances that ran out and were dropped.
    pub removed: Vec<InstanceId>,
}

impl Consumption {
    /// Supply ran out before the requested amount was reached.
    pub fn is_partial(&self) -> bool {
        self.consumed < self.requested
    }
}

/// The player's items, in the order they were issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    instances: Vec<ItemInstance>,
    allocator: InstanceAllocator,
}

impl Inventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty inventory that keeps issuing ids after `allocator`.
    pub fn continuing(allocator: InstanceAllocator) -> Self {
        Self {
            instances: Vec::new(),
            allocator,
        }
    }

    /// Issue `count` new instances of `item_id`, each starting at the
    /// definition's current `max_uses`.
    pub fn give(&mut self, registry: &ItemRegistry, item_id: &ItemId, count: u32) -> Vec<InstanceId> {
        let definition = match registry.resolve(item_id) {
            Resolved::Found(def) => def,
            Resolved::Missing => {
                warn!("give skipped: item '{}' is not registered", item_id);
                return Vec::new();
            }
        };

        let issued: Vec<InstanceId> = (0..count)
            .map(|_| {
                let id = self.allocator.allocate();
                self.instances
                    .push(ItemInstance::new(id, item_id.clone(), definition.max_uses));
                id
            })
            .collect();

        debug!("gave {} x{} ({:?})", item_id, count, issued);
        issued
    }

    /// Spend up to `amount` uses of `item_id`.
    pub fn consume(&mut self, registry: &ItemRegistry, item_id: &ItemId, amount: u32) -> Consumption {
        let mut outcome = Consumption {
            requested: amount,
            ..Default::default()
        };

        let consumable = match registry.resolve(item_id) {
            Resolved::Found(def) => def.consumable,
            Resolved::Missing => {
                warn!("consume skipped: item '{}' is not registered", item_id);
                return outcome;
            }
        };

        for _ in 0..amount {
            let Some(target) = select_for_depletion(&self.instances, item_id) else {
                debug!(
                    "consume {}: supply exhausted after {} of {}",
                    item_id, outcome.consumed, amount
                );
                break;
            };
            let Some(index) = self.position(target) else {
                break;
            };

            let instance = &mut self.instances[index];
            instance.uses_left = instance.uses_left.spend_one();
            outcome.consumed += 1;
            debug!("consume {}: {} now at {}", item_id, target, instance.uses_left);

            if consumable && instance.uses_left.is_exhausted() {
                self.instances.remove(index);
                outcome.removed.push(target);
            }
        }

        outcome
    }

    /// Rewrite instances after an item was renamed by the author.
    pub fn rename_item(&mut self, old: &ItemId, new: &ItemId) -> usize {
        let mut renamed = 0;
        for instance in self.instances.iter_mut().filter(|i| &i.item_id == old) {
            instance.item_id = new.clone();
            renamed += 1;
        }
        renamed
    }

    /// Drop every instance of an item the author deleted.
    pub fn forget_item(&mut self, item_id: &ItemId) -> usize {
        let before = self.instances.len();
        self.instances.retain(|i| &i.item_id != item_id);
        before - self.instances.len()
    }

    pub fn instances(&self) -> &[ItemInstance] {
        &self.instances
    }

    /// Get an instance by id.
    pub fn get(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.instances.iter().find(|i| i.instance_id == id)
    }

    /// Instances of one item, in issue order.
    pub fn of_item<'a>(&'a self, item_id: &'a ItemId) -> impl Iterator<Item = &'a ItemInstance> + 'a {
        self.instances.iter().filter(move |i| &i.item_id == item_id)
    }

    /// Number of instances held for an item (broken ones included).
    pub fn count_of(&self, item_id: &ItemId) -> usize {
        self.of_item(item_id).count()
    }

    /// Sum of finite uses held for an item, or `Infinite` if any copy is infinite.
    pub fn total_uses(&self, item_id: &ItemId) -> Uses {
        let mut total = 0u32;
        for instance in self.of_item(item_id) {
            match instance.uses_left {
                Uses::Infinite => return Uses::Infinite,
                Uses::Finite(left) => total = total.saturating_add(left),
            }
        }
        Uses::Finite(total)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The allocator state, for carrying ids across a restart.
    pub fn allocator(&self) -> InstanceAllocator {
        self.allocator
    }

    fn position(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|i| i.instance_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_rules::ItemDefinition;

    fn id(raw: &str) -> ItemId {
        ItemId::parse(raw).unwrap()
    }

    fn registry() -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        registry
            .register(ItemDefinition::new(id("key"), Uses::Finite(1)))
            .unwrap();
        registry
            .register(ItemDefinition::new(id("ticket"), Uses::Infinite))
            .unwrap();
        registry
            .register(ItemDefinition::new(id("torch"), Uses::Finite(3)))
            .unwrap();
        registry
            .register(ItemDefinition::new(id("sword"), Uses::Finite(2)).with_consumable(false))
            .unwrap();
        registry
    }

    #[test]
    fn test_give_creates_independent_instances() {
        let registry = registry();
        let mut inv = Inventory::new();

        let issued = inv.give(&registry, &id("key"), 3);

        assert_eq!(issued.len(), 3);
        assert_eq!(inv.count_of(&id("key")), 3);
        assert!(inv.of_item(&id("key")).all(|i| i.uses_left == Uses::Finite(1)));
        assert_eq!(issued, vec![InstanceId(1), InstanceId(2), InstanceId(3)]);
    }

    #[test]
    fn test_give_unknown_item_is_noop() {
        let registry = registry();
        let mut inv = Inventory::new();

        assert!(inv.give(&registry, &id("ghost"), 2).is_empty());
        assert!(inv.is_empty());
    }

    #[test]
    fn test_give_copies_max_uses_at_issue_time() {
        let mut registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("torch"), 1);

        registry.get_mut(&id("torch")).unwrap().max_uses = Uses::Finite(9);
        inv.give(&registry, &id("torch"), 1);

        let uses: Vec<_> = inv.of_item(&id("torch")).map(|i| i.uses_left).collect();
        assert_eq!(uses, vec![Uses::Finite(3), Uses::Finite(9)]);
    }

    #[test]
    fn test_infinite_instances_never_deplete() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("ticket"), 2);

        let outcome = inv.consume(&registry, &id("ticket"), 5);

        assert_eq!(outcome.consumed, 5);
        assert!(outcome.removed.is_empty());
        assert_eq!(inv.count_of(&id("ticket")), 2);
        assert!(inv.of_item(&id("ticket")).all(|i| i.uses_left == Uses::Infinite));
    }

    #[test]
    fn test_consume_depletes_lowest_first() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("torch"), 2);
        // Wear the first torch down to one use: A(1), B(3).
        inv.instances[0].uses_left = Uses::Finite(1);

        let first = inv.consume(&registry, &id("torch"), 1);
        assert_eq!(first.removed, vec![InstanceId(1)]);
        assert!(inv.get(InstanceId(1)).is_none());

        inv.consume(&registry, &id("torch"), 1);
        assert_eq!(inv.get(InstanceId(2)).unwrap().uses_left, Uses::Finite(2));
    }

    #[test]
    fn test_consume_is_partial_when_short() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("key"), 2);

        let outcome = inv.consume(&registry, &id("key"), 5);

        assert_eq!(outcome.consumed, 2);
        assert!(outcome.is_partial());
        assert!(inv.is_empty());
    }

    #[test]
    fn test_finite_spent_before_infinite() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("ticket"), 1);
        // A finite copy of the same item, as left over from an earlier definition.
        let finite = inv.allocator.allocate();
        inv.instances
            .push(ItemInstance::new(finite, id("ticket"), Uses::Finite(1)));

        let outcome = inv.consume(&registry, &id("ticket"), 3);

        // The finite copy absorbs one unit and is dropped; the rest land on
        // the infinite ticket.
        assert_eq!(outcome.consumed, 3);
        assert_eq!(outcome.removed, vec![finite]);
        assert_eq!(inv.count_of(&id("ticket")), 1);
        assert_eq!(inv.instances()[0].uses_left, Uses::Infinite);
    }

    #[test]
    fn test_non_consumable_breaks_but_stays() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("sword"), 1);

        let outcome = inv.consume(&registry, &id("sword"), 3);

        assert_eq!(outcome.consumed, 2);
        assert!(outcome.removed.is_empty());
        let sword = &inv.instances()[0];
        assert!(sword.is_broken());
        assert_eq!(sword.uses_left, Uses::Finite(0));
    }

    #[test]
    fn test_consume_unknown_item_is_noop() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("key"), 1);

        let outcome = inv.consume(&registry, &id("ghost"), 1);

        assert_eq!(outcome.consumed, 0);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("key"), 1);
        inv.consume(&registry, &id("key"), 1);
        let next = inv.give(&registry, &id("key"), 1);
        assert_eq!(next, vec![InstanceId(2)]);

        let mut carried = Inventory::continuing(inv.allocator());
        assert_eq!(carried.give(&registry, &id("key"), 1), vec![InstanceId(3)]);
    }

    #[test]
    fn test_rename_and_forget() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("key"), 2);
        inv.give(&registry, &id("torch"), 1);

        assert_eq!(inv.rename_item(&id("key"), &id("brass_key")), 2);
        assert_eq!(inv.count_of(&id("brass_key")), 2);

        assert_eq!(inv.forget_item(&id("torch")), 1);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn test_total_uses() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("torch"), 2);
        assert_eq!(inv.total_uses(&id("torch")), Uses::Finite(6));

        inv.give(&registry, &id("ticket"), 1);
        assert_eq!(inv.total_uses(&id("ticket")), Uses::Infinite);
        assert_eq!(inv.total_uses(&id("key")), Uses::Finite(0));
    }
}
