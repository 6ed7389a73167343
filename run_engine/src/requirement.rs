//! Requirement evaluation - can the player take a choice right now?

use story_rules::Requirement;

use crate::inventory::Inventory;

/// Check a choice's requirement against the inventory.
///
/// No requirement, or one naming a blank item, always passes. Otherwise some
/// instance of the item needs infinite uses or at least `min_uses` left. This
/// only looks; it does not reserve the instance that matched.
pub fn is_satisfied(requirement: Option<&Requirement>, inventory: &Inventory) -> bool {
    let Some(requirement) = requirement else {
        return true;
    };
    if requirement.item_id.is_blank() {
        return true;
    }
    inventory
        .of_item(&requirement.item_id)
        .any(|instance| instance.uses_left.covers(requirement.min_uses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_rules::{ItemDefinition, ItemId, ItemRegistry, Uses};

    fn id(raw: &str) -> ItemId {
        ItemId::parse(raw).unwrap()
    }

    fn registry() -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        registry
            .register(ItemDefinition::new(id("key"), Uses::Finite(1)))
            .unwrap();
        registry
            .register(ItemDefinition::new(id("pass"), Uses::Infinite))
            .unwrap();
        registry
            .register(ItemDefinition::new(id("torch"), Uses::Finite(3)).with_consumable(false))
            .unwrap();
        registry
    }

    #[test]
    fn test_absent_requirement_passes() {
        assert!(is_satisfied(None, &Inventory::new()));
    }

    #[test]
    fn test_blank_item_passes() {
        let blank: ItemId = serde_json::from_str(r#""""#).unwrap();
        let req = Requirement::item(blank);
        assert!(is_satisfied(Some(&req), &Inventory::new()));
    }

    #[test]
    fn test_key_requirement() {
        let registry = registry();
        let req = Requirement::item(id("key"));
        let mut inv = Inventory::new();
        assert!(!is_satisfied(Some(&req), &inv));

        inv.give(&registry, &id("key"), 1);
        assert!(is_satisfied(Some(&req), &inv));
    }

    #[test]
    fn test_min_uses() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("torch"), 2);
        inv.consume(&registry, &id("torch"), 1);

        // Torches at 2 and 3 uses.
        assert!(is_satisfied(Some(&Requirement::item(id("torch")).with_min_uses(3)), &inv));
        inv.consume(&registry, &id("torch"), 2);
        // The worn torch takes both units (2 -> 1 -> 0); the fresh one keeps 3.
        assert!(is_satisfied(Some(&Requirement::item(id("torch")).with_min_uses(3)), &inv));
        assert!(!is_satisfied(Some(&Requirement::item(id("torch")).with_min_uses(4)), &inv));
    }

    #[test]
    fn test_broken_instance_does_not_satisfy() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("torch"), 1);
        inv.consume(&registry, &id("torch"), 3);

        assert_eq!(inv.count_of(&id("torch")), 1);
        assert!(!is_satisfied(Some(&Requirement::item(id("torch"))), &inv));
        // A zero threshold is met even by a broken copy.
        assert!(is_satisfied(Some(&Requirement::item(id("torch")).with_min_uses(0)), &inv));
    }

    #[test]
    fn test_infinite_always_satisfies() {
        let registry = registry();
        let mut inv = Inventory::new();
        inv.give(&registry, &id("pass"), 1);

        let req = Requirement::item(id("pass")).with_min_uses(1000);
        assert!(is_satisfied(Some(&req), &inv));
    }
}
