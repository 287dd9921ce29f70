use tw_core::{ComponentKind, EntityId, World};

use super::{Action, DESCRIBED, arguments};
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

/// Put a carried item on something with a surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PutOnAction;

impl Action for PutOnAction {
    fn name(&self) -> &'static str {
        "put on"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[DESCRIBED, DESCRIBED]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [item, target] = arguments(self, entities)?;
        if item == target || world.holds(item, target) {
            return Ok("That is less possible than you might expect.".into());
        }
        if !world.is_carried(item) {
            return Ok("You are not carrying that.".into());
        }
        if !world.get(target)?.has(ComponentKind::Container) {
            return Ok(format!(
                "You cannot put anything on {}",
                narrator::the(world, target)?
            ));
        }

        world.put_on(item, target)?;
        Ok(format!(
            "You put {} on {}.",
            narrator::the(world, item)?,
            narrator::the(world, target)?
        ))
    }
}

/// Put a carried item on the floor of the current room.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropAction;

impl Action for DropAction {
    fn name(&self) -> &'static str {
        "drop"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[DESCRIBED]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [item] = arguments(self, entities)?;
        let floor = world
            .query()
            .has(ComponentKind::Floor)
            .first()
            .map(|(id, _)| id);
        match floor {
            Some(floor) => PutOnAction.apply(world, &[item, floor]),
            None => Ok("There is nowhere to put that.".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TakeAction;
    use crate::action::testing::{container, fixture};
    use proptest::prelude::*;
    use tw_core::Entity;
    use tw_core::component::{DescriptionComponent, FloorComponent};

    #[test]
    fn put_requires_carrying() {
        let mut f = fixture();
        let out = PutOnAction.apply(&mut f.world, &[f.key, f.table]).unwrap();
        assert_eq!(out, "You are not carrying that.");
        assert_eq!(container(&f.world, f.ground), vec![f.key]);
    }

    #[test]
    fn put_on_a_surface() {
        let mut f = fixture();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        let out = PutOnAction.apply(&mut f.world, &[f.key, f.table]).unwrap();
        assert_eq!(out, "You put the iron key on the table.");
        assert_eq!(container(&f.world, f.table), vec![f.key]);
        assert!(f.world.inventory().unwrap().items.is_empty());
        assert!(f.world.is_active(f.key));
    }

    #[test]
    fn put_on_something_without_a_surface() {
        let mut f = fixture();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        let out = PutOnAction.apply(&mut f.world, &[f.key, f.barrel]).unwrap();
        assert_eq!(out, "You cannot put anything on the barrel");
        assert!(f.world.is_carried(f.key));
    }

    #[test]
    fn put_on_itself_is_rejected_even_when_carried() {
        let mut f = fixture();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        let out = PutOnAction.apply(&mut f.world, &[f.key, f.key]).unwrap();
        assert_eq!(out, "That is less possible than you might expect.");
        assert!(f.world.is_carried(f.key));
    }

    #[test]
    fn take_then_put_back_restores_containers() {
        let mut f = fixture();
        let ground = container(&f.world, f.ground);
        let inventory = f.world.inventory().unwrap().clone();

        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        PutOnAction.apply(&mut f.world, &[f.key, f.ground]).unwrap();

        assert_eq!(container(&f.world, f.ground), ground);
        assert_eq!(f.world.inventory().unwrap(), &inventory);
    }

    #[test]
    fn drop_uses_the_floor() {
        let mut f = fixture();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        let out = DropAction.apply(&mut f.world, &[f.key]).unwrap();
        assert_eq!(out, "You put the iron key on the ground.");
        assert_eq!(container(&f.world, f.ground), vec![f.key]);
    }

    #[test]
    fn drop_without_a_floor() {
        let mut f = fixture();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        f.world.set_room(f.hall).unwrap();
        let out = DropAction.apply(&mut f.world, &[f.key]).unwrap();
        assert_eq!(out, "There is nowhere to put that.");
        assert!(f.world.is_carried(f.key));
    }

    #[test]
    fn drop_on_a_floor_without_a_surface() {
        let mut f = fixture();
        let hall = f.hall;
        f.world
            .place(
                hall,
                Entity::new()
                    .with(DescriptionComponent::new(["floor"]))
                    .with(FloorComponent),
            )
            .unwrap();
        TakeAction.apply(&mut f.world, &[f.key]).unwrap();
        f.world.set_room(hall).unwrap();

        let out = DropAction.apply(&mut f.world, &[f.key]).unwrap();
        assert_eq!(out, "You cannot put anything on the floor");
        assert!(f.world.is_carried(f.key));
    }

    proptest! {
        #[test]
        fn putting_anything_on_itself_fails(index in 0usize..8, carry in any::<bool>()) {
            let mut f = fixture();
            if carry {
                f.world.take_into_inventory(f.key).unwrap();
            }
            let active = f.world.active_entities().to_vec();
            let id = active[index % active.len()];
            let before = f.world.clone();

            let out = PutOnAction.apply(&mut f.world, &[id, id]).unwrap();
            prop_assert_eq!(out, "That is less possible than you might expect.");
            prop_assert_eq!(f.world, before);
        }

        #[test]
        fn items_are_never_in_two_places(moves in prop::collection::vec(0u8..4, 0..20)) {
            let mut f = fixture();
            for step in moves {
                match step {
                    0 => TakeAction.apply(&mut f.world, &[f.key]).unwrap(),
                    1 => PutOnAction.apply(&mut f.world, &[f.key, f.table]).unwrap(),
                    2 => PutOnAction.apply(&mut f.world, &[f.key, f.ground]).unwrap(),
                    _ => DropAction.apply(&mut f.world, &[f.key]).unwrap(),
                };
                let places = usize::from(f.world.is_carried(f.key))
                    + usize::from(container(&f.world, f.table).contains(&f.key))
                    + usize::from(container(&f.world, f.ground).contains(&f.key));
                prop_assert_eq!(places, 1);
                prop_assert!(f.world.is_active(f.key));
            }
        }
    }
}
