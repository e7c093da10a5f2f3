//! Entity storage seen by the node.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::StoreError;
use crate::message::{EntityId, EntityType};

/// A renameable entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Display label: the name of a device or asset, the title of a customer
    pub label: String,
}

impl Entity {
    pub fn new(id: EntityId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Attribute that carries the label for this entity type.
    pub fn label_attribute(&self) -> &'static str {
        match self.id.entity_type {
            EntityType::Customer => "title",
            _ => "name",
        }
    }
}

/// Lookup and save of entities by id.
pub trait EntityStore {
    /// Find an entity, `Ok(None)` when it does not exist.
    fn find(&self, id: &EntityId) -> Result<Option<Entity>, StoreError>;

    /// Persist an updated entity.
    fn save(&mut self, entity: Entity) -> Result<(), StoreError>;
}

/// HashMap-backed store for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    entities: HashMap<EntityId, Entity>,
    read_only: bool,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every save with [`StoreError::ReadOnly`].
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn find(&self, id: &EntityId) -> Result<Option<Entity>, StoreError> {
        Ok(self.entities.get(id).cloned())
    }

    fn save(&mut self, entity: Entity) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        self.entities.insert(entity.id.clone(), entity);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_find() {
        let id = EntityId::new(EntityType::Asset, "a1");
        let mut store = InMemoryEntityStore::new();
        store.insert(Entity::new(id.clone(), "Old"));

        store.save(Entity::new(id.clone(), "New")).unwrap();

        assert_eq!(store.find(&id).unwrap().unwrap().label, "New");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_read_only_rejects_save() {
        let id = EntityId::new(EntityType::Device, "d1");
        let mut store = InMemoryEntityStore::new().read_only();
        assert_eq!(store.save(Entity::new(id, "x")), Err(StoreError::ReadOnly));
        assert!(store.is_empty());
    }

    #[test]
    fn test_label_attribute() {
        let customer = Entity::new(EntityId::new(EntityType::Customer, "c1"), "Acme");
        let device = Entity::new(EntityId::new(EntityType::Device, "d1"), "Pump");
        assert_eq!(customer.label_attribute(), "title");
        assert_eq!(device.label_attribute(), "name");
    }
}
