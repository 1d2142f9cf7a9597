//! Typed sparse component tables
//!
//! One table per component type, keyed by entity id. Accessing a missing
//! component yields `None`, never a panic - every system null-guards and
//! skips entities that lack expected data.
//!
//! Queries return ids sorted ascending so iteration order is stable
//! across ticks and platforms.

use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};

use super::entity::{EntityAllocator, EntityId};

/// Type-erased view of a component table, enough to purge an entity.
trait AnyTable {
    fn remove_entity(&mut self, id: EntityId);
    fn len(&self) -> usize;
    fn ids(&self) -> Vec<EntityId>;
    fn contains(&self, id: EntityId) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Sparse table for a single component type.
struct Table<T: 'static> {
    map: HashMap<EntityId, T>,
}

impl<T: 'static> Table<T> {
    fn new() -> Self {
        Self { map: HashMap::new() }
    }
}

impl<T: 'static> AnyTable for Table<T> {
    fn remove_entity(&mut self, id: EntityId) {
        self.map.remove(&id);
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn ids(&self) -> Vec<EntityId> {
        self.map.keys().copied().collect()
    }

    fn contains(&self, id: EntityId) -> bool {
        self.map.contains_key(&id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Central store: the entity set plus one sparse table per component type.
#[derive(Default)]
pub struct ComponentStore {
    allocator: EntityAllocator,
    entities: BTreeSet<EntityId>,
    tables: HashMap<TypeId, Box<dyn AnyTable>>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: BTreeSet::new(),
            tables: HashMap::new(),
        }
    }

    /// Allocate a fresh entity id and register it in the entity set.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.entities.insert(id);
        id
    }

    /// Whether the entity exists (has not been removed).
    pub fn has_entity(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All live entity ids, ascending.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    /// Attach a component to an entity, replacing any existing one of the
    /// same type. Attaching to a removed entity is a no-op.
    pub fn add<T: 'static>(&mut self, id: EntityId, component: T) {
        if !self.entities.contains(&id) {
            return;
        }
        let table = self
            .tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Table::<T>::new()));
        if let Some(table) = table.as_any_mut().downcast_mut::<Table<T>>() {
            table.map.insert(id, component);
        }
    }

    /// Borrow a component, or `None` if the entity lacks it.
    pub fn get<T: 'static>(&self, id: EntityId) -> Option<&T> {
        self.table::<T>()?.map.get(&id)
    }

    /// Mutably borrow a component, or `None` if the entity lacks it.
    pub fn get_mut<T: 'static>(&mut self, id: EntityId) -> Option<&mut T> {
        self.table_mut::<T>()?.map.get_mut(&id)
    }

    /// Detach a component from an entity, returning it if present.
    pub fn remove<T: 'static>(&mut self, id: EntityId) -> Option<T> {
        self.table_mut::<T>()?.map.remove(&id)
    }

    /// Whether the entity currently holds a component of this type.
    pub fn has<T: 'static>(&self, id: EntityId) -> bool {
        self.table::<T>().is_some_and(|t| t.map.contains_key(&id))
    }

    /// Remove an entity: purge it from every table and from the entity set.
    pub fn remove_entity(&mut self, id: EntityId) {
        if !self.entities.remove(&id) {
            return;
        }
        for table in self.tables.values_mut() {
            table.remove_entity(id);
        }
    }

    /// Ids of all entities holding component `T`, sorted ascending.
    pub fn ids_with<T: 'static>(&self) -> Vec<EntityId> {
        let Some(table) = self.tables.get(&TypeId::of::<T>()) else {
            return Vec::new();
        };
        let mut ids = table.ids();
        ids.sort_unstable();
        ids
    }

    /// Ids of entities holding both `A` and `B`: the intersection, computed
    /// by scanning the smaller table and filtering against the other.
    pub fn query2<A: 'static, B: 'static>(&self) -> Vec<EntityId> {
        self.query_types(&[TypeId::of::<A>(), TypeId::of::<B>()])
    }

    /// Ids of entities holding `A`, `B` and `C`.
    pub fn query3<A: 'static, B: 'static, C: 'static>(&self) -> Vec<EntityId> {
        self.query_types(&[TypeId::of::<A>(), TypeId::of::<B>(), TypeId::of::<C>()])
    }

    fn query_types(&self, types: &[TypeId]) -> Vec<EntityId> {
        if types.is_empty() {
            return Vec::new();
        }
        // Start from the smallest candidate table.
        let mut tables = Vec::with_capacity(types.len());
        for ty in types {
            match self.tables.get(ty) {
                Some(t) => tables.push(t.as_ref()),
                None => return Vec::new(),
            }
        }
        tables.sort_by_key(|t| t.len());
        let (smallest, rest) = tables.split_first().expect("non-empty");
        let mut ids: Vec<EntityId> = smallest
            .ids()
            .into_iter()
            .filter(|id| rest.iter().all(|t| t.contains(*id)))
            .collect();
        ids.sort_unstable();
        ids
    }

    fn table<T: 'static>(&self) -> Option<&Table<T>> {
        self.tables
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<Table<T>>()
    }

    fn table_mut<T: 'static>(&mut self) -> Option<&mut Table<T>> {
        self.tables
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<Table<T>>()
    }
}
