use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

type Table<T> = BTreeMap<u64, T>;

/// Per-agent continuation store.
///
/// Logically `Map<ValueType, Map<Key, ValueType>>`: every distinct value type
/// gets its own table, created lazily on first write. Keys are node
/// identifiers (or an entity id), so the same node can hold a resume index, a
/// timer and its last status side by side as long as they are distinct types.
/// Nodes wrap their state in small newtypes for exactly that reason.
///
/// Reads come in two flavours: [`Context::get`] returns the type default for
/// a missing entry, [`Context::try_get`] reports presence explicitly.
#[derive(Default)]
pub struct Context {
    tables: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Number of distinct value types that have been written at least once.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of entries stored for value type `T`.
    pub fn len<T: Send + Sync + 'static>(&self) -> usize {
        self.table::<T>().map_or(0, BTreeMap::len)
    }

    pub fn contains<T: Send + Sync + 'static>(&self, key: impl Into<u64>) -> bool {
        let key = key.into();
        self.table::<T>().is_some_and(|t| t.contains_key(&key))
    }

    /// Read a value, falling back to `T::default()` when absent.
    pub fn get<T>(&self, key: impl Into<u64>) -> T
    where
        T: Clone + Default + Send + Sync + 'static,
    {
        self.try_get::<T>(key).cloned().unwrap_or_default()
    }

    pub fn try_get<T: Send + Sync + 'static>(&self, key: impl Into<u64>) -> Option<&T> {
        let key = key.into();
        self.table::<T>()?.get(&key)
    }

    pub fn get_mut<T: Send + Sync + 'static>(&mut self, key: impl Into<u64>) -> Option<&mut T> {
        let key = key.into();
        self.tables
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.downcast_mut::<Table<T>>())?
            .get_mut(&key)
    }

    /// Mutable access, inserting `T::default()` first if the entry is absent.
    pub fn entry<T>(&mut self, key: impl Into<u64>) -> &mut T
    where
        T: Default + Send + Sync + 'static,
    {
        self.table_mut::<T>().entry(key.into()).or_default()
    }

    /// Store a value, returning the previous one.
    pub fn set<T: Send + Sync + 'static>(&mut self, key: impl Into<u64>, value: T) -> Option<T> {
        self.table_mut::<T>().insert(key.into(), value)
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self, key: impl Into<u64>) -> Option<T> {
        let key = key.into();
        self.tables
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.downcast_mut::<Table<T>>())?
            .remove(&key)
    }

    fn table<T: Send + Sync + 'static>(&self) -> Option<&Table<T>> {
        self.tables
            .get(&TypeId::of::<T>())
            .and_then(|t| t.downcast_ref::<Table<T>>())
    }

    fn table_mut<T: Send + Sync + 'static>(&mut self) -> &mut Table<T> {
        self.tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Table::<T>::new()))
            .downcast_mut::<Table<T>>()
            .unwrap_or_else(|| {
                panic!(
                    "context table type mismatch for {} (stored table differs from requested)",
                    std::any::type_name::<T>()
                )
            })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("tables", &self.tables.len())
            .finish()
    }
}
