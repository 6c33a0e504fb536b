use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }
}

/// A keyed partition of the blackboard: one optional `V` per entity `K`.
///
/// A partition is stored as a single `BTreeMap<K, V>` value under its key id, so iteration order is
/// the key order regardless of insertion order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition<K: 'static, V: 'static> {
    key: BbKey<BTreeMap<K, V>>,
    name: &'static str,
}

impl<K: 'static, V: 'static> Copy for Partition<K, V> {}

impl<K: 'static, V: 'static> Clone for Partition<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static, V: 'static> Partition<K, V> {
    pub const fn new(id: u64, name: &'static str) -> Self {
        Self {
            key: BbKey::new(id),
            name,
        }
    }

    pub fn key(self) -> BbKey<BTreeMap<K, V>> {
        self.key
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Per-simulation store linking entities to their current targets, waypoints and registries.
///
/// The blackboard never owns simulated entities; registries hold ids and small copied values.
/// Access is single-threaded and strictly sequential within a tick.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(&key.id)?;
        value.downcast_ref::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key id={} (stored type differs from requested)",
                key.id
            )
        })
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        value.downcast_mut::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key id={} (stored type differs from requested)",
                key.id
            )
        })
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        value.downcast::<T>().map(|b| *b).ok().or_else(|| {
            panic!(
                "blackboard type mismatch for key id={} (stored type differs from requested)",
                key.id
            )
        })
    }

    fn partition_mut<K, V>(&mut self, partition: Partition<K, V>) -> &mut BTreeMap<K, V>
    where
        K: Ord + 'static,
        V: 'static,
    {
        if !self.contains(partition.key) {
            self.set(partition.key, BTreeMap::new());
        }
        match self.get_mut(partition.key) {
            Some(map) => map,
            None => unreachable!("partition `{}` was just inserted", partition.name),
        }
    }

    /// Set the entry for `id`, replacing any previous value.
    pub fn set_for<K, V>(&mut self, partition: Partition<K, V>, id: K, value: V)
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.partition_mut(partition).insert(id, value);
    }

    /// Entry for `id`, or `None` when the partition or the entry is absent.
    pub fn get_for<K, V>(&self, partition: Partition<K, V>, id: &K) -> Option<&V>
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.get(partition.key)?.get(id)
    }

    pub fn contains_for<K, V>(&self, partition: Partition<K, V>, id: &K) -> bool
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.get_for(partition, id).is_some()
    }

    pub fn remove_for<K, V>(&mut self, partition: Partition<K, V>, id: &K) -> Option<V>
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.get_mut(partition.key)?.remove(id)
    }

    /// Swap in a whole partition at once. Used by the host to refresh registries every tick.
    pub fn replace<K, V>(
        &mut self,
        partition: Partition<K, V>,
        entries: BTreeMap<K, V>,
    ) -> Option<BTreeMap<K, V>>
    where
        K: Ord + 'static,
        V: 'static,
    {
        let previous = self.remove(partition.key);
        self.set(partition.key, entries);
        previous
    }

    pub fn clear_partition<K, V>(&mut self, partition: Partition<K, V>)
    where
        K: Ord + 'static,
        V: 'static,
    {
        if let Some(map) = self.get_mut(partition.key) {
            map.clear();
        }
    }

    /// Entries of a partition in key order. Empty when the partition was never written.
    pub fn entries<K, V>(&self, partition: Partition<K, V>) -> impl Iterator<Item = (&K, &V)> + '_
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.get(partition.key).into_iter().flat_map(|map| map.iter())
    }

    pub fn partition_len<K, V>(&self, partition: Partition<K, V>) -> usize
    where
        K: Ord + 'static,
        V: 'static,
    {
        self.get(partition.key).map_or(0, BTreeMap::len)
    }
}
