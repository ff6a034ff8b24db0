/// Identity-keyed containers that do not keep their members alive
/// Members are tracked by allocation address next to a `Weak` handle, so a
/// member disappears from iteration as soon as its last outside `Rc` drops.
/// Values attached to a dead member are released on the next purge, and
/// every insert, remove and snapshot purges.

use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Address of the shared allocation, used as the identity key
#[inline(always)]
fn identity_of<T: ?Sized>(value: &Rc<T>) -> usize {
    Rc::as_ptr(value) as *const () as usize
}

/// Map from weakly held `Rc` keys to owned values
pub struct WeakKeyMap<T: ?Sized, V> {
    /// Identity key to weak handle and value
    entries: FxHashMap<usize, (Weak<T>, V)>,
}

impl<T: ?Sized, V> WeakKeyMap<T, V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Insert or replace the value for a key, returns the previous value
    pub fn insert(&mut self, key: &Rc<T>, value: V) -> Option<V> {
        self.purge();
        self.entries
            .insert(identity_of(key), (Rc::downgrade(key), value))
            .map(|(_, previous)| previous)
    }

    /// Remove a key, returns its value if it was present
    pub fn remove(&mut self, key: &Rc<T>) -> Option<V> {
        let removed = self.entries.remove(&identity_of(key)).map(|(_, value)| value);
        self.purge();
        removed
    }

    pub fn get(&self, key: &Rc<T>) -> Option<&V> {
        self.entries
            .get(&identity_of(key))
            .filter(|(weak, _)| weak.strong_count() > 0)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &Rc<T>) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over live keys and their values
    pub fn iter(&self) -> impl Iterator<Item = (Rc<T>, &V)> + '_ {
        self.entries
            .values()
            .filter_map(|(weak, value)| weak.upgrade().map(|key| (key, value)))
    }

    /// Collect the live keys, so callers can mutate the map while walking them
    pub fn keys(&self) -> Vec<Rc<T>> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|(weak, _)| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries held, including dead ones not purged yet
    pub fn tracked(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries whose key is gone, returns how many were dropped
    pub fn purge(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, (weak, _)| weak.strong_count() > 0);
        before - self.entries.len()
    }
}

impl<T: ?Sized, V> Default for WeakKeyMap<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, V> fmt::Debug for WeakKeyMap<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakKeyMap")
            .field("live", &self.len())
            .field("tracked", &self.tracked())
            .finish()
    }
}

/// Set of weakly held `Rc` members
pub struct WeakCollection<T: ?Sized> {
    members: WeakKeyMap<T, ()>,
}

impl<T: ?Sized> WeakCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            members: WeakKeyMap::new(),
        }
    }

    /// Add a member, returns false if it was already present
    pub fn add(&mut self, value: &Rc<T>) -> bool {
        if self.members.contains_key(value) {
            return false;
        }
        self.members.insert(value, ());
        true
    }

    /// Remove a member, returns true if it was present
    pub fn remove(&mut self, value: &Rc<T>) -> bool {
        self.members.remove(value).is_some()
    }

    /// Check whether a live member has the same identity
    pub fn contains(&self, value: &Rc<T>) -> bool {
        self.members.contains_key(value)
    }

    /// Iterate over the members that are still alive
    ///
    /// Yields strong handles; holding on to them keeps the member alive.
    pub fn iter(&self) -> impl Iterator<Item = Rc<T>> + '_ {
        self.members.iter().map(|(member, _)| member)
    }

    /// Collect the live members, so callers can mutate the collection while walking it
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.members.keys()
    }

    /// Number of live members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every member
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Drop handles whose member is gone, returns how many were dropped
    pub fn purge(&mut self) -> usize {
        self.members.purge()
    }
}

impl<T: ?Sized> Default for WeakCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for WeakCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCollection")
            .field("live", &self.len())
            .finish()
    }
}
