pub mod weak_collection;

pub use weak_collection::{WeakCollection, WeakKeyMap};
