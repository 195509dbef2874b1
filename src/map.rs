//! Protocol objects map

use std::sync::Arc;

use crate::proxy::ProxyObject;

/// A holder for the object store of a connection
///
/// Keeps track of which object id is associated to which proxy object, and
/// which is currently unused. Ids are 1-based; every object in this binding
/// lives in the client-allocated namespace.
pub struct ObjectMap {
    objects: Vec<Option<Arc<dyn ProxyObject>>>,
}

impl ObjectMap {
    /// Create a new empty object map
    pub fn new() -> ObjectMap {
        ObjectMap { objects: Vec::new() }
    }

    /// Find an object in the store
    pub fn find(&self, id: u32) -> Option<Arc<dyn ProxyObject>> {
        if id == 0 {
            return None;
        }
        self.objects.get((id - 1) as usize).and_then(|x| x.clone())
    }

    /// Remove an object from the store
    ///
    /// Does nothing if the object didn't previously exist. The freed id may
    /// be handed out again by a later insertion.
    pub fn remove(&mut self, id: u32) {
        if id == 0 {
            return;
        }
        if let Some(place) = self.objects.get_mut((id - 1) as usize) {
            *place = None;
        }
    }

    /// Allocate a new id for an object, at the first free slot
    pub fn insert_new(&mut self, object: Arc<dyn ProxyObject>) -> u32 {
        match self.objects.iter().position(|p| p.is_none()) {
            Some(idx) => {
                self.objects[idx] = Some(object);
                idx as u32 + 1
            }
            None => {
                self.objects.push(Some(object));
                self.objects.len() as u32
            }
        }
    }
}

impl Default for ObjectMap {
    fn default() -> ObjectMap {
        ObjectMap::new()
    }
}
