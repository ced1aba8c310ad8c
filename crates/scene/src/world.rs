use crate::components::{Drawable3D, Transform};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Entity store with a parent/child hierarchy.
///
/// Components live in parallel slot arrays indexed by `EntityId::index()`.
/// Despawned slots are recycled with a bumped generation, so a handle to a
/// despawned entity never resolves again.
#[derive(Debug, Default)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    names: Vec<Option<String>>,
    parents: Vec<Option<EntityId>>,
    transforms: Vec<Option<Transform>>,
    drawables_3d: Vec<Option<Drawable3D>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.generations.len() as u32;
                self.ensure_capacity(index as usize);
                index
            }
        };
        let idx = index as usize;
        self.alive[idx] = true;
        self.names[idx] = Some(name.into());
        self.parents[idx] = None;
        self.transforms[idx] = Some(Transform::identity());
        self.drawables_3d[idx] = None;
        EntityId(Handle::new(index, self.generations[idx]))
    }

    /// Spawns a child of `parent`, or `None` if `parent` is not alive.
    pub fn spawn_child(&mut self, parent: EntityId, name: impl Into<String>) -> Option<EntityId> {
        if !self.is_alive(parent) {
            return None;
        }
        let child = self.spawn(name);
        self.parents[child.index() as usize] = Some(parent);
        Some(child)
    }

    /// Removes `entity` and all of its descendants.
    ///
    /// Returns `false` if `entity` was already gone.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        for child in self.children(entity) {
            self.despawn(child);
        }
        let idx = entity.index() as usize;
        self.alive[idx] = false;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.names[idx] = None;
        self.parents[idx] = None;
        self.transforms[idx] = None;
        self.drawables_3d[idx] = None;
        self.free.push(entity.index());
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        let idx = entity.index() as usize;
        self.alive.get(idx).copied().unwrap_or(false)
            && self.generations[idx] == entity.generation()
    }

    pub fn len(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        if !self.is_alive(entity) {
            return None;
        }
        self.names[entity.index() as usize].as_deref()
    }

    pub fn parent(&self, entity: EntityId) -> Option<EntityId> {
        if !self.is_alive(entity) {
            return None;
        }
        self.parents[entity.index() as usize]
    }

    /// Children of `entity` in ascending slot order.
    pub fn children(&self, entity: EntityId) -> Vec<EntityId> {
        if !self.is_alive(entity) {
            return Vec::new();
        }
        self.parents
            .iter()
            .enumerate()
            .filter(|(idx, p)| self.alive[*idx] && **p == Some(entity))
            .map(|(idx, _)| EntityId(Handle::new(idx as u32, self.generations[idx])))
            .collect()
    }

    pub fn find_child(&self, parent: EntityId, name: &str) -> Option<EntityId> {
        self.children(parent)
            .into_iter()
            .find(|c| self.name(*c) == Some(name))
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        if !self.is_alive(entity) {
            return None;
        }
        self.transforms[entity.index() as usize]
    }

    /// Returns `false` if `entity` is not alive.
    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.transforms[entity.index() as usize] = Some(transform);
        true
    }

    /// Transform relative to the world root, composed through all parents.
    pub fn world_transform(&self, entity: EntityId) -> Option<Transform> {
        let local = self.transform(entity)?;
        match self.parent(entity) {
            Some(parent) => Some(self.world_transform(parent)?.compose(&local)),
            None => Some(local),
        }
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.drawables_3d[entity.index() as usize] = Some(drawable);
        true
    }

    /// Detaches and returns the drawable of `entity`, if any.
    pub fn clear_drawable_3d(&mut self, entity: EntityId) -> Option<Drawable3D> {
        if !self.is_alive(entity) {
            return None;
        }
        self.drawables_3d[entity.index() as usize].take()
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<&Drawable3D> {
        if !self.is_alive(entity) {
            return None;
        }
        self.drawables_3d[entity.index() as usize].as_ref()
    }

    /// Every drawable with its world transform, in slot order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            if !self.alive[idx] {
                continue;
            }
            let entity = EntityId(Handle::new(idx as u32, self.generations[idx]));
            let Some(transform) = self.world_transform(entity) else {
                continue;
            };
            out.push((entity, transform, drawable.clone()));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.generations.len() <= idx {
            let new_len = idx + 1;
            self.generations.resize(new_len, 0);
            self.alive.resize(new_len, false);
            self.names.resize(new_len, None);
            self.parents.resize(new_len, None);
            self.transforms.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
        }
    }
}
