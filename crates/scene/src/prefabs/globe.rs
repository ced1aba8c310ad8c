use crate::World;
use crate::components::Drawable3D;
use crate::entity::EntityId;

pub const GLOBE_ROOT_NAME: &str = "GlobeEntity";
pub const GLOBE_STATE_NAME: &str = "GlobeState";
pub const GLOBE_SPHERE_NAME: &str = "Sphere";

/// The two transform layers of a globe.
///
/// `root` takes free-form gesture manipulation (drag, pinch, rotate).
/// `state` is its child and carries the story-driven transform; annotations
/// hang off `state` so they follow both layers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlobeEntities {
    pub root: EntityId,
    pub state: EntityId,
    pub sphere: EntityId,
}

pub fn spawn_globe(world: &mut World, radius: f64) -> GlobeEntities {
    let root = world.spawn(GLOBE_ROOT_NAME);
    let state = world
        .spawn_child(root, GLOBE_STATE_NAME)
        .unwrap_or_else(|| world.spawn(GLOBE_STATE_NAME));
    let sphere = world
        .spawn_child(state, GLOBE_SPHERE_NAME)
        .unwrap_or_else(|| world.spawn(GLOBE_SPHERE_NAME));
    world.set_drawable_3d(sphere, Drawable3D::sphere(radius));
    GlobeEntities {
        root,
        state,
        sphere,
    }
}

#[cfg(test)]
mod tests {
    use super::{GLOBE_STATE_NAME, spawn_globe};
    use crate::World;
    use crate::components::Shape3D;

    #[test]
    fn spawns_layered_globe() {
        let mut world = World::new();
        let globe = spawn_globe(&mut world, 0.2);

        assert_eq!(world.parent(globe.state), Some(globe.root));
        assert_eq!(world.parent(globe.sphere), Some(globe.state));
        assert_eq!(world.find_child(globe.root, GLOBE_STATE_NAME), Some(globe.state));

        let drawables = world.drawables_3d();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, globe.sphere);
        assert!(matches!(drawables[0].2.shape, Shape3D::Sphere { radius } if radius == 0.2));
    }
}
