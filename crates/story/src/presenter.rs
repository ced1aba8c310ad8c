//! Drives the globe scene from a story.
//!
//! The presenter owns the scene world and reacts to three inputs: node
//! selection, per-frame updates from the host, and gestures. Model loading
//! is split around its suspend point so no borrow of the presenter is held
//! while a load is pending:
//!
//! ```ignore
//! for request in presenter.model_load_requests() {
//!     let result = request.fetch(&loader).await;
//!     presenter.complete_model_load(&request, result)?;
//! }
//! ```

use std::collections::BTreeMap;

use foundation::math::{Quat, Vec3};
use runtime::{Event, EventBus, Frame, LoadGenerations, LoadToken};
use scene::components::{Drawable3D, Transform};
use scene::entity::EntityId;
use scene::prefabs::globe::{GlobeEntities, spawn_globe};
use scene::{
    AnimationHandle, AnimationStatus, CameraProvider, ModelResource, ModelSource, ResourceError,
    ResourceLoader, TransformAnimator, TransformTarget, World, direction_to_camera,
};
use tracing::{debug, warn};

use crate::accumulate::accumulate_with_radius;
use crate::config::PresenterConfig;
use crate::error::StoryError;
use crate::ids::{AnnotationId, StoryNodeId};
use crate::model::Story;
use crate::projector::project_with_default;

#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    NodeSelected(StoryNodeId),
    /// The globe jumped to the node's state without animating.
    AnimationApplied(AnimationHandle),
    AnimationStarted(AnimationHandle),
    AnimationFinished(AnimationHandle),
    AnnotationPlaced {
        annotation: AnnotationId,
        entity: EntityId,
    },
    AnnotationRemoved(AnnotationId),
    ModelLoaded(AnnotationId),
    /// Something the user should be told about.
    Alert(String),
}

/// Raw deltas from the host's gesture recognizers. Each is optional.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GestureDelta {
    pub translation: Option<Vec3>,
    /// Multiplicative.
    pub scale: Option<f64>,
    /// Applied on top of the current orientation.
    pub rotation: Option<Quat>,
}

/// A marker model the presenter wants loaded.
#[derive(Debug, Clone)]
pub struct ModelLoadRequest {
    pub annotation: AnnotationId,
    pub source: ModelSource,
    token: LoadToken,
}

impl ModelLoadRequest {
    pub fn token(&self) -> &LoadToken {
        &self.token
    }

    pub async fn fetch<L: ResourceLoader>(
        &self,
        loader: &L,
    ) -> Result<ModelResource, ResourceError> {
        loader.load_model(&self.source).await
    }
}

#[derive(Debug, Clone)]
struct PlacedAnnotation {
    entity: EntityId,
    model: Option<ModelSource>,
    /// The last load of `model` failed; not retried until the next selection.
    load_failed: bool,
}

pub struct StoryPresenter {
    world: World,
    globe: GlobeEntities,
    state_animator: TransformAnimator,
    root_animator: TransformAnimator,
    state_animation: Option<AnimationHandle>,
    placed: BTreeMap<AnnotationId, PlacedAnnotation>,
    camera: Box<dyn CameraProvider>,
    config: PresenterConfig,
    loads: LoadGenerations,
    events: EventBus<PresenterEvent>,
    selected: Option<StoryNodeId>,
}

impl StoryPresenter {
    pub fn new(config: PresenterConfig, camera: impl CameraProvider + 'static) -> Self {
        let mut world = World::new();
        let globe = spawn_globe(&mut world, config.globe_radius);
        Self {
            state_animator: TransformAnimator::new(globe.state),
            root_animator: TransformAnimator::new(globe.root),
            world,
            globe,
            state_animation: None,
            placed: BTreeMap::new(),
            camera: Box::new(camera),
            config,
            loads: LoadGenerations::new(),
            events: EventBus::new(),
            selected: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn globe(&self) -> GlobeEntities {
        self.globe
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn selected_node(&self) -> Option<StoryNodeId> {
        self.selected
    }

    pub fn annotation_entity(&self, annotation: AnnotationId) -> Option<EntityId> {
        self.placed.get(&annotation).map(|p| p.entity)
    }

    pub fn is_animating(&self) -> bool {
        self.state_animator.is_playing() || self.root_animator.is_playing()
    }

    pub fn animation_status(&self, handle: AnimationHandle) -> AnimationStatus {
        self.state_animator.status(handle)
    }

    /// Moves the globe to the accumulated state of `node` and shows its
    /// annotations.
    ///
    /// An unknown node leaves the scene untouched.
    pub fn select_node(
        &mut self,
        story: &Story,
        node: StoryNodeId,
    ) -> Result<AnimationHandle, StoryError> {
        let resolved = match accumulate_with_radius(story, node, self.config.globe_radius) {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!(node = %node, "ignoring selection: {err}");
                return Err(err);
            }
        };

        let handle = self.state_animator.animate_to(
            &mut self.world,
            resolved.target(),
            self.config.transform_animation_duration_s,
        );
        self.state_animation = Some(handle);
        self.loads.invalidate();
        self.selected = Some(node);

        self.events.emit(PresenterEvent::NodeSelected(node));
        match self.state_animator.status(handle) {
            AnimationStatus::Running => self.events.emit(PresenterEvent::AnimationStarted(handle)),
            AnimationStatus::Applied => self.events.emit(PresenterEvent::AnimationApplied(handle)),
            _ => {}
        }

        self.sync_annotations(story, node);
        Ok(handle)
    }

    fn sync_annotations(&mut self, story: &Story, node: StoryNodeId) {
        let placements = project_with_default(
            story,
            node,
            self.config.globe_radius,
            self.config.default_model_offset,
        );

        let stale: Vec<AnnotationId> = self
            .placed
            .keys()
            .filter(|id| !placements.iter().any(|(visible, _)| visible == *id))
            .copied()
            .collect();
        for id in stale {
            if let Some(placed) = self.placed.remove(&id) {
                self.world.despawn(placed.entity);
                self.events.emit(PresenterEvent::AnnotationRemoved(id));
            }
        }

        for (id, placement) in placements {
            let model = story.annotation(id).and_then(|a| a.model_source());
            let transform = placement.model_transform();

            if let Some(placed) = self.placed.get_mut(&id)
                && self.world.is_alive(placed.entity)
            {
                self.world.set_transform(placed.entity, transform);
                if placed.model != model {
                    debug!(annotation = %id, "marker model changed");
                    self.world.clear_drawable_3d(placed.entity);
                    placed.model = model;
                }
                placed.load_failed = false;
                continue;
            }

            let Some(entity) = self
                .world
                .spawn_child(self.globe.state, format!("annotation-{id}"))
            else {
                warn!(annotation = %id, "globe state entity is gone");
                continue;
            };
            self.world.set_transform(entity, transform);
            self.placed.insert(
                id,
                PlacedAnnotation {
                    entity,
                    model,
                    load_failed: false,
                },
            );
            self.events.emit(PresenterEvent::AnnotationPlaced {
                annotation: id,
                entity,
            });
        }
    }

    /// Advances in-flight animations. Call once per host frame.
    pub fn update(&mut self, frame: Frame) -> Option<AnimationStatus> {
        self.events.begin_frame(frame);
        self.root_animator.update(&mut self.world, frame);

        let status = self.state_animator.update(&mut self.world, frame);
        if status == Some(AnimationStatus::Finished)
            && let Some(handle) = self.state_animation
        {
            self.events.emit(PresenterEvent::AnimationFinished(handle));
        }
        status
    }

    /// Applies gesture deltas to the globe root, interrupting any root
    /// animation.
    pub fn apply_gesture(&mut self, delta: GestureDelta) -> bool {
        self.root_animator.cancel();
        let Some(current) = self.world.transform(self.globe.root) else {
            return false;
        };
        let next = Transform {
            translation: current.translation + delta.translation.unwrap_or(Vec3::ZERO),
            rotation: delta
                .rotation
                .map(|r| (r * current.rotation).normalize())
                .unwrap_or(current.rotation),
            scale: current.scale * delta.scale.unwrap_or(1.0),
        };
        self.world.set_transform(self.globe.root, next)
    }

    pub fn animate_gesture_root(
        &mut self,
        target: TransformTarget,
        duration_s: f64,
    ) -> AnimationHandle {
        self.root_animator
            .animate_to(&mut self.world, target, duration_s)
    }

    /// Distance from the camera to the globe surface, using the scaled radius.
    pub fn globe_distance_to_camera(&self) -> Result<f64, StoryError> {
        let camera = self
            .camera
            .camera_position()
            .ok_or(StoryError::CameraUnavailable)?;
        let globe = self
            .world
            .world_transform(self.globe.state)
            .unwrap_or_default();
        Ok(camera.distance(globe.translation) - self.config.globe_radius * globe.scale)
    }

    /// Animates the globe root so the globe surface ends up `distance` from
    /// the camera, along the line from the camera to the globe center.
    ///
    /// Returns `None` when no camera position is known.
    pub fn move_globe_toward_camera(
        &mut self,
        distance: f64,
        duration_s: f64,
    ) -> Option<AnimationHandle> {
        let Some(camera) = self.camera.camera_position() else {
            debug!("no camera position, globe not moved");
            return None;
        };
        let root = self.world.transform(self.globe.root)?;
        let globe = self.world.world_transform(self.globe.state)?;
        let scaled_radius = self.config.globe_radius * globe.scale;

        let toward_camera = direction_to_camera(&*self.camera, globe.translation);
        let center = camera - toward_camera * (distance + scaled_radius);
        let target = TransformTarget::position(root.translation + (center - globe.translation));
        Some(self.animate_gesture_root(target, duration_s))
    }

    /// Loads needed for placed annotations that have no model yet.
    ///
    /// Markers whose last load failed are skipped until the next selection.
    pub fn model_load_requests(&self) -> Vec<ModelLoadRequest> {
        self.placed
            .iter()
            .filter(|(_, placed)| {
                !placed.load_failed
                    && !self
                        .world
                        .drawable_3d(placed.entity)
                        .is_some_and(|d| d.is_model())
            })
            .filter_map(|(id, placed)| {
                Some(ModelLoadRequest {
                    annotation: *id,
                    source: placed.model.clone()?,
                    token: self.loads.token(),
                })
            })
            .collect()
    }

    /// Applies a finished load.
    ///
    /// Returns `Ok(true)` when the model was attached and `Ok(false)` when
    /// the result was dropped because another node was selected meanwhile
    /// or the annotation's model changed.
    pub fn complete_model_load(
        &mut self,
        request: &ModelLoadRequest,
        result: Result<ModelResource, ResourceError>,
    ) -> Result<bool, StoryError> {
        if request.token.is_cancelled() {
            debug!(
                annotation = %request.annotation,
                generation = request.token.generation(),
                "dropping stale model load"
            );
            return Ok(false);
        }

        let Some(placed) = self.placed.get_mut(&request.annotation) else {
            return Ok(false);
        };
        if placed.model.as_ref() != Some(&request.source) {
            debug!(annotation = %request.annotation, "dropping load of replaced model");
            return Ok(false);
        }

        let model = match result {
            Ok(model) => model,
            Err(source) => {
                placed.load_failed = true;
                warn!(annotation = %request.annotation, "model load failed: {source}");
                let err = StoryError::ResourceLoadFailed {
                    annotation: request.annotation,
                    source,
                };
                self.events.emit(PresenterEvent::Alert(err.to_string()));
                return Err(err);
            }
        };

        if !self.world.set_drawable_3d(placed.entity, Drawable3D::model(model)) {
            return Ok(false);
        }
        self.events
            .emit(PresenterEvent::ModelLoaded(request.annotation));
        Ok(true)
    }

    pub fn drain_events(&mut self) -> Vec<Event<PresenterEvent>> {
        self.events.drain()
    }
}
