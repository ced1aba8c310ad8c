//! Single-slot transform animation for one entity.
//!
//! The animator owns at most one in-flight animation. Starting a new one
//! cancels the previous one (last caller wins); nothing is ever queued.
//! Animations advance only when the host calls [`TransformAnimator::update`]
//! from its frame loop, so all mutation happens on the caller's thread.

use std::collections::VecDeque;

use foundation::math::{Quat, Vec3};
use runtime::Frame;
use tracing::debug;

use crate::World;
use crate::components::Transform;
use crate::entity::EntityId;

/// Transforms closer than this are treated as equal when deciding to snap.
const SNAP_EPSILON: f64 = 1e-9;

/// Settled animations remembered for [`TransformAnimator::status`].
const STATUS_HISTORY_SIZE: usize = 16;

/// Sparse animation target; unset fields keep the entity's current value.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TransformTarget {
    pub position: Option<Vec3>,
    pub orientation: Option<Quat>,
    pub scale: Option<f64>,
}

impl TransformTarget {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn orientation(orientation: Quat) -> Self {
        Self {
            orientation: Some(orientation),
            ..Self::default()
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    /// Fills unset fields from `current`.
    pub fn resolve(&self, current: Transform) -> Transform {
        Transform {
            translation: self.position.unwrap_or(current.translation),
            rotation: self.orientation.unwrap_or(current.rotation),
            scale: self.scale.unwrap_or(current.scale),
        }
    }
}

impl From<Transform> for TransformTarget {
    fn from(t: Transform) -> Self {
        Self {
            position: Some(t.translation),
            orientation: Some(t.rotation),
            scale: Some(t.scale),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnimationStatus {
    /// In flight; the entity moves on every `update`.
    Running,
    /// Applied synchronously without animating.
    Applied,
    /// Reached its target.
    Finished,
    /// Replaced by a newer animation or cancelled explicitly.
    Cancelled,
    /// Too old to be remembered.
    Unknown,
}

/// Ease-in-out timing, matching the host engine's default curve.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    handle: AnimationHandle,
    from: Transform,
    to: Transform,
    duration_s: f64,
    elapsed_s: f64,
}

#[derive(Debug)]
pub struct TransformAnimator {
    entity: EntityId,
    next_id: u64,
    active: Option<ActiveAnimation>,
    settled: VecDeque<(AnimationHandle, AnimationStatus)>,
}

impl TransformAnimator {
    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            next_id: 0,
            active: None,
            settled: VecDeque::with_capacity(STATUS_HISTORY_SIZE),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Starts animating toward `target`, replacing any in-flight animation.
    ///
    /// Applies the target immediately when it equals the current transform,
    /// when `duration_s` is not positive, or when the entity is gone (then
    /// nothing happens and the handle reports `Cancelled`).
    pub fn animate_to(
        &mut self,
        world: &mut World,
        target: TransformTarget,
        duration_s: f64,
    ) -> AnimationHandle {
        // Cancel before checking playback state so the old slot is never observed.
        self.cancel();

        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;

        let Some(current) = world.transform(self.entity) else {
            debug!(entity = ?self.entity, "animation target entity is gone");
            self.settle(handle, AnimationStatus::Cancelled);
            return handle;
        };

        let to = target.resolve(current);
        let playing = duration_s > 0.0 && !current.approx_eq(&to, SNAP_EPSILON);
        if !playing {
            world.set_transform(self.entity, to);
            self.settle(handle, AnimationStatus::Applied);
            return handle;
        }

        debug!(entity = ?self.entity, handle = handle.0, duration_s, "animation started");
        self.active = Some(ActiveAnimation {
            handle,
            from: current,
            to,
            duration_s,
            elapsed_s: 0.0,
        });
        handle
    }

    /// Sets the transform directly, cancelling any in-flight animation.
    pub fn apply_immediately(
        &mut self,
        world: &mut World,
        target: TransformTarget,
    ) -> AnimationHandle {
        self.animate_to(world, target, 0.0)
    }

    /// Advances the in-flight animation by `frame.dt_s`.
    ///
    /// Returns the status of the animation that was in flight, or `None`
    /// when idle.
    pub fn update(&mut self, world: &mut World, frame: Frame) -> Option<AnimationStatus> {
        let mut anim = self.active.take()?;
        anim.elapsed_s += frame.dt_s;
        let t = (anim.elapsed_s / anim.duration_s).min(1.0);

        if t >= 1.0 {
            let applied = world.set_transform(self.entity, anim.to);
            let status = if applied {
                AnimationStatus::Finished
            } else {
                AnimationStatus::Cancelled
            };
            self.settle(anim.handle, status);
            return Some(status);
        }

        let step = anim.from.interpolate(&anim.to, ease_in_out(t));
        if !world.set_transform(self.entity, step) {
            self.settle(anim.handle, AnimationStatus::Cancelled);
            return Some(AnimationStatus::Cancelled);
        }
        self.active = Some(anim);
        Some(AnimationStatus::Running)
    }

    /// Stops the in-flight animation where it is. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        let Some(prev) = self.active.take() else {
            return false;
        };
        debug!(entity = ?self.entity, handle = prev.handle.0, "animation cancelled");
        self.settle(prev.handle, AnimationStatus::Cancelled);
        true
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Destination of the in-flight animation.
    pub fn target(&self) -> Option<Transform> {
        self.active.as_ref().map(|a| a.to)
    }

    pub fn status(&self, handle: AnimationHandle) -> AnimationStatus {
        if self.active.as_ref().is_some_and(|a| a.handle == handle) {
            return AnimationStatus::Running;
        }
        self.settled
            .iter()
            .rev()
            .find(|(h, _)| *h == handle)
            .map(|(_, s)| *s)
            .unwrap_or(AnimationStatus::Unknown)
    }

    fn settle(&mut self, handle: AnimationHandle, status: AnimationStatus) {
        self.settled.push_back((handle, status));
        if self.settled.len() > STATUS_HISTORY_SIZE {
            self.settled.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimationStatus, TransformAnimator, TransformTarget, ease_in_out};
    use crate::World;
    use crate::components::Transform;
    use foundation::math::{Angle, Quat, Vec3};
    use runtime::Frame;

    fn setup() -> (World, TransformAnimator) {
        let mut world = World::new();
        let entity = world.spawn("globe");
        (world, TransformAnimator::new(entity))
    }

    fn run_for(world: &mut World, animator: &mut TransformAnimator, seconds: f64, dt: f64) {
        let mut frame = Frame::first();
        let mut t = 0.0;
        while t < seconds {
            frame = frame.advance(dt);
            animator.update(world, frame);
            t += dt;
        }
    }

    #[test]
    fn easing_is_monotonic_with_fixed_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn unset_fields_keep_current_values() {
        let (mut world, mut animator) = setup();
        let entity = animator.entity();
        world.set_transform(
            entity,
            Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, 4.0),
        );

        animator.animate_to(&mut world, TransformTarget::scale(2.0), 1.0);
        run_for(&mut world, &mut animator, 1.5, 0.1);

        let t = world.transform(entity).expect("alive");
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, 2.0);
        assert!(!animator.is_playing());
    }

    #[test]
    fn animation_reaches_target_exactly() {
        let (mut world, mut animator) = setup();
        let target = Transform::new(
            Vec3::new(0.0, 1.0, -1.0),
            Quat::from_axis_angle(Vec3::UP, Angle::from_degrees(120.0)),
            0.5,
        );
        let handle = animator.animate_to(&mut world, target.into(), 2.0);
        assert_eq!(animator.status(handle), AnimationStatus::Running);

        run_for(&mut world, &mut animator, 1.0, 0.25);
        let halfway = world.transform(animator.entity()).expect("alive");
        assert!(halfway.translation.approx_eq(Vec3::new(0.0, 0.5, -0.5), 1e-9));

        run_for(&mut world, &mut animator, 1.5, 0.25);
        assert_eq!(world.transform(animator.entity()), Some(target));
        assert_eq!(animator.status(handle), AnimationStatus::Finished);
    }

    #[test]
    fn new_animation_cancels_in_flight_one() {
        let (mut world, mut animator) = setup();
        let first = animator.animate_to(
            &mut world,
            TransformTarget::position(Vec3::new(10.0, 0.0, 0.0)),
            1.0,
        );
        run_for(&mut world, &mut animator, 0.5, 0.25);

        let second = animator.animate_to(
            &mut world,
            TransformTarget::position(Vec3::new(0.0, 0.0, 5.0)),
            1.0,
        );
        assert_eq!(animator.status(first), AnimationStatus::Cancelled);
        assert_eq!(animator.status(second), AnimationStatus::Running);

        run_for(&mut world, &mut animator, 2.0, 0.25);
        let t = world.transform(animator.entity()).expect("alive");
        assert_eq!(t.translation, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn no_op_target_is_applied_synchronously() {
        let (mut world, mut animator) = setup();
        let handle = animator.animate_to(&mut world, TransformTarget::scale(1.0), 2.0);
        assert_eq!(animator.status(handle), AnimationStatus::Applied);
        assert!(!animator.is_playing());
    }

    #[test]
    fn zero_duration_snaps() {
        let (mut world, mut animator) = setup();
        let handle = animator.animate_to(
            &mut world,
            TransformTarget::position(Vec3::new(1.0, 0.0, 0.0)),
            0.0,
        );
        assert_eq!(animator.status(handle), AnimationStatus::Applied);
        assert_eq!(
            world.transform(animator.entity()).map(|t| t.translation),
            Some(Vec3::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn despawned_entity_cancels_animation() {
        let (mut world, mut animator) = setup();
        let handle = animator.animate_to(&mut world, TransformTarget::scale(3.0), 1.0);
        world.despawn(animator.entity());
        assert_eq!(
            animator.update(&mut world, Frame::first().advance(0.1)),
            Some(AnimationStatus::Cancelled)
        );
        assert_eq!(animator.status(handle), AnimationStatus::Cancelled);
        assert_eq!(animator.update(&mut world, Frame::first()), None);
    }

    #[test]
    fn cancel_leaves_entity_mid_flight() {
        let (mut world, mut animator) = setup();
        animator.animate_to(
            &mut world,
            TransformTarget::position(Vec3::new(4.0, 0.0, 0.0)),
            1.0,
        );
        run_for(&mut world, &mut animator, 0.5, 0.25);
        assert!(animator.cancel());
        assert!(!animator.cancel());

        let x = world.transform(animator.entity()).expect("alive").translation.x;
        assert!(x > 0.0 && x < 4.0);
    }
}
