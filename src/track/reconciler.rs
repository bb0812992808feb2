//! Entity-to-actor reconciliation.
//!
//! `sync` is the single entry point: given the origin and the current
//! entity list it brings the actor map into agreement, creating
//! actors for new ids, moving live ones, and disposing those whose id
//! vanished or whose position fell outside the visibility radius.
//! Processing is keyed by id, so input order never affects the result
//! and repeated identical input is a no-op.

use crate::config::TrackConfig;
use crate::geo::{local_position, GeoOrigin};
use crate::labels::{LabelId, LabelRegistry};
use crate::scene::{NodeId, SceneGraph, TextRasterizer};
use glam::{Quat, Vec3};
use std::collections::{HashMap, HashSet};

use super::entity::TrackedEntity;

/// Scene subtree backing one tracked entity.
///
/// A typed side-table entry: the reconciler owns these exclusively and
/// never hangs ad hoc state off scene nodes. The `group` node carries
/// the world position; body rotation and the altitude sub-visuals hang
/// beneath it.
#[derive(Debug)]
pub struct ActorState {
    /// Unrotated carrier at the entity's local position
    pub group: NodeId,
    /// Body mesh, yawed to the entity heading
    pub body: NodeId,
    /// Id label billboard above the body
    pub label: NodeId,
    /// Vertical stem from the body down to ground level
    pub stem: NodeId,
    /// Ground-contact ring at y = 0 beneath the body
    pub ground_ring: NodeId,
    label_id: LabelId,
}

/// Keeps the live actor set in sync with the incoming entity list.
#[derive(Debug)]
pub struct EntityReconciler {
    actors: HashMap<String, ActorState>,
    config: TrackConfig,
}

impl EntityReconciler {
    pub fn new(config: TrackConfig) -> Self {
        Self {
            actors: HashMap::new(),
            config,
        }
    }

    /// Reconciles the actor set against `entities`.
    ///
    /// With no origin there is no local frame: every actor is disposed
    /// and the map cleared. Otherwise entities without a position are
    /// skipped for this cycle, entities beyond the configured maximum
    /// horizontal radius are culled (including previously live ones),
    /// and the survivors are created or updated in place.
    pub fn sync(
        &mut self,
        origin: Option<&GeoOrigin>,
        entities: &[TrackedEntity],
        scene: &mut SceneGraph,
        labels: &mut LabelRegistry,
        rasterizer: &dyn TextRasterizer,
    ) {
        let Some(origin) = origin else {
            self.clear(scene, labels);
            return;
        };

        let mut survivors: HashSet<&str> = HashSet::with_capacity(entities.len());

        for entity in entities {
            let Some(coord) = entity.position else {
                continue;
            };

            let position = local_position(coord, entity.alt_m, origin, self.config.vertical_scale);
            let radius = position.x.hypot(position.z);
            if (radius as f64) > self.config.max_radius_m {
                // Visibility culling, not an error. If the id is live it
                // falls out of the survivor set and is removed below.
                continue;
            }

            survivors.insert(entity.id.as_str());

            if !self.actors.contains_key(&entity.id) {
                let actor = self.spawn_actor(entity, scene, labels, rasterizer);
                log::debug!("EntityReconciler: created actor for {}", entity.id);
                self.actors.insert(entity.id.clone(), actor);
            }

            if let Some(actor) = self.actors.get(&entity.id) {
                Self::update_actor(actor, entity, position, &self.config, scene);
            }
        }

        // Remove actors whose id did not survive this cycle.
        let stale: Vec<String> = self
            .actors
            .keys()
            .filter(|id| !survivors.contains(id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            if let Some(actor) = self.actors.remove(&id) {
                log::debug!("EntityReconciler: removing actor for {}", id);
                labels.remove(actor.label_id);
                scene.dispose(actor.group);
            }
        }
    }

    /// Disposes every live actor and clears the map.
    pub fn clear(&mut self, scene: &mut SceneGraph, labels: &mut LabelRegistry) {
        if self.actors.is_empty() {
            return;
        }
        log::debug!("EntityReconciler: clearing {} actors", self.actors.len());
        for (_, actor) in self.actors.drain() {
            labels.remove(actor.label_id);
            scene.dispose(actor.group);
        }
    }

    pub fn actor(&self, id: &str) -> Option<&ActorState> {
        self.actors.get(id)
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = &str> {
        self.actors.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    fn spawn_actor(
        &self,
        entity: &TrackedEntity,
        scene: &mut SceneGraph,
        labels: &mut LabelRegistry,
        rasterizer: &dyn TextRasterizer,
    ) -> ActorState {
        let group = scene.create_node(&format!("track:{}", entity.id));

        let body = scene.create_child(group, "body");
        let body_geometry = scene.alloc_geometry();
        if let Some(node) = scene.node_mut(body) {
            node.geometry = Some(body_geometry);
        }

        let label = scene.create_child(group, "label");
        let label_texture = rasterizer.rasterize(&entity.id, scene);
        let label_geometry = scene.alloc_geometry();
        if let Some(node) = scene.node_mut(label) {
            node.geometry = Some(label_geometry);
            node.texture = Some(label_texture.texture);
            node.position = Vec3::new(0.0, self.config.label_offset_m, 0.0);
        }
        let label_id = labels.register(label, self.config.label_size_multiplier, label_texture.aspect);

        let stem = scene.create_child(group, "stem");
        let stem_geometry = scene.alloc_geometry();
        if let Some(node) = scene.node_mut(stem) {
            node.geometry = Some(stem_geometry);
        }

        let ground_ring = scene.create_child(group, "ground_ring");
        let ring_geometry = scene.alloc_geometry();
        if let Some(node) = scene.node_mut(ground_ring) {
            node.geometry = Some(ring_geometry);
            node.scale = Vec3::splat(self.config.ground_ring_radius_m);
        }

        ActorState {
            group,
            body,
            label,
            stem,
            ground_ring,
            label_id,
        }
    }

    fn update_actor(
        actor: &ActorState,
        entity: &TrackedEntity,
        position: Vec3,
        config: &TrackConfig,
        scene: &mut SceneGraph,
    ) {
        if let Some(group) = scene.node_mut(actor.group) {
            group.position = position;
        }

        // Headings are clockwise from north; scene yaw about +Y is
        // counter-clockwise, hence the sign flip. A missing heading
        // leaves the previous orientation untouched.
        if let Some(heading) = entity.heading_deg {
            let yaw = (-heading.to_radians()) as f32;
            if let Some(body) = scene.node_mut(actor.body) {
                body.rotation = Quat::from_rotation_y(yaw);
            }
        }

        // The stem spans exactly from the body down to ground level;
        // the ring sits directly beneath at y = 0. Both hide at or
        // below ground.
        let span = (entity.alt_m * config.vertical_scale) as f32;
        let airborne = entity.alt_m > 0.0;
        if let Some(stem) = scene.node_mut(actor.stem) {
            stem.visible = airborne;
            if airborne {
                stem.position = Vec3::new(0.0, -span / 2.0, 0.0);
                stem.scale = Vec3::new(1.0, span, 1.0);
            }
        }
        if let Some(ring) = scene.node_mut(actor.ground_ring) {
            ring.visible = airborne;
            if airborne {
                ring.position = Vec3::new(0.0, -span, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GlyphMetricsRasterizer;

    struct Fixture {
        scene: SceneGraph,
        labels: LabelRegistry,
        reconciler: EntityReconciler,
        rasterizer: GlyphMetricsRasterizer,
        origin: GeoOrigin,
    }

    fn fixture() -> Fixture {
        Fixture {
            scene: SceneGraph::new(),
            labels: LabelRegistry::new(),
            reconciler: EntityReconciler::new(TrackConfig::default()),
            rasterizer: GlyphMetricsRasterizer::default(),
            origin: GeoOrigin::new(32.0853, 34.7818, 0.0),
        }
    }

    impl Fixture {
        fn sync(&mut self, entities: &[TrackedEntity]) {
            self.reconciler.sync(
                Some(&self.origin),
                entities,
                &mut self.scene,
                &mut self.labels,
                &self.rasterizer,
            );
        }
    }

    fn near(id: &str, east_offset_deg: f64) -> TrackedEntity {
        TrackedEntity::new(id, 32.0853, 34.7818 + east_offset_deg)
    }

    #[test]
    fn test_membership_follows_input_set() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01), near("B", 0.02), near("C", 0.03)]);
        assert_eq!(f.reconciler.len(), 3);

        f.sync(&[near("B", 0.02), near("C", 0.03)]);
        let mut ids: Vec<&str> = f.reconciler.actor_ids().collect();
        ids.sort();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn test_removed_actor_releases_resources() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01)]);
        let with_actor = (f.scene.live_geometries(), f.scene.live_textures());
        assert!(with_actor.0 > 0 && with_actor.1 > 0);

        f.sync(&[]);
        assert_eq!(f.scene.live_geometries(), 0);
        assert_eq!(f.scene.live_textures(), 0);
        assert_eq!(f.scene.node_count(), 0);
        assert!(f.labels.is_empty());
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut f = fixture();
        let entities = vec![near("A", 0.01).with_altitude(5_000.0).with_heading(90.0)];
        f.sync(&entities);
        let group = f.reconciler.actor("A").unwrap().group;
        let first = f.scene.node(group).unwrap().position;
        let nodes = f.scene.node_count();

        f.sync(&entities);
        let actor = f.reconciler.actor("A").unwrap();
        assert_eq!(actor.group, group);
        assert_eq!(f.scene.node(group).unwrap().position, first);
        assert_eq!(f.scene.node_count(), nodes);
    }

    #[test]
    fn test_null_origin_clears_everything() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01), near("B", 0.02)]);
        assert_eq!(f.reconciler.len(), 2);

        let entities = vec![near("A", 0.01)];
        f.reconciler.sync(
            None,
            &entities,
            &mut f.scene,
            &mut f.labels,
            &f.rasterizer,
        );
        assert!(f.reconciler.is_empty());
        assert_eq!(f.scene.node_count(), 0);
        assert_eq!(f.scene.live_geometries(), 0);
    }

    #[test]
    fn test_out_of_range_entity_is_culled() {
        let mut f = fixture();
        // ~5 degrees of longitude is ~470 km east, past the 300 km cap.
        f.sync(&[near("FAR", 5.0)]);
        assert!(f.reconciler.actor("FAR").is_none());
    }

    #[test]
    fn test_moving_out_of_range_removes_live_actor() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01)]);
        assert!(f.reconciler.actor("A").is_some());

        f.sync(&[near("A", 5.0)]);
        assert!(f.reconciler.actor("A").is_none());
        assert_eq!(f.scene.live_geometries(), 0);
    }

    #[test]
    fn test_entity_without_position_is_skipped() {
        let mut f = fixture();
        let mut entity = near("A", 0.01);
        entity.position = None;
        f.sync(&[entity]);
        assert!(f.reconciler.is_empty());

        // Valid again next cycle: reappears.
        f.sync(&[near("A", 0.01)]);
        assert!(f.reconciler.actor("A").is_some());
    }

    #[test]
    fn test_heading_sets_negated_yaw() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01).with_heading(90.0)]);
        let body = f.reconciler.actor("A").unwrap().body;
        let rotation = f.scene.node(body).unwrap().rotation;
        let expected = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        assert!(rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn test_missing_heading_keeps_previous_yaw() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01).with_heading(45.0)]);
        let body = f.reconciler.actor("A").unwrap().body;
        let set = f.scene.node(body).unwrap().rotation;

        f.sync(&[near("A", 0.02)]);
        assert_eq!(f.scene.node(body).unwrap().rotation, set);
    }

    #[test]
    fn test_altitude_stem_and_ring() {
        let mut f = fixture();
        f.sync(&[near("A", 0.01).with_altitude(8_000.0)]);
        let actor = f.reconciler.actor("A").unwrap();
        let stem = f.scene.node(actor.stem).unwrap();
        assert!(stem.visible);
        assert_eq!(stem.scale.y, 8_000.0);
        assert_eq!(stem.position.y, -4_000.0);
        let ring = f.scene.node(actor.ground_ring).unwrap();
        assert!(ring.visible);
        // Ring lands at world y = 0 under the body.
        assert_eq!(f.scene.world_position(actor.ground_ring).y, 0.0);

        // On the deck: both sub-visuals hide.
        f.sync(&[near("A", 0.01).with_altitude(0.0)]);
        let actor = f.reconciler.actor("A").unwrap();
        assert!(!f.scene.node(actor.stem).unwrap().visible);
        assert!(!f.scene.node(actor.ground_ring).unwrap().visible);
    }
}
