//! Root engine state and per-frame orchestration.
//!
//! [`SceneEngine`] owns every subsystem and runs the one-way frame
//! flow: pick handling, entity reconciliation, coverage orientation,
//! placement updates when the coverage direction changed, then label
//! rescaling against the current camera. All of it is synchronous and
//! completes within the tick; the only asynchronous boundary is the
//! terrain channel, polled non-blockingly here.

use glam::{Vec2, Vec3};

use crate::config::EngineConfig;
use crate::coverage::CoverageVolume;
use crate::geo::GeoOrigin;
use crate::ground::{GroundPlacement, RangeRings};
use crate::labels::LabelRegistry;
use crate::scene::{Camera, NodeId, OrbitController, Ray, SceneGraph, TextRasterizer};
use crate::terrain::{HeightfieldSource, TerrainChannel, TerrainField};
use crate::track::{EntityReconciler, TrackedEntity};
use crate::view::FixedViewpoint;

/// Whole-value input for one frame.
///
/// All fields arrive as complete replacements, already serialized by
/// the host; angles in degrees, distances in meters.
#[derive(Debug, Clone)]
pub struct FrameInput<'a> {
    /// Local frame origin; `None` means no frame yet and clears tracks
    pub origin: Option<GeoOrigin>,
    /// Current tracked-entity set (order irrelevant, keyed by id)
    pub entities: &'a [TrackedEntity],
    pub coverage_azimuth_deg: f32,
    pub coverage_elevation_deg: f32,
    /// Pointer pick for this tick, in normalized device coordinates
    pub pointer_pick: Option<Vec2>,
}

/// The engine: every subsystem plus the scene they populate.
///
/// Single-threaded and frame-driven; the host calls [`update`] once
/// per render tick and then draws the scene.
///
/// [`update`]: SceneEngine::update
pub struct SceneEngine {
    config: EngineConfig,
    scene: SceneGraph,
    labels: LabelRegistry,
    reconciler: EntityReconciler,
    coverage: CoverageVolume,
    ground: GroundPlacement,
    rings: RangeRings,
    terrain: TerrainField,
    terrain_channel: TerrainChannel,
    viewpoint: FixedViewpoint,
    rasterizer: Box<dyn TextRasterizer>,
    /// Marker at the local origin; picking it toggles the viewpoint
    origin_marker: NodeId,
    last_direction: Vec3,
}

impl SceneEngine {
    pub fn new(config: EngineConfig, rasterizer: Box<dyn TextRasterizer>) -> Self {
        let mut scene = SceneGraph::new();
        let mut labels = LabelRegistry::new();

        let reconciler = EntityReconciler::new(config.track.clone());
        let coverage = CoverageVolume::new(&mut scene, config.coverage.clone());
        let ground = GroundPlacement::new(&mut scene, config.ground.clone());
        let mut rings =
            RangeRings::new(&mut scene, &mut labels, rasterizer.as_ref(), config.rings.clone());
        // Rings must start with the ground footprint planes; the
        // per-frame adoption only runs when the direction changes.
        rings.set_clip_planes(ground.clip_planes());
        let terrain = TerrainField::new(&mut scene, config.ground.size_m, config.terrain.clone());

        let origin_marker = scene.create_node("origin_marker");
        let marker_geometry = scene.alloc_geometry();
        if let Some(node) = scene.node_mut(origin_marker) {
            node.geometry = Some(marker_geometry);
        }

        let viewpoint = FixedViewpoint::new(config.view.clone());
        let last_direction = coverage.direction();

        Self {
            config,
            scene,
            labels,
            reconciler,
            coverage,
            ground,
            rings,
            terrain,
            terrain_channel: TerrainChannel::new(),
            viewpoint,
            rasterizer,
            origin_marker,
            last_direction,
        }
    }

    /// Runs one frame of the engine.
    ///
    /// The camera and controller belong to the host; the engine reads
    /// the camera pose for picking and label sizing, and writes both
    /// when the fixed viewpoint toggles.
    pub fn update(
        &mut self,
        input: &FrameInput,
        camera: &mut Camera,
        controller: &mut OrbitController,
    ) {
        if let Some(ndc) = input.pointer_pick {
            let ray = Ray::from_camera(camera, ndc);
            let marker = self.scene.world_position(self.origin_marker);
            if ray
                .intersect_sphere(marker, self.config.view.marker_radius_m)
                .is_some()
            {
                self.viewpoint
                    .toggle(camera, controller, self.coverage.direction());
            }
        }

        self.reconciler.sync(
            input.origin.as_ref(),
            input.entities,
            &mut self.scene,
            &mut self.labels,
            self.rasterizer.as_ref(),
        );

        self.coverage.set_orientation(
            &mut self.scene,
            input.coverage_azimuth_deg,
            input.coverage_elevation_deg,
        );

        let direction = self.coverage.direction();
        if (direction - self.last_direction).length_squared() > 1e-12 {
            self.ground.update(&mut self.scene, direction);
            self.rings.set_clip_planes(self.ground.clip_planes());
            self.rings.update_label_positions(&mut self.scene, direction);
            self.last_direction = direction;
        }

        if let Some(result) = self.terrain_channel.try_recv() {
            match result {
                Ok(grid) => {
                    if let Err(e) = self.terrain.bind(&grid) {
                        log::warn!("SceneEngine: terrain bind failed: {e}");
                    }
                }
                Err(e) => log::warn!("SceneEngine: terrain load failed: {e}"),
            }
        }

        self.labels.update(&mut self.scene, camera, &self.config.labels);
    }

    /// Starts a one-shot asynchronous heightfield load.
    ///
    /// The decoded grid is bound on the first `update` after the
    /// worker finishes. A second load before the first resolves is a
    /// caller error and is not guarded against.
    pub fn request_terrain<S>(&mut self, source: S)
    where
        S: HeightfieldSource + 'static,
    {
        self.terrain_channel.load(
            source,
            self.config.terrain.samples_per_side,
            self.config.ground.size_m,
        );
    }

    /// Releases everything: all actors, overlays, terrain, labels.
    pub fn dispose(&mut self) {
        log::debug!("SceneEngine: disposing scene");
        self.reconciler.clear(&mut self.scene, &mut self.labels);
        self.labels.clear();
        self.scene.clear();
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn reconciler(&self) -> &EntityReconciler {
        &self.reconciler
    }

    pub fn coverage(&self) -> &CoverageVolume {
        &self.coverage
    }

    pub fn ground(&self) -> &GroundPlacement {
        &self.ground
    }

    pub fn rings(&self) -> &RangeRings {
        &self.rings
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn terrain_mut(&mut self) -> &mut TerrainField {
        &mut self.terrain
    }

    pub fn viewpoint(&self) -> &FixedViewpoint {
        &self.viewpoint
    }

    pub fn origin_marker(&self) -> NodeId {
        self.origin_marker
    }
}
