use crate::instance::MeshInstance;
use crate::lighting::Lighting;
use crate::maze::{Cell, MazeLayout};
use crate::mesh::{CubeFace, FaceSet};
use cubewalk_camera::{CameraState, MovementMode};
use cubewalk_common::InstanceTransform;
use glam::Vec3;

/// World-space edge length of one maze cell (one full cube).
pub const MAZE_CELL_SIZE: f32 = 2.0;
pub const MAZE_WALL_HEIGHT: f32 = 2.0;
pub const MAZE_EYE_HEIGHT: f32 = 1.0;

const EXIT_TINT: [f32; 4] = [0.4, 1.0, 0.4, 1.0];

/// Where and how the camera starts in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraStart {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub mode: MovementMode,
}

impl Default for CameraStart {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            mode: MovementMode::Fly,
        }
    }
}

/// A fixed table of cube instances plus how to light and view it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub name: String,
    pub instances: Vec<MeshInstance>,
    /// `None` renders unlit (texture times vertex color).
    pub lighting: Option<Lighting>,
    pub clear_color: [f32; 4],
    pub start: CameraStart,
}

impl Scene {
    pub fn new(name: impl Into<String>, instances: Vec<MeshInstance>) -> Self {
        Self {
            name: name.into(),
            instances,
            lighting: None,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            start: CameraStart::default(),
        }
    }

    /// Four floating cubes with fixed tilts, a floor plane and a wall panel.
    pub fn floating_cubes() -> Self {
        let instances = vec![
            MeshInstance::new(
                "cube-near",
                InstanceTransform::at(Vec3::new(0.5, 0.0, -1.0))
                    .with_uniform_scale(0.3)
                    .with_rotation(Vec3::new(0.0, 1.0, 1.0), 0.5),
            ),
            MeshInstance::new(
                "cube-high",
                InstanceTransform::at(Vec3::new(-1.5, 1.5, -1.0))
                    .with_uniform_scale(0.2)
                    .with_rotation(Vec3::new(0.0, 1.0, 1.0), -1.0),
            ),
            MeshInstance::new(
                "cube-small",
                InstanceTransform::at(Vec3::new(0.0, 0.0, -1.5))
                    .with_uniform_scale(0.1)
                    .with_rotation(Vec3::new(-1.0, 0.0, 1.0), -13.0)
                    .with_offset(Vec3::new(0.0, 1.5, 0.0)),
            ),
            // Top face lands on y = -1.
            MeshInstance::new(
                "floor",
                InstanceTransform::at(Vec3::new(0.0, -2.0, 0.0))
                    .with_scale(Vec3::new(10.0, 1.0, 10.0)),
            )
            .with_faces(FaceSet::only(CubeFace::Top)),
            MeshInstance::new(
                "cube-far",
                InstanceTransform::at(Vec3::new(3.0, -1.0, -3.0))
                    .with_uniform_scale(0.6)
                    .with_rotation(Vec3::new(1.0, 0.0, 1.0), 3.0),
            ),
            MeshInstance::new(
                "panel",
                InstanceTransform::at(Vec3::new(0.0, 1.0, -10.0))
                    .with_scale(Vec3::new(1.0, 2.0, 2.0)),
            )
            .with_faces(FaceSet::only(CubeFace::Right)),
        ];
        Self::new("cubes", instances)
    }

    /// Walls and floor tiles for `layout`, lit by a light above its center.
    pub fn maze(layout: &MazeLayout) -> Self {
        let half_cell = MAZE_CELL_SIZE / 2.0;
        let wall_scale = Vec3::new(half_cell, MAZE_WALL_HEIGHT / 2.0, half_cell);
        let tile_scale = Vec3::new(half_cell, 1.0, half_cell);

        let mut instances = Vec::with_capacity(layout.rows() * layout.cols());
        for ((row, col), cell) in layout.cells() {
            let center = layout.cell_center(row, col, MAZE_CELL_SIZE);
            let instance = match cell {
                Cell::Wall => MeshInstance::new(
                    format!("wall r{row}c{col}"),
                    InstanceTransform::at(center + Vec3::Y * (MAZE_WALL_HEIGHT / 2.0))
                        .with_scale(wall_scale),
                )
                .with_faces(FaceSet::SIDES.with(CubeFace::Top)),
                Cell::Floor | Cell::Start | Cell::Exit => {
                    // Tile cube sits below the floor so only its top face shows at y = 0.
                    let tile = MeshInstance::new(
                        format!("floor r{row}c{col}"),
                        InstanceTransform::at(center - Vec3::Y).with_scale(tile_scale),
                    )
                    .with_faces(FaceSet::only(CubeFace::Top));
                    if cell == Cell::Exit {
                        tile.with_tint(EXIT_TINT)
                    } else {
                        tile
                    }
                }
            };
            instances.push(instance);
        }

        let far_corner = layout.cell_center(
            layout.rows().saturating_sub(1),
            layout.cols().saturating_sub(1),
            MAZE_CELL_SIZE,
        );
        let light_pos = far_corner / 2.0 + Vec3::Y * (MAZE_WALL_HEIGHT * 3.0);

        let (start_row, start_col) = layout.start();
        let start = CameraStart {
            position: layout.cell_center(start_row, start_col, MAZE_CELL_SIZE)
                + Vec3::Y * MAZE_EYE_HEIGHT,
            yaw: layout.start_yaw(),
            pitch: 0.0,
            mode: MovementMode::Walk,
        };

        tracing::debug!(
            "maze scene: {}x{} cells, {} walls, light at {light_pos}",
            layout.rows(),
            layout.cols(),
            layout.wall_count()
        );

        Self {
            name: "maze".into(),
            instances,
            lighting: Some(Lighting::at(light_pos)),
            clear_color: [0.05, 0.05, 0.08, 1.0],
            start,
        }
    }

    /// A fresh camera at this scene's start.
    pub fn camera(&self) -> CameraState {
        CameraState::new(self.start.position, self.start.yaw, self.start.pitch)
            .with_mode(self.start.mode)
    }

    pub fn is_lit(&self) -> bool {
        self.lighting.is_some()
    }

    /// Total faces drawn per frame.
    pub fn face_count(&self) -> usize {
        self.instances.iter().map(|i| i.faces.len()).sum()
    }
}
