use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cubewalk_camera::{CameraController, CameraState};
use cubewalk_common::DemoConfig;
use cubewalk_input::{Action, FrameInput};
use cubewalk_scene::{DebugTextRenderer, FramePlan, MazeLayout, Renderer, Scene};
use glam::Vec2;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubewalk-cli", about = "Headless tools for the cubewalk scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SceneChoice {
    Cubes,
    Maze,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and scene sizes
    Info,
    /// Print the transforms of one frame
    Frame {
        #[arg(long, value_enum, default_value_t = SceneChoice::Cubes)]
        scene: SceneChoice,
        /// Maze layout file (maze scene only)
        #[arg(long)]
        maze: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f32>,
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f32>,
        #[arg(long)]
        fov: Option<f32>,
        #[arg(long, default_value = "1.0")]
        aspect: f32,
    },
    /// Replay scripted input and print the resulting camera
    Walk {
        #[arg(long, value_enum, default_value_t = SceneChoice::Cubes)]
        scene: SceneChoice,
        #[arg(long)]
        maze: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Held actions, comma separated (e.g. move_forward,sprint)
        #[arg(long, value_delimiter = ',')]
        actions: Vec<String>,
        /// Per-frame cursor offset as dx,dy
        #[arg(long, allow_hyphen_values = true)]
        look: Option<String>,
        /// Per-frame scroll in lines
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        scroll: f32,
        /// Config file for speed, sensitivity and sprint
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Parse a maze layout and report it
    Maze {
        /// Layout file; the built-in maze when omitted
        file: Option<PathBuf>,
    },
    /// Print the default config as JSON
    Config {
        /// Write it to this path instead
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn load_maze(path: Option<&PathBuf>) -> anyhow::Result<MazeLayout> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading maze {}", path.display()))?;
            MazeLayout::parse(&text).with_context(|| format!("parsing maze {}", path.display()))
        }
        None => Ok(MazeLayout::default()),
    }
}

fn build_scene(choice: SceneChoice, maze: Option<&PathBuf>) -> anyhow::Result<Scene> {
    Ok(match choice {
        SceneChoice::Cubes => Scene::floating_cubes(),
        SceneChoice::Maze => Scene::maze(&load_maze(maze)?),
    })
}

fn parse_look(text: &str) -> anyhow::Result<Vec2> {
    let (dx, dy) = text
        .split_once(',')
        .with_context(|| format!("expected dx,dy but got '{text}'"))?;
    Ok(Vec2::new(dx.trim().parse()?, dy.trim().parse()?))
}

fn parse_actions(names: &[String]) -> anyhow::Result<Vec<Action>> {
    names
        .iter()
        .filter(|n| !n.trim().is_empty())
        .map(|n| n.trim().parse::<Action>().map_err(anyhow::Error::from))
        .collect()
}

/// Runs `frames` identical frames of input through the controller.
fn replay(
    camera: &mut CameraState,
    controller: &CameraController,
    input: &FrameInput,
    frames: u32,
    dt: f32,
) {
    for _ in 0..frames {
        controller.apply(camera, input, dt);
    }
}

fn describe_camera(camera: &CameraState) -> String {
    let p = camera.position;
    let f = camera.front();
    format!(
        "position=({:.3}, {:.3}, {:.3}) yaw={:.2} pitch={:.2} fov={:.2} front=({:.3}, {:.3}, {:.3}) mode={:?}",
        p.x,
        p.y,
        p.z,
        camera.yaw(),
        camera.pitch(),
        camera.fov(),
        f.x,
        f.y,
        f.z,
        camera.mode
    )
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("cubewalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", cubewalk_input::crate_info());
            println!("camera: {}", cubewalk_camera::crate_info());
            println!("scene: {}", cubewalk_scene::crate_info());
            println!("assets: {}", cubewalk_assets::crate_info());
            println!("render: {}", cubewalk_render_wgpu::crate_info());
            for scene in [Scene::floating_cubes(), Scene::maze(&MazeLayout::default())] {
                println!(
                    "scene '{}': {} instances, {} faces, {}",
                    scene.name,
                    scene.instances.len(),
                    scene.face_count(),
                    if scene.is_lit() { "lit" } else { "unlit" }
                );
            }
        }
        Commands::Frame {
            scene,
            maze,
            yaw,
            pitch,
            fov,
            aspect,
        } => {
            let scene = build_scene(scene, maze.as_ref())?;
            let mut camera = scene.camera();
            camera.set_orientation(
                yaw.unwrap_or(camera.yaw()),
                pitch.unwrap_or(camera.pitch()),
            );
            if let Some(fov) = fov {
                camera.set_fov(fov);
            }
            let plan = FramePlan::build(&scene, &camera, aspect);
            print!("{}", DebugTextRenderer::new().render(&plan));
        }
        Commands::Walk {
            scene,
            maze,
            frames,
            dt,
            actions,
            look,
            scroll,
            config,
        } => {
            let config = match config {
                Some(path) => DemoConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => DemoConfig::default(),
            };
            let scene = build_scene(scene, maze.as_ref())?;
            let mut camera = scene.camera();
            camera.speed = config.move_speed;
            camera.sensitivity = config.mouse_sensitivity;
            let controller = CameraController::new(config.sprint_multiplier);

            let mut input = FrameInput::default().with_held(parse_actions(&actions)?);
            if let Some(look) = look {
                input.look = parse_look(&look)?;
            }
            input.scroll = scroll;

            println!("start: {}", describe_camera(&camera));
            replay(&mut camera, &controller, &input, frames, dt);
            println!(
                "after {frames} frames of {dt}s: {}",
                describe_camera(&camera)
            );
        }
        Commands::Maze { file } => {
            let layout = load_maze(file.as_ref())?;
            let (sr, sc) = layout.start();
            println!("{}x{} cells", layout.rows(), layout.cols());
            println!(
                "walls: {}, walkable: {}",
                layout.wall_count(),
                layout.walkable_count()
            );
            println!("start: row {sr}, col {sc} (facing yaw {:.0})", layout.start_yaw());
            match layout.exit() {
                Some((er, ec)) => println!("exit: row {er}, col {ec}"),
                None => println!("exit: none"),
            }
            print!("{layout}");
        }
        Commands::Config { write } => {
            let config = DemoConfig::default();
            match write {
                Some(path) => {
                    config.save(&path)?;
                    println!("wrote {}", path.display());
                }
                None => println!("{}", config.to_json()?),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn look_argument() {
        assert_eq!(parse_look("10, -5").unwrap(), Vec2::new(10.0, -5.0));
        assert!(parse_look("10").is_err());
        assert!(parse_look("a,b").is_err());
    }

    #[test]
    fn action_list() {
        let names = vec!["move_forward".to_string(), " sprint ".to_string()];
        assert_eq!(
            parse_actions(&names).unwrap(),
            vec![Action::MoveForward, Action::Sprint]
        );
        assert!(parse_actions(&["fly_away".to_string()]).is_err());
    }

    #[test]
    fn replay_forward_for_one_second() {
        let mut camera = CameraState::default();
        let input = FrameInput::default().with_held([Action::MoveForward]);
        replay(&mut camera, &CameraController::default(), &input, 10, 0.1);
        // speed 2.5 along -Z for one second
        assert!(camera.position.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-4));
    }

    #[test]
    fn maze_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.txt");
        std::fs::write(&path, "###\n#S#\n#E#\n###\n").unwrap();
        let layout = load_maze(Some(&path)).unwrap();
        assert_eq!((layout.rows(), layout.cols()), (4, 3));
        assert_eq!(layout.start(), (1, 1));
    }

    #[test]
    fn missing_maze_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(build_scene(SceneChoice::Maze, Some(&missing)).is_err());
        assert!(build_scene(SceneChoice::Cubes, Some(&missing)).is_ok());
    }
}
