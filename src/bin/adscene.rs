// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use adscene::core::error::Result;
use adscene::core::{Scene, SceneLayout, SceneMesh, SceneSummary, Snapshot};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

/// Environment variable naming a default layout file
const LAYOUT_ENV: &str = "ADSCENE_LAYOUT";

/// PlayStation scene extractor
#[derive(Parser)]
#[command(name = "adscene")]
#[command(about = "Extract 3D scene data from PlayStation RAM/VRAM snapshots", long_about = None)]
struct Args {
    /// Path to snapshot file (2MB RAM followed by 1MB VRAM)
    snapshot_file: PathBuf,

    /// TOML file overriding the scene header addresses
    #[arg(short = 'l', long)]
    layout: Option<PathBuf>,

    /// Write a scene summary (.json for JSON, anything else for binary)
    #[arg(short = 'e', long)]
    export: Option<PathBuf>,

    /// Also build the render mesh and report its size
    #[arg(short = 'm', long)]
    mesh: bool,
}

fn main() {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        // Only log if the error is NOT "file not found"
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("adscene v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        if e.is_malformed_snapshot() {
            error!("{} does not contain a readable scene", args.snapshot_file.display());
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let layout = load_layout(args)?;

    info!("Loading snapshot from: {}", args.snapshot_file.display());
    let snapshot = Snapshot::load(&args.snapshot_file)?;

    let mut scene = Scene::new();
    scene.read_snapshot(&snapshot, &layout)?;

    info!(
        "Scene: {}x{} cells (row stride {}), {} polygons, {} vertices",
        scene.width(),
        scene.height(),
        scene.row_stride(),
        scene.descriptor_count(),
        scene.vertices().len()
    );

    if args.mesh {
        let mesh = SceneMesh::build(&scene);
        info!(
            "Mesh: {} quads, {} vertices, {} opaque / {} semi-transparent indices",
            mesh.quad_count(),
            mesh.vertices.len(),
            mesh.opaque_indices.len(),
            mesh.semi_transparent_indices.len()
        );
    }

    if let Some(path) = &args.export {
        let source = args.snapshot_file.display().to_string();
        SceneSummary::from_scene(&scene, &source).save(path)?;
    }

    Ok(())
}

/// Pick the layout from the command line, then the environment, then the defaults
fn load_layout(args: &Args) -> Result<SceneLayout> {
    if let Some(path) = &args.layout {
        info!("Using layout from: {}", path.display());
        return SceneLayout::load(path);
    }

    match std::env::var(LAYOUT_ENV) {
        Ok(path) if !path.is_empty() => {
            info!("Using layout from ${}: {}", LAYOUT_ENV, path);
            SceneLayout::load(path)
        }
        Ok(_) => Ok(SceneLayout::default()),
        Err(std::env::VarError::NotPresent) => Ok(SceneLayout::default()),
        Err(e) => {
            warn!("Ignoring ${}: {}", LAYOUT_ENV, e);
            Ok(SceneLayout::default())
        }
    }
}
