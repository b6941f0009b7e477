//! Simplify a procedural mesh and print what happened.
//!
//! Usage: simplify_sphere [--subdivisions N] [--ratio R | --target T]
//!
//! Set `RUST_LOG=debug` to see every reference refresh.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quadrix::prelude::*;

#[derive(Parser)]
#[command(name = "simplify_sphere")]
#[command(author, version, about = "Quadric mesh simplification demo", long_about = None)]
struct Cli {
    /// Icosphere subdivision level (20 * 4^N triangles)
    #[arg(short, long, default_value = "4")]
    subdivisions: usize,

    /// Fraction of triangles to remove (0.0 to 1.0)
    #[arg(short, long, default_value = "0.5", conflicts_with = "target")]
    ratio: f64,

    /// Absolute target triangle count
    #[arg(short, long)]
    target: Option<usize>,

    /// Threshold growth exponent
    #[arg(short, long, default_value = "7")]
    aggressiveness: u32,

    /// Keep open boundaries in place
    #[arg(long)]
    preserve_border: bool,

    /// Use an open N x N wavy grid instead of a closed sphere
    #[arg(long, value_name = "N")]
    grid: Option<usize>,
}

fn icosphere(subdivisions: usize) -> TriangleMesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let vertices = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Point3d::from(Vector3d::new(x, y, z).normalize()))
    .collect();
    let faces = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];
    let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut vertices = std::mem::take(&mut mesh.vertices);
        let mut midpoint = |a: usize, b: usize| -> usize {
            *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                let m = (vertices[a].coords + vertices[b].coords).normalize();
                vertices.push(Point3d::from(m));
                vertices.len() - 1
            })
        };
        let mut faces = Vec::with_capacity(mesh.faces.len() * 4);
        for face in &mesh.faces {
            let [a, b, c] = face.indices;
            let (ab, bc, ca) = (midpoint(a, b), midpoint(b, c), midpoint(c, a));
            faces.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]].map(Face::new));
        }
        mesh.vertices = vertices;
        mesh.faces = faces;
    }
    mesh
}

fn wavy_grid(size: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * std::f64::consts::PI;
            let fy = y as f64 / (size - 1) as f64 * std::f64::consts::PI;
            mesh.add_vertex(Point3d::new(x as f64, y as f64, fx.sin() * fy.sin() * 2.0));
        }
    }
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            mesh.add_face([tl, tr, bl]);
            mesh.add_face([tr, br, bl]);
        }
    }
    mesh
}

fn format_box(mesh: &TriangleMesh) -> String {
    let (min, max) = mesh.bounding_box();
    format!(
        "[{:.4}, {:.4}, {:.4}] .. [{:.4}, {:.4}, {:.4}]",
        min.x, min.y, min.z, max.x, max.y, max.z
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mesh = match cli.grid {
        Some(size) if size < 2 => bail!("grid needs at least 2 vertices per side"),
        Some(size) => wavy_grid(size),
        None => icosphere(cli.subdivisions),
    };
    if !(0.0..=1.0).contains(&cli.ratio) {
        bail!("ratio must be between 0.0 and 1.0, got {}", cli.ratio);
    }
    let target = cli
        .target
        .unwrap_or(((1.0 - cli.ratio) * mesh.face_count() as f64) as usize);

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.face_count(),
        target,
        "Generated input mesh"
    );

    let options = SimplifyOptions::new(target)
        .with_aggressiveness(cli.aggressiveness)
        .with_preserve_border(cli.preserve_border);

    let start = Instant::now();
    let mut store = MeshStore::from_mesh(&mesh)?;
    let report = store.simplify_mesh(&options);
    let elapsed = start.elapsed();
    let simplified = store.into_mesh();

    println!("{}", report);
    println!("elapsed:     {:.2?}", elapsed);
    println!("input box:   {}", format_box(&mesh));
    println!("output box:  {}", format_box(&simplified));
    Ok(())
}
