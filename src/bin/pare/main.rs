//! Pare CLI - quadric mesh simplification from the command line.
//!
//! Usage: pare <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `pare --help` for available commands. Set `RUST_LOG=debug` (or
//! `trace`) to see what the simplifier is doing.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Vector3;

use pare::algo::simplify::{simplify_with_progress, QuadricPolicy, SimplifyOptions};
use pare::algo::Progress;
use pare::io;
use pare::mesh::{primitives, IndexedMesh};

#[derive(Parser)]
#[command(name = "pare")]
#[command(author, version, about = "Quadric error mesh simplification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Stopping conditions shared by `simplify` and `demo`.
#[derive(clap::Args)]
struct SimplifyArgs {
    /// Stop once the cheapest merge costs at least this much
    #[arg(short, long)]
    error_limit: Option<f64>,

    /// Stop after this many merges
    #[arg(short = 'n', long)]
    max_contractions: Option<usize>,

    /// Stop after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// How merged vertices get their quadric
    #[arg(long, value_enum, default_value = "accumulate")]
    policy: PolicyArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Simplify a mesh
    Simplify {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        #[command(flatten)]
        args: SimplifyArgs,
    },

    /// Generate a cube-sphere terrain patch, simplify it and save it
    Demo {
        /// Output mesh file
        output: PathBuf,

        /// Vertices per side of the patch
        #[arg(short, long, default_value = "64")]
        resolution: usize,

        #[command(flatten)]
        args: SimplifyArgs,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Sum the quadrics of both merged vertices
    Accumulate,
    /// Rebuild the quadric from the triangles around the survivor
    Recompute,
}

impl From<PolicyArg> for QuadricPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Accumulate => QuadricPolicy::Accumulate,
            PolicyArg::Recompute => QuadricPolicy::Recompute,
        }
    }
}

impl SimplifyArgs {
    fn to_options(&self, default_error_limit: f64) -> Result<SimplifyOptions, Box<dyn std::error::Error>> {
        let mut options = SimplifyOptions::with_error_limit(self.error_limit.unwrap_or(default_error_limit))
            .with_quadric_policy(self.policy.into());
        if let Some(max) = self.max_contractions {
            options = options.with_max_contractions(max);
        }
        if let Some(ms) = self.timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }
        options.validate()?;
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Simplify { input, output, args } => cmd_simplify(&input, &output, &args)?,
        Commands::Demo { output, resolution, args } => cmd_demo(&output, resolution, &args)?,
    }
    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let last_percent = Arc::new(AtomicUsize::new(usize::MAX));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }
        let percent = if current >= total { 100 } else { current * 100 / total };

        // Redraw only when the percentage moves.
        if last_percent.swap(percent, Ordering::Relaxed) == percent {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        eprint!(
            "\r[{}{}] {:3}% {}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();
    })
    .with_stride(64)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: IndexedMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());
    println!("Degenerate triangles: {}", mesh.degenerate_triangle_count());

    let area: f64 = (0..mesh.triangle_count())
        .map(|t| {
            let [p0, p1, p2] = mesh.triangle_positions(t);
            0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
        })
        .sum();
    println!("Surface area: {:.6}", area);

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    Ok(())
}

fn simplify_and_save(
    mut mesh: IndexedMesh,
    output: &Path,
    options: &SimplifyOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Simplifying (error limit {}, {} quadrics)...",
        options.error_limit, options.quadric_policy
    );

    let progress = create_progress();
    let start = Instant::now();
    let stats = simplify_with_progress(&mut mesh, options, &progress);
    let elapsed = start.elapsed();
    eprintln!();

    println!("Result: {}", stats);
    println!(
        "Triangles: {} ({} degenerate)",
        mesh.triangle_count(),
        mesh.degenerate_triangle_count()
    );

    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);
    Ok(())
}

fn cmd_simplify(input: &Path, output: &Path, args: &SimplifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options(f64::INFINITY)?;
    let mesh: IndexedMesh = io::load(input)?;
    println!("Loaded: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());

    simplify_and_save(mesh, output, &options)
}

fn cmd_demo(output: &Path, resolution: usize, args: &SimplifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options(1e-4)?;
    let mesh: IndexedMesh = primitives::terrain_face(resolution, Vector3::new(0.0, 1.0, 0.0))?;
    println!(
        "Generated terrain face: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    simplify_and_save(mesh, output, &options)
}
