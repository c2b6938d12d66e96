use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "phantom-svg", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert inputs (SVG, PNG, JSON/XML manifests) into an animated SVG or APNG.
    Convert(ConvertArgs),
    /// Print a summary of an animation file.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input files, appended in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output path; the extension picks the format (.svg or .png).
    #[arg(long)]
    out: PathBuf,

    /// Duration in seconds applied to every input frame.
    #[arg(long)]
    duration: Option<f64>,

    /// Loop count; 0 plays forever.
    #[arg(long)]
    loops: Option<u32>,

    /// Show the first frame once, outside the repeating cycle.
    #[arg(long)]
    skip_first: bool,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let options = phantom_svg::ReadOptions {
        duration: args.duration,
        ..Default::default()
    };

    let mut doc = phantom_svg::Document::new();
    for input in &args.inputs {
        doc.add_frames_from_file(input, &options)
            .with_context(|| format!("load '{}'", input.display()))?;
    }
    if let Some(loops) = args.loops {
        doc.loops = loops;
    }
    if args.skip_first {
        doc.skip_first = true;
    }

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let written = match ext.as_str() {
        "svg" => doc.save_svg(&args.out)?,
        "png" => doc.save_apng(&args.out)?,
        other => anyhow::bail!("unsupported output extension '.{other}' (use .svg or .png)"),
    };
    if written == 0 {
        anyhow::bail!("nothing to write: no frames were loaded");
    }
    eprintln!("wrote {written} bytes to {}", args.out.display());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let doc = phantom_svg::Document::from_file(&args.in_path, &phantom_svg::ReadOptions::default())?;

    let loops = if doc.loops == 0 {
        "indefinite".to_string()
    } else {
        doc.loops.to_string()
    };
    println!("frames:     {}", doc.frames.len());
    println!("animated:   {}", doc.has_animation);
    println!("loops:      {loops}");
    println!("skip_first: {}", doc.skip_first);
    println!("duration:   {}s", doc.total_duration());
    for (i, frame) in doc.frames.iter().enumerate() {
        let width = frame
            .width
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        let height = frame
            .height
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        println!("  frame {i}: {width} x {height}, {}s", frame.duration);
    }
    Ok(())
}
