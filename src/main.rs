use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vni::{DecodeOptions, DurationMode, MaskBitOrder, VniFile};

/// Inspect VNI colorization files
#[derive(Parser)]
#[command(name = "vni-dump")]
struct Cli {
    /// VNI file to decode
    file: PathBuf,

    /// TOML file with decode options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sum every frame delay instead of starting at the transition frame
    #[arg(long)]
    all_frame_durations: bool,

    /// Keep frame masks in on-disk bit order
    #[arg(long)]
    raw_masks: bool,

    /// Print the decoded file as JSON
    #[arg(long)]
    json: bool,
}

fn load_options(cli: &Cli) -> Result<DecodeOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => DecodeOptions::default(),
    };
    if cli.all_frame_durations {
        options.duration = DurationMode::AllFrames;
    }
    if cli.raw_masks {
        options.mask_bits = MaskBitOrder::Raw;
    }
    Ok(options)
}

fn print_summary(vni: &VniFile) {
    println!("{vni} (header declares {})", vni.declared_animation_count);
    for animation in &vni.animations {
        let size = match (animation.width, animation.height) {
            (Some(w), Some(h)) => format!("{w}x{h}"),
            _ => "-".to_owned(),
        };
        println!(
            "  {}: {} frames, {} ms, transition at {}, {}, {} colors, {} masks",
            animation,
            animation.frames.len(),
            animation.total_duration,
            animation.transition_frame_index,
            size,
            animation.colors.len(),
            animation.masks.len(),
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    let vni = vni::decode_file_with(&cli.file, &options)
        .with_context(|| format!("Failed to decode {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&vni)?);
    } else {
        print_summary(&vni);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "mask-bits = \"raw\"").unwrap();
        let path = config.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["vni-dump", "a.vni", "--config", path]).unwrap();
        let options = load_options(&cli).unwrap();
        assert_eq!(options.mask_bits, MaskBitOrder::Raw);
        assert_eq!(options.duration, DurationMode::FromTransition);

        let cli = Cli::try_parse_from(["vni-dump", "a.vni", "--config", path, "--all-frame-durations"]).unwrap();
        assert_eq!(load_options(&cli).unwrap().duration, DurationMode::AllFrames);
    }

    #[test]
    fn defaults_without_config() {
        let cli = Cli::try_parse_from(["vni-dump", "a.vni", "--raw-masks"]).unwrap();
        let options = load_options(&cli).unwrap();
        assert_eq!(options.mask_bits, MaskBitOrder::Raw);
        assert!(!cli.json);
    }
}
