use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use station_profile::{
    config::Config,
    drawing::OutputFormat,
    io::{write_profile_csv, Delimiter},
    marks::{LabelOffset, TickPlacement},
    pipeline::{load_profile, load_stations, plan_marks, run, RunPaths},
    resolver::ResolverKind,
    stations::{ColumnRef, LengthPolicy},
};

fn parse_delimiter(s: &str) -> Result<Delimiter, String> {
    Delimiter::from_name(s).ok_or_else(|| format!("unknown delimiter {s:?} (tab, comma, semicolon, auto)"))
}

fn parse_placement(s: &str) -> Result<TickPlacement, String> {
    TickPlacement::from_name(s).ok_or_else(|| format!("unknown placement {s:?} (centered, above)"))
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::from_name(s).ok_or_else(|| format!("unknown format {s:?} (dxf, svg, json)"))
}

fn parse_resolver(s: &str) -> Result<ResolverKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "linear" => Ok(ResolverKind::Linear),
        "sorted" | "binary" => Ok(ResolverKind::Sorted),
        _ => Err(format!("unknown resolver {s:?} (linear, sorted)")),
    }
}

#[derive(Parser)]
#[command(name = "station_profile_cli", version, about = "Annotated longitudinal profile drawings")]
struct Cli {
    #[command(flatten)]
    options: ConfigArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Options overriding the configuration file or the built-in defaults.
#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Delimiter of the profile file
    #[arg(long, value_parser = parse_delimiter, global = true)]
    profile_delimiter: Option<Delimiter>,
    /// Delimiter of the segment file
    #[arg(long, value_parser = parse_delimiter, global = true)]
    segments_delimiter: Option<Delimiter>,
    /// Multiplier applied to raw profile distances
    #[arg(long, global = true)]
    distance_factor: Option<f64>,
    /// Multiplier applied to raw profile altitudes
    #[arg(long, global = true)]
    elevation_factor: Option<f64>,
    /// Segment length column: zero-based index or header name
    #[arg(long, global = true)]
    length_column: Option<String>,
    /// Segment name column: zero-based index or header name
    #[arg(long, global = true)]
    name_column: Option<String>,
    /// Fail when the segment name column is missing
    #[arg(long, global = true)]
    require_name: bool,
    /// Fail on segment lengths that are not numbers instead of using zero
    #[arg(long, global = true)]
    reject_bad_lengths: bool,
    /// Tick height in drawing units
    #[arg(long, global = true)]
    tick_height: Option<f64>,
    /// Tick placement: centered or above
    #[arg(long, value_parser = parse_placement, global = true)]
    placement: Option<TickPlacement>,
    /// Horizontal label offset as a fraction of the tick height
    #[arg(long, allow_hyphen_values = true, global = true)]
    label_dx: Option<f64>,
    /// Vertical label offset as a fraction of the tick height
    #[arg(long, allow_hyphen_values = true, global = true)]
    label_dy: Option<f64>,
    /// Altitude lookup: linear or sorted
    #[arg(long, value_parser = parse_resolver, global = true)]
    resolver: Option<ResolverKind>,
    /// Label text height in drawing units
    #[arg(long, global = true)]
    text_height: Option<f64>,
    /// Omit labels for unnamed stations
    #[arg(long, global = true)]
    skip_empty_labels: bool,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(d) = self.profile_delimiter {
            config.profile.delimiter = d;
        }
        if let Some(d) = self.segments_delimiter {
            config.segments.delimiter = d;
        }
        if let Some(f) = self.distance_factor {
            config.profile.scale.distance_factor = f;
        }
        if let Some(f) = self.elevation_factor {
            config.profile.scale.elevation_factor = f;
        }
        if let Some(c) = &self.length_column {
            config.segments.columns.length = ColumnRef::parse(c);
        }
        if let Some(c) = &self.name_column {
            config.segments.columns.name = Some(ColumnRef::parse(c));
        }
        if self.require_name {
            config.segments.columns.require_name = true;
        }
        if self.reject_bad_lengths {
            config.segments.length_policy = LengthPolicy::Reject;
        }
        if let Some(h) = self.tick_height {
            config.marks.style.tick_height = h;
        }
        if let Some(p) = self.placement {
            config.marks.style.placement = p;
        }
        if self.label_dx.is_some() || self.label_dy.is_some() {
            let current = config.marks.style.label_offset;
            config.marks.style.label_offset = LabelOffset::new(
                self.label_dx.unwrap_or(current.dx),
                self.label_dy.unwrap_or(current.dy),
            );
        }
        if let Some(r) = self.resolver {
            config.marks.resolver = r;
        }
        if let Some(h) = self.text_height {
            config.drawing.text.height = h;
        }
        if self.skip_empty_labels {
            config.drawing.skip_empty_labels = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the annotated profile drawing and the cleaned profile table.
    Draw {
        /// Profile file with distance (km) and altitude columns
        #[arg(long, default_value = "data.txt")]
        profile: PathBuf,
        /// Segment file with lengths and names
        #[arg(long, default_value = "lengths.csv")]
        segments: PathBuf,
        /// Drawing output (.dxf, .svg or .json)
        #[arg(short, long, default_value = "mikotomi.dxf")]
        output: PathBuf,
        /// Cleaned profile table output
        #[arg(long, default_value = "mikotomi.csv")]
        csv: PathBuf,
        /// Do not write the cleaned profile table
        #[arg(long)]
        no_csv: bool,
        /// Drawing format, overriding the output extension
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,
    },
    /// Write the cleaned profile table only.
    CleanProfile { input: PathBuf, output: PathBuf },
    /// Print cumulative stations of a segment file.
    Stations { segments: PathBuf },
    /// Print station, resolved altitude and name for every station.
    Marks { profile: PathBuf, segments: PathBuf },
    /// Print the effective configuration as JSON.
    PrintConfig,
}

fn print_station(sta: f64, elev: f64, name: &str) {
    println!("{:.3},{:.3},{}", sta, elev, name);
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.options.resolve()?;
    log::debug!("effective configuration: {config:?}");
    match cli.command {
        Commands::Draw {
            profile,
            segments,
            output,
            csv,
            no_csv,
            format,
        } => {
            let paths = RunPaths {
                profile,
                segments,
                profile_csv: (!no_csv).then_some(csv),
                drawing: output,
                format,
            };
            let summary = run(&config, &paths).context("drawing failed")?;
            if let Some(csv) = &summary.profile_csv {
                println!("Wrote profile CSV -> {}", absolute(csv).display());
            }
            println!(
                "Wrote {} stations over {:.3} m -> {}",
                summary.stations,
                summary.line_length,
                absolute(&summary.drawing).display()
            );
        }
        Commands::CleanProfile { input, output } => {
            let profile = load_profile(&input, &config.profile)
                .with_context(|| format!("reading {}", input.display()))?;
            write_profile_csv(&output, &profile)?;
            println!("Wrote {} samples -> {}", profile.len(), output.display());
        }
        Commands::Stations { segments } => {
            let stations = load_stations(&segments, &config.segments)
                .with_context(|| format!("reading {}", segments.display()))?;
            for s in &stations {
                println!("{:.3},{}", s.position, s.name);
            }
        }
        Commands::Marks { profile, segments } => {
            let prof = load_profile(&profile, &config.profile)
                .with_context(|| format!("reading {}", profile.display()))?;
            let stations = load_stations(&segments, &config.segments)
                .with_context(|| format!("reading {}", segments.display()))?;
            for m in plan_marks(&prof, &stations, &config.marks) {
                print_station(m.station.position, m.altitude, &m.station.name);
            }
        }
        Commands::PrintConfig => println!("{}", config.to_json_string()?),
    }
    Ok(())
}
