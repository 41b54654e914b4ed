use std::{fs, io, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

use mp4_mux::*;

mod media;

use media::*;

#[derive(Parser, Clone)]
pub struct Cli {
	/// Write the file here.
	#[arg()]
	pub output: PathBuf,

	/// The container flavor.
	#[arg(long, value_enum, default_value_t = Format::Mp4)]
	pub format: Format,

	/// Write moof/mdat fragments and a random access index instead of a single mdat.
	#[arg(long)]
	pub fragmented: bool,

	/// The length of the file in seconds.
	#[arg(long, default_value_t = 4)]
	pub seconds: u32,

	/// The video frame rate, also the keyframe interval.
	#[arg(long, default_value_t = 25)]
	pub fps: u32,

	/// Add a timecode track, even when the flavor has no native support for one.
	#[arg(long)]
	pub timecode: bool,

	/// Log every atom decision made by the muxer.
	#[arg(short, long)]
	pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Format {
	Mp4,
	Mov,
	Ismv,
	#[value(name = "3gp")]
	ThreeGp,
}

impl Format {
	fn flavor(self) -> Flavor {
		match self {
			Format::Mp4 => Flavor::Isom,
			Format::Mov => Flavor::Mov,
			Format::Ismv => Flavor::Isml,
			Format::ThreeGp => Flavor::ThreeGp,
		}
	}

	fn ftyp(self) -> Ftyp {
		match self {
			Format::Mp4 => Ftyp::new(b"isom".into(), 0x200, &[b"isom".into(), b"iso2".into(), b"mp41".into()]),
			Format::Mov => Ftyp::new(b"qt  ".into(), 0x2005_0300, &[b"qt  ".into()]),
			Format::Ismv => Ftyp::new(b"isml".into(), 1, &[b"piff".into(), b"iso2".into()]),
			Format::ThreeGp => Ftyp::new(b"3gp6".into(), 0x100, &[b"isom".into(), b"3gp6".into()]),
		}
	}
}

fn main() -> anyhow::Result<()> {
	env_logger::init();

	let config = Cli::parse();

	let level = match config.verbose {
		true => tracing::Level::DEBUG,
		false => tracing::Level::WARN,
	};

	let tracer = tracing_subscriber::FmtSubscriber::builder().with_max_level(level).finish();
	tracing::subscriber::set_global_default(tracer).context("failed to set tracing subscriber")?;

	anyhow::ensure!(config.fps > 0, "the frame rate must be positive");

	let ctx = Context::new(config.format.flavor(), config.timecode);

	let file = fs::File::create(&config.output)
		.with_context(|| format!("failed to create output: {}", config.output.display()))?;
	let mut writer = io::BufWriter::new(file);

	log::info!(
		"writing {} seconds: path={} format={:?} fragmented={}",
		config.seconds,
		config.output.display(),
		config.format,
		config.fragmented
	);

	let mut muxer = Muxer::new(ctx, &config)?;

	let size = match config.fragmented {
		true => muxer.write_fragmented(&mut writer, &config)?,
		false => muxer.write_flat(&mut writer, &config)?,
	};

	io::Write::flush(&mut writer).context("failed to flush output")?;

	log::info!("wrote {} bytes", size);

	Ok(())
}
