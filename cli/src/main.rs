use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use base::prelude::*;
use board::{
    production_segments, BoardError, BrightnessError, BrightnessLevels, MultiScaleBoard,
    PwmLevelIndicator, Segment,
};

mod config;
mod leds;
mod poll;

use leds::{TerminalLeds, TerminalPwm};

/// Drive a multi-scale binary LED display board
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bit pattern for a value.
    Encode {
        /// Number of bits in the register.
        #[clap(long, default_value_t = 6)]
        width: u32,

        /// Representation: unsigned, sign-magnitude, ones-complement
        /// or twos-complement.
        #[clap(long, default_value = "unsigned")]
        mode: Representation,

        /// After encoding, switch to this representation and print
        /// the value's pattern in it.
        #[clap(long)]
        switch_to: Option<Representation>,

        #[clap(allow_negative_numbers = true)]
        value: f64,
    },

    /// Print the value of a bit pattern.  The register width is the
    /// length of the pattern.
    Decode {
        #[clap(long, default_value = "unsigned")]
        mode: Representation,

        bits: BitPattern,
    },

    /// Print the range of values a register can hold.
    Bounds {
        #[clap(long, default_value_t = 6)]
        width: u32,

        #[clap(long, default_value = "unsigned")]
        mode: Representation,
    },

    /// Show readings (one per line) on a terminal rendering of the
    /// board.
    Display {
        #[clap(long, default_value_t = 6)]
        width: u32,

        #[clap(long, default_value = "unsigned")]
        mode: Representation,

        /// A gain level, as OFFSET:SCALE.  Repeat for each level.
        /// Defaults to the production board's levels.
        #[clap(long = "segment", value_parser = config::parse_segment)]
        segments: Vec<Segment>,

        /// Milliseconds to wait after showing each reading.
        #[clap(long, default_value_t = 4000)]
        interval_ms: u64,

        /// File from which readings are read (standard input if
        /// omitted).
        input: Option<PathBuf>,
    },
}

#[derive(Debug)]
enum Fail {
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
    Numeral(NumeralError),
    Board(BoardError),
    Brightness(BrightnessError),
    Io(io::Error),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
            Fail::Numeral(e) => e.fmt(f),
            Fail::Board(e) => e.fmt(f),
            Fail::Brightness(e) => e.fmt(f),
            Fail::Io(e) => e.fmt(f),
        }
    }
}

impl Error for Fail {}

impl From<NumeralError> for Fail {
    fn from(e: NumeralError) -> Fail {
        Fail::Numeral(e)
    }
}

impl From<BoardError> for Fail {
    fn from(e: BoardError) -> Fail {
        Fail::Board(e)
    }
}

impl From<BrightnessError> for Fail {
    fn from(e: BrightnessError) -> Fail {
        Fail::Brightness(e)
    }
}

impl From<io::Error> for Fail {
    fn from(e: io::Error) -> Fail {
        Fail::Io(e)
    }
}

fn encode(
    width: u32,
    mode: Representation,
    switch_to: Option<Representation>,
    value: f64,
) -> Result<(), Fail> {
    let mut codec = NumeralCodec::new(width, mode)?;
    let bits = codec.encode(value)?;
    println!("{bits}");
    if let Some(new_mode) = switch_to {
        if let Some(bits) = codec.set_mode(new_mode)? {
            println!("{bits}");
        }
    }
    Ok(())
}

fn decode(mode: Representation, bits: &BitPattern) -> Result<(), Fail> {
    // Absurdly long patterns are rejected by NumeralCodec::new.
    let width = u32::try_from(bits.len()).unwrap_or(u32::MAX);
    let codec = NumeralCodec::new(width, mode)?;
    println!("{}", codec.decode(bits)?);
    Ok(())
}

fn bounds(width: u32, mode: Representation) -> Result<(), Fail> {
    let layout = Layout::new(width, mode)?;
    println!(
        "{width}-bit {mode}: {} <= value < {}",
        layout.lower_bound(),
        layout.upper_bound()
    );
    Ok(())
}

fn display(
    width: u32,
    mode: Representation,
    segments: Vec<Segment>,
    interval: Duration,
    input: Option<PathBuf>,
) -> Result<(), Fail> {
    let segments = if segments.is_empty() {
        production_segments()
    } else {
        segments
    };
    let codec = NumeralCodec::new(width, mode)?;
    let levels = BrightnessLevels::logarithmic(segments.len().max(2))?;
    let mut board = MultiScaleBoard::new(
        codec,
        segments,
        TerminalLeds::stdout(),
        PwmLevelIndicator::new(TerminalPwm::stdout(), levels),
    )?;
    let bounds = board.selector().bounds();
    event!(
        Level::INFO,
        "{} levels on a {width}-bit {mode} register can show values in {bounds}",
        board.selector().level_count()
    );
    let summary = match input {
        Some(path) => {
            let file = File::open(&path).map_err(|e| {
                Fail::InitialisationFailure(format!("failed to open {}: {e}", path.display()))
            })?;
            poll::run_poll_loop(BufReader::new(file), &mut board, interval)?
        }
        None => poll::run_poll_loop(io::stdin().lock(), &mut board, interval)?,
    };
    event!(Level::DEBUG, "poll loop finished: {summary:?}");
    Ok(())
}

fn run_ledboard() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/filter/struct.EnvFilter.html
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "ledboard");
    let _enter = span.enter();
    match cli.command {
        Command::Encode {
            width,
            mode,
            switch_to,
            value,
        } => encode(width, mode, switch_to, value),
        Command::Decode { mode, bits } => decode(mode, &bits),
        Command::Bounds { width, mode } => bounds(width, mode),
        Command::Display {
            width,
            mode,
            segments,
            interval_ms,
            input,
        } => display(
            width,
            mode,
            segments,
            Duration::from_millis(interval_ms),
            input,
        ),
    }
}

fn main() {
    match run_ledboard() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
