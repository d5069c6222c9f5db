use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dotmatrix::{Config, GameBoy, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: dotmatrix <rom_path> [frames|--until-serial <text>] [--dump <out.rgba>] [--echo-serial]";

/// Upper bound on frames when running until a serial marker.
const MAX_SERIAL_FRAMES: u32 = 100_000;

enum RunMode {
    Frames(u32),
    UntilSerial(String),
}

struct Options {
    rom_path: PathBuf,
    mode: RunMode,
    dump_path: Option<PathBuf>,
    echo_serial: bool,
}

fn parse_args() -> Result<Options> {
    let mut args = std::env::args().skip(1);
    let rom_path = args.next().map(PathBuf::from).context(USAGE)?;

    let mut mode = RunMode::Frames(120);
    let mut dump_path = None;
    let mut echo_serial = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--until-serial" => {
                let marker = args.next().context("--until-serial needs a marker string")?;
                mode = RunMode::UntilSerial(marker);
            }
            "--dump" => {
                let path = args.next().context("--dump needs an output path")?;
                dump_path = Some(PathBuf::from(path));
            }
            "--echo-serial" => echo_serial = true,
            frames => {
                let frames = frames
                    .parse()
                    .with_context(|| format!("invalid frame count {frames:?}\n{USAGE}"))?;
                mode = RunMode::Frames(frames);
            }
        }
    }

    Ok(Options {
        rom_path,
        mode,
        dump_path,
        echo_serial,
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args()?;
    let rom = std::fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", options.rom_path.display()))?;

    let config = Config::builder().echo_serial(options.echo_serial).build();
    let mut gb = GameBoy::with_config(&rom, config).context("failed to load cartridge")?;
    log::info!("Loaded '{}' ({} bytes)", gb.title(), rom.len());

    let frames = match &options.mode {
        RunMode::Frames(frames) => {
            for frame in 0..*frames {
                gb.step().with_context(|| format!("emulation stopped in frame {frame}"))?;
            }
            *frames
        }
        RunMode::UntilSerial(marker) => {
            let mut frame = 0;
            while !contains(gb.serial_output(), marker.as_bytes()) {
                if frame == MAX_SERIAL_FRAMES {
                    bail!("serial output never contained {marker:?} within {MAX_SERIAL_FRAMES} frames");
                }
                gb.step().with_context(|| format!("emulation stopped in frame {frame}"))?;
                frame += 1;
            }
            frame
        }
    };

    let serial = gb.serial_output();
    if !serial.is_empty() {
        println!("{}", String::from_utf8_lossy(serial));
    }

    if let Some(path) = &options.dump_path {
        std::fs::write(path, gb.frame_buffer())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        println!(
            "Wrote {} bytes ({}x{} rgba) after {} frames to '{}'",
            gb.frame_buffer().len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            frames,
            path.display()
        );
    }

    Ok(())
}
