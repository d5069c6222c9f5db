use dotmatrix_common::Color;
use typed_builder::TypedBuilder;

use crate::CYCLES_PER_FRAME;

/// Grey ramp used when no palette is configured.
pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::WHITE,
    Color::LIGHT_GRAY,
    Color::DARK_GRAY,
    Color::BLACK,
];

/// Console options.
///
/// ```
/// use dotmatrix::Config;
///
/// let config = Config::builder().echo_serial(true).build();
/// assert_eq!(config.cycles_per_frame, 70_224);
/// ```
#[derive(TypedBuilder, Clone, Debug)]
pub struct Config {
    /// Shade for each colour index, lightest (0) to darkest (3).
    #[builder(default = DEFAULT_PALETTE)]
    pub palette: [Color; 4],
    /// Log every byte shifted out of the serial port at info level.
    #[builder(default = false)]
    pub echo_serial: bool,
    /// T-cycles the console runs per `GameBoy::step` call.
    #[builder(default = CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}
