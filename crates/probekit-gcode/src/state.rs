//! Machine state snapshot

/// Machine state seen by command processors
///
/// Tracks the modal groups and words the pipeline can observe in the
/// command stream:
/// - Motion group (G00, G01, G02, G03)
/// - Distance mode group (G90, G91)
/// - Units group (G20, G21)
/// - Coordinate system group (G54-G59)
/// - Feed rate, spindle speed and tool number
///
/// Processors receive it by shared reference and never modify it; only the
/// pipeline's batch driver updates it between commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcodeState {
    /// Motion mode - Group 1 (G00, G01, G02, G03)
    pub motion_mode: u8,

    /// Distance mode - Group 3 (G90=absolute, G91=incremental)
    pub distance_mode: u8,

    /// Units mode - Group 6 (G20=inches, G21=millimeters)
    pub units_mode: u8,

    /// Coordinate system - Group 12 (G54-G59)
    pub coordinate_system: u8,

    /// Current feed rate (F value)
    pub feed_rate: f64,

    /// Current spindle speed (S value)
    pub spindle_speed: f64,

    /// Tool number (T value)
    pub tool_number: u32,
}

impl Default for GcodeState {
    fn default() -> Self {
        Self {
            motion_mode: 0,        // G00 (rapid)
            distance_mode: 90,     // G90 (absolute)
            units_mode: 21,        // G21 (millimeters)
            coordinate_system: 54, // G54 (first WCS)
            feed_rate: 0.0,
            spindle_speed: 0.0,
            tool_number: 0,
        }
    }
}

impl GcodeState {
    /// Create a new state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the state from one (comment-free) command line
    ///
    /// Words are read left to right; unknown words are ignored.
    pub fn apply(&mut self, command: &str) {
        for (letter, value) in words(command) {
            match letter {
                'G' => self.apply_g(value),
                'F' => {
                    if let Ok(rate) = value.parse::<f64>() {
                        self.feed_rate = rate;
                    }
                }
                'S' => {
                    if let Ok(speed) = value.parse::<f64>() {
                        self.spindle_speed = speed;
                    }
                }
                'T' => {
                    if let Ok(tool) = value.parse::<u32>() {
                        self.tool_number = tool;
                    }
                }
                _ => {}
            }
        }
    }

    /// Record the tool selected by a (comment-free) command line
    ///
    /// Only the `T` word is read. A tool change stage replaces the `T..M6`
    /// line, so the pipeline takes the tool from the line it was given.
    pub fn record_tool(&mut self, command: &str) {
        let tool = words(command)
            .filter(|(letter, _)| *letter == 'T')
            .filter_map(|(_, value)| value.parse::<u32>().ok())
            .last();
        if let Some(tool) = tool {
            self.tool_number = tool;
        }
    }

    fn apply_g(&mut self, value: &str) {
        let Ok(code) = value.parse::<u8>() else {
            return;
        };
        match code {
            0..=3 => self.motion_mode = code,
            20 | 21 => self.units_mode = code,
            54..=59 => self.coordinate_system = code,
            90 | 91 => self.distance_mode = code,
            _ => {}
        }
    }

    /// Get human-readable motion mode description
    pub fn motion_mode_description(&self) -> &'static str {
        match self.motion_mode {
            0 => "Rapid positioning (G00)",
            1 => "Linear interpolation (G01)",
            2 => "Clockwise arc (G02)",
            3 => "Counter-clockwise arc (G03)",
            _ => "Unknown",
        }
    }

    /// Get human-readable units description
    pub fn units_description(&self) -> &'static str {
        match self.units_mode {
            20 => "Inches (G20)",
            21 => "Millimeters (G21)",
            _ => "Unknown",
        }
    }
}

/// Split a command into (letter, value) words, e.g. `G1X10` -> `('G',"1"), ('X',"10")`
fn words<'a>(command: &'a str) -> impl Iterator<Item = (char, &'a str)> + 'a {
    let mut rest = command;
    std::iter::from_fn(move || loop {
        let start = rest.find(|c: char| c.is_ascii_alphabetic())?;
        let letter = rest[start..].chars().next()?.to_ascii_uppercase();
        let value_start = start + 1;
        let value_len = rest[value_start..]
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(rest.len() - value_start);
        let value = &rest[value_start..value_start + value_len];
        rest = &rest[value_start + value_len..];
        if !value.is_empty() {
            return Some((letter, value));
        }
    })
}
