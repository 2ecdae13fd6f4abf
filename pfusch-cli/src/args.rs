//! Argument parsing for the `run` and `describe` commands.

use pfusch_vm::DEFAULT_MAX_STEPS;

/// Step ceiling in visual mode, where every step draws a frame.
pub const DEFAULT_VISUAL_MAX_STEPS: u64 = 10_000;

/// Pause between visual frames.
pub const DEFAULT_DELAY_MS: u64 = 100;

/// Parsed `run <file> [--max-steps N] [--visual] [--delay-ms N]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    pub path: String,
    /// Explicit ceiling; `None` picks the mode's default.
    pub max_steps: Option<u64>,
    pub visual: bool,
    pub delay_ms: u64,
}

impl RunArgs {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut path = None;
        let mut max_steps = None;
        let mut visual = false;
        let mut delay_ms = DEFAULT_DELAY_MS;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--visual" => visual = true,
                "--max-steps" => max_steps = Some(flag_value(&mut iter, "--max-steps")?),
                "--delay-ms" => delay_ms = flag_value(&mut iter, "--delay-ms")?,
                flag if flag.starts_with("--") => return Err(format!("unknown flag '{flag}'")),
                file => {
                    if path.is_some() {
                        return Err(format!("unexpected argument '{file}'"));
                    }
                    path = Some(file.to_string());
                }
            }
        }

        let path = path.ok_or_else(|| "run requires an input file".to_string())?;
        Ok(Self {
            path,
            max_steps,
            visual,
            delay_ms,
        })
    }

    /// The ceiling for this run.
    pub fn step_limit(&self) -> u64 {
        match (self.max_steps, self.visual) {
            (Some(n), _) => n,
            (None, true) => DEFAULT_VISUAL_MAX_STEPS,
            (None, false) => DEFAULT_MAX_STEPS,
        }
    }
}

fn flag_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<u64, String> {
    let raw = iter
        .next()
        .ok_or_else(|| format!("{flag} requires a value"))?;
    raw.parse()
        .map_err(|_| format!("invalid value '{raw}' for {flag}"))
}

/// Parse a `describe` argument into a byte.
///
/// A single ASCII character is taken literally (`5` is the symbol `'5'`).
/// Longer arguments are byte values: decimal (`65`, `05`) or hex (`0x41`).
pub fn parse_symbol(arg: &str) -> Result<u8, String> {
    let mut chars = arg.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return u8::try_from(c)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("'{arg}' is not an ASCII character"));
    }

    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => arg.parse(),
    };
    parsed.map_err(|_| format!("invalid symbol '{arg}' (expected a character or a value 0-255)"))
}
