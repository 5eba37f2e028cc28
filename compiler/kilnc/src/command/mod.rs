//! Command-line parsing.

use std::fmt;

use kiln_ir::{LanguageVersion, RangeFamily};
use kiln_opt::OptimizerConfig;

/// Errors from bad command-line input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid --python value: {0}")]
    BadVersion(String),

    #[error("invalid --threshold value '{0}': expected a non-negative integer")]
    BadThreshold(String),

    #[error("invalid argument '{0}': expected an integer, a float or '?'")]
    BadArgument(String),

    #[error("range expects 1 to 3 arguments, got {0}")]
    ArgumentCount(usize),
}

/// One positional argument of the range call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Argument {
    Int(i64),
    Float(f64),
    Unknown,
}

impl Argument {
    fn parse(text: &str) -> Result<Self, CliError> {
        if text == "?" {
            return Ok(Argument::Unknown);
        }
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Argument::Int(value));
        }
        // `inf` and `nan` are names, not float literals.
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() && text.contains(['.', 'e', 'E']) => {
                Ok(Argument::Float(value))
            }
            _ => Err(CliError::BadArgument(text.to_owned())),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int(value) => write!(f, "{value}"),
            Argument::Float(value) => write!(f, "{value:?}"),
            Argument::Unknown => write!(f, "?"),
        }
    }
}

/// A parsed driver invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub config: OptimizerConfig,
    pub family: RangeFamily,
    /// Wrap the call in an iteration, as in `for x in range(...)`.
    pub iterate: bool,
    pub args: Vec<Argument>,
}

/// Parse driver arguments (without the program name).
///
/// Options may appear anywhere; a negative number is a positional argument.
pub fn parse_args(args: &[String]) -> Result<Invocation, CliError> {
    let mut version = LanguageVersion::default();
    let mut threshold = None;
    let mut family = RangeFamily::Eager;
    let mut iterate = false;
    let mut positional = Vec::new();

    for arg in args {
        if let Some(value) = arg.strip_prefix("--python=") {
            version = value.parse().map_err(CliError::BadVersion)?;
        } else if let Some(value) = arg.strip_prefix("--threshold=") {
            let parsed = value
                .parse::<u64>()
                .map_err(|_| CliError::BadThreshold(value.to_owned()))?;
            threshold = Some(parsed);
        } else if arg == "--lazy" {
            family = RangeFamily::Lazy;
        } else if arg == "--iterate" {
            iterate = true;
        } else if arg.starts_with("--") {
            return Err(CliError::UnknownOption(arg.clone()));
        } else {
            positional.push(Argument::parse(arg)?);
        }
    }

    if !(1..=3).contains(&positional.len()) {
        return Err(CliError::ArgumentCount(positional.len()));
    }

    // Without an eager builtin, `range` is the lazy one.
    if !version.has_eager_range() {
        family = RangeFamily::Lazy;
    }

    let mut config = OptimizerConfig::new(version);
    if let Some(threshold) = threshold {
        config = config.with_iteration_lowering_threshold(threshold);
    }

    Ok(Invocation {
        config,
        family,
        iterate,
        args: positional,
    })
}
