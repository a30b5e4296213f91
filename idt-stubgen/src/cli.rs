/// Argument handling and output plumbing for the `idt-stubgen` binary.
///
/// Precedence: built-in defaults, then the `--config` file, then flags.
use crate::config::{GeneratorConfig, Section};
use crate::emit;
use crate::error::Error;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: idt-stubgen [options]
  Emits C interrupt handler stubs and IDT gate registrations to stdout.

Options:
  -l, --lower N           first vector (default 19)
  -u, --upper N           one past the last vector (default 256)
  -s, --section NAME      all | handlers | gates | prototypes (default all)
  -c, --config PATH       JSON config file
      --wrap-gates NAME   wrap gate registrations in `void NAME(void) { ... }`
  -o, --output PATH       write to PATH instead of stdout
  -h, --help              show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Generate(Invocation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub config: GeneratorConfig,
    pub output: Option<PathBuf>,
}

#[derive(Default)]
struct Overrides {
    lower: Option<u32>,
    upper: Option<u32>,
    section: Option<Section>,
    wrap_gates: Option<String>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<Command, Error>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut overrides = Overrides::default();
    let mut config_path: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lower" | "-l" => {
                overrides.lower = Some(parse_number(&arg, next_value(&mut args, &arg)?)?);
            }
            "--upper" | "-u" => {
                overrides.upper = Some(parse_number(&arg, next_value(&mut args, &arg)?)?);
            }
            "--section" | "-s" => {
                overrides.section = Some(Section::parse(&next_value(&mut args, &arg)?)?);
            }
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(next_value(&mut args, &arg)?));
            }
            "--wrap-gates" => {
                overrides.wrap_gates = Some(next_value(&mut args, &arg)?);
            }
            "--output" | "-o" => {
                output = Some(PathBuf::from(next_value(&mut args, &arg)?));
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(Error::UnknownFlag(arg)),
        }
    }

    let mut config = match &config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(lower) = overrides.lower {
        config.lower = lower;
    }
    if let Some(upper) = overrides.upper {
        config.upper = upper;
    }
    if let Some(section) = overrides.section {
        config.section = section;
    }
    if let Some(name) = overrides.wrap_gates {
        config.wrap_gates = Some(name);
    }
    config.validate()?;

    Ok(Command::Generate(Invocation { config, output }))
}

fn next_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, Error> {
    args.next().ok_or_else(|| Error::MissingValue(flag.to_string()))
}

fn parse_number(flag: &str, value: String) -> Result<u32, Error> {
    value.parse().map_err(|_| Error::InvalidNumber {
        flag: flag.to_string(),
        value,
    })
}

/// Generate and write the output for one invocation.
pub fn run(invocation: &Invocation) -> Result<(), Error> {
    match &invocation.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            emit::emit_to(&invocation.config, std::io::BufWriter::new(file)).map_err(
                |source| Error::Write {
                    path: path.clone(),
                    source,
                },
            )?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            emit::emit_to(&invocation.config, stdout.lock()).map_err(Error::Stdout)?;
        }
    }
    Ok(())
}
