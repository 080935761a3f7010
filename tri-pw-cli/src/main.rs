use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use env_logger::Env;

use tri_pw_core::io::corpus_name;
use tri_pw_core::model::corpus::load_table;
use tri_pw_core::{Error, FrequencyTable, Generator, PasswordRequest, RequestError, Seed, TableError};

const EXIT_FAILURE: u8 = 0x0F;
const EXIT_FAILURE_BADINPUT: u8 = 0x1F;
const EXIT_FAILURE_INTERNAL: u8 = 0xFF;

/// Generates passwords that are easier for a human to memorize.
///
/// Pass `-` in any position to use that argument's default.
#[derive(Parser, Debug)]
#[command(name = "tri-pw", version, about, allow_negative_numbers = true)]
struct Cli {
    /// Length of each password, 0..=255 [default: 9]
    length: Option<String>,

    /// Number of passwords to generate [default: 8]
    quantity: Option<String>,

    /// Capitalize every Nth letter; 0 for none, 1 for all caps [default: 6]
    word_size: Option<String>,

    /// Seed: a non-zero integer, or any text to hash [default: current time]
    seed: Option<String>,

    /// Build (or load the cached) table from this word list instead of the bundled one
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Spread generation over all CPU cores (different sequence for the same seed)
    #[arg(long)]
    parallel: bool,
}

/// How a run failed, mapped onto the process exit code.
#[derive(Debug)]
enum Failure {
    BadInput(String),
    General(String),
    Internal(String),
}

impl Failure {
    fn exit_code(&self) -> ExitCode {
        match self {
            Failure::BadInput(_) => ExitCode::from(EXIT_FAILURE_BADINPUT),
            Failure::General(_) => ExitCode::from(EXIT_FAILURE),
            Failure::Internal(_) => ExitCode::from(EXIT_FAILURE_INTERNAL),
        }
    }

    fn message(&self) -> &str {
        match self {
            Failure::BadInput(m) | Failure::General(m) | Failure::Internal(m) => m,
        }
    }
}

impl From<RequestError> for Failure {
    fn from(e: RequestError) -> Self {
        Failure::BadInput(e.to_string())
    }
}

impl From<TableError> for Failure {
    fn from(e: TableError) -> Self {
        Failure::General(e.to_string())
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        match e {
            Error::Table(e) => e.into(),
            e if e.is_bad_input() => Failure::BadInput(e.to_string()),
            e => Failure::Internal(e.to_string()),
        }
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Self {
        Failure::General(format!("cannot write output: {e}"))
    }
}

/// Parses a positional argument, treating a missing value or `-` as "default".
fn positional<T: FromStr>(name: &str, value: Option<&str>) -> Result<Option<T>, Failure> {
    match value {
        None | Some("-") => Ok(None),
        Some(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Failure::BadInput(format!("{name}: '{s}' is not an integer"))),
    }
}

impl Cli {
    fn request(&self) -> Result<PasswordRequest, Failure> {
        Ok(PasswordRequest {
            length: positional("length", self.length.as_deref())?,
            quantity: positional("quantity", self.quantity.as_deref())?,
            word_size: positional("word size", self.word_size.as_deref())?,
            seed: match self.seed.as_deref() {
                None | Some("-") => None,
                Some(s) => Some(Seed::parse(s)),
            },
        })
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let request = cli.request()?.resolve()?;
    if request.is_noop() {
        // Nothing to print: length 0 or quantity 0.
        return Ok(());
    }

    let loaded;
    let table: &FrequencyTable = match &cli.corpus {
        Some(path) => {
            loaded = load_table(path)?;
            log::debug!("using corpus '{}'", corpus_name(path).unwrap_or_default());
            &loaded
        }
        None => FrequencyTable::builtin(),
    };
    let generator = Generator::new(table)?;
    log::debug!("seed = {}", request.seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.parallel {
        for password in generator.generate_batch_parallel(&request)? {
            writeln!(out, "{password}")?;
        }
    } else {
        let mut rng = request.seed.rng();
        for password in generator.batch(&request, &mut rng) {
            writeln!(out, "{}", password?)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            log::error!("{}", failure.message());
            failure.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tri-pw").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn dashes_keep_defaults() {
        let request = cli(&["-", "3", "-", "42"]).request().unwrap();
        assert_eq!(
            request,
            PasswordRequest { length: None, quantity: Some(3), word_size: None, seed: Some(Seed(42)) }
        );
    }

    #[test]
    fn text_seed_is_hashed() {
        let request = cli(&["9", "1", "6", "hello"]).request().unwrap();
        assert_eq!(request.seed, Some(Seed(0x4E28_23C5)));
    }

    #[test]
    fn negative_values_reach_validation() {
        let request = cli(&["-4"]).request().unwrap();
        assert_eq!(request.length, Some(-4));
        let failure: Failure = request.resolve().unwrap_err().into();
        assert!(matches!(failure, Failure::BadInput(_)));
    }

    #[test]
    fn oversized_quantity_is_bad_input() {
        let request = cli(&["9", "9223372036854775807", "-", "1", "--parallel"]).request().unwrap();
        let failure: Failure = request.resolve().unwrap_err().into();
        assert!(matches!(failure, Failure::BadInput(_)));
        assert!(matches!(run(&cli(&["9", "9223372036854775807", "-", "1", "--parallel"])), Err(Failure::BadInput(_))));
    }

    #[test]
    fn garbage_is_bad_input() {
        assert!(matches!(cli(&["nine"]).request(), Err(Failure::BadInput(_))));
    }

    #[test]
    fn zero_length_is_a_quiet_success() {
        assert!(run(&cli(&["0", "5"])).is_ok());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(Failure::BadInput(String::new()).exit_code(), ExitCode::from(0x1F));
        assert_eq!(Failure::General(String::new()).exit_code(), ExitCode::from(0x0F));
        assert_eq!(Failure::Internal(String::new()).exit_code(), ExitCode::from(0xFF));
    }
}
