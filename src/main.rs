//! Identity Seed CLI
//!
//! Derives a BIP-39 mnemonic from identity-document data and a PIN, given
//! either as flags or through interactive prompts.

use clap::{Args, Parser};
use identity_seed::{
    bind_account,
    derivation::{ConfigError, DerivationConfig},
    Chain, DocumentInput, FileConfig, IdentityError, ManualInput, MnemonicSentence, MrzInput,
    Secret, VERSION,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{error, info};
use zeroize::Zeroizing;

/// Derive a deterministic mnemonic from an identity document and a PIN.
#[derive(Parser, Debug)]
#[command(name = "identity-seed", version, about, long_about = None)]
struct Cli {
    /// Numeric PIN, 4 to 12 digits. Prompted for (hidden) when omitted.
    #[arg(long)]
    pin: Option<String>,

    #[command(flatten)]
    manual: ManualArgs,

    #[command(flatten)]
    mrz: MrzArgs,

    /// Chain whose hash finalises the seed (ETH, BTC or SOL).
    #[arg(long)]
    chain: Option<String>,

    /// Mnemonic length in words (12, 18 or 24).
    #[arg(long)]
    words: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Manually entered document fields.
#[derive(Args, Debug, Default)]
struct ManualArgs {
    #[arg(long)]
    names: Option<String>,
    #[arg(long)]
    surname: Option<String>,
    /// Date of birth, DDMMYYYY.
    #[arg(long)]
    birth_date: Option<String>,
    /// Date of expiry, DDMMYYYY.
    #[arg(long)]
    expire_date: Option<String>,
    /// Date of issue, DDMMYYYY.
    #[arg(long)]
    issue_date: Option<String>,
    #[arg(long)]
    nationality: Option<String>,
    #[arg(long)]
    sex: Option<String>,
    #[arg(long)]
    birthplace: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    #[arg(long)]
    authority: Option<String>,
    #[arg(long)]
    eye_color: Option<String>,
    #[arg(long)]
    hair_color: Option<String>,
    #[arg(long)]
    mother_names: Option<String>,
    #[arg(long)]
    mother_surname: Option<String>,
    #[arg(long)]
    father_names: Option<String>,
    #[arg(long)]
    father_surname: Option<String>,
    #[arg(long)]
    height: Option<String>,
    #[arg(long)]
    weight: Option<String>,
    /// Document number.
    #[arg(long)]
    doc_num: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    misc1: Option<String>,
    #[arg(long)]
    misc2: Option<String>,
    #[arg(long)]
    misc3: Option<String>,
}

impl From<ManualArgs> for ManualInput {
    fn from(args: ManualArgs) -> Self {
        ManualInput {
            names: args.names,
            surname: args.surname,
            birth_date: args.birth_date,
            expire_date: args.expire_date,
            issue_date: args.issue_date,
            nationality: args.nationality,
            sex: args.sex,
            birthplace: args.birthplace,
            origin: args.origin,
            authority: args.authority,
            eye_color: args.eye_color,
            hair_color: args.hair_color,
            mother_names: args.mother_names,
            mother_surname: args.mother_surname,
            father_names: args.father_names,
            father_surname: args.father_surname,
            height: args.height,
            weight: args.weight,
            doc_num: args.doc_num,
            address: args.address,
            misc1: args.misc1,
            misc2: args.misc2,
            misc3: args.misc3,
        }
    }
}

/// Machine-readable zone rows: three for Type 1, two for Type 3.
#[derive(Args, Debug, Default)]
struct MrzArgs {
    /// First MRZ row.
    #[arg(long)]
    row1: Option<String>,
    /// Second MRZ row.
    #[arg(long)]
    row2: Option<String>,
    /// Third MRZ row (Type 1 only).
    #[arg(long)]
    row3: Option<String>,
}

impl MrzArgs {
    fn rows(self) -> Vec<String> {
        [self.row1, self.row2, self.row3]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(&'static str),
}

/// Where the document comes from once the flags are read.
#[derive(Debug)]
enum DocumentSource {
    Flags(DocumentInput),
    Prompt,
}

fn main() {
    // Initialize logging; stdout carries only the mnemonic
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Identity Seed v{}", VERSION);

    match run(cli, io::stdin().is_terminal()) {
        Ok(sentence) => println!("{}", sentence),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, interactive: bool) -> Result<MnemonicSentence, CliError> {
    let mut derivation = match &cli.config {
        Some(path) => FileConfig::from_file(path)?.derivation,
        None => DerivationConfig::default(),
    };
    apply_overrides(&mut derivation, cli.chain.as_deref(), cli.words.as_deref())?;
    derivation.bind_options()?;

    let mut pin = cli.pin.map(Zeroizing::new);
    if pin.is_none() && interactive {
        pin = Some(Zeroizing::new(rpassword::prompt_password("PIN: ")?));
    }
    let pin = pin.as_deref().map(String::as_str);
    Secret::parse(pin)?;

    let source = select_document(ManualInput::from(cli.manual), cli.mrz.rows(), interactive)?;
    let input = match source {
        DocumentSource::Flags(input) => input,
        DocumentSource::Prompt => {
            let mut lines = io::stdin().lock();
            let input = prompt_document(&mut lines)?;
            if cli.chain.is_none() {
                prompt_chain(&mut lines, &mut derivation)?;
            }
            if cli.words.is_none() {
                prompt_words(&mut lines, &mut derivation)?;
            }
            input
        }
    };
    let opts = derivation.bind_options()?;

    info!(
        kind = input.kind(),
        chain = %opts.chain,
        words = opts.phrase_length.word_count(),
        "Deriving mnemonic"
    );

    Ok(bind_account(pin, &input, &opts)?)
}

/// Applies `--chain` and `--words` on top of the file configuration.
fn apply_overrides(
    derivation: &mut DerivationConfig,
    chain: Option<&str>,
    words: Option<&str>,
) -> Result<(), CliError> {
    if let Some(chain) = chain {
        derivation.chain = chain.parse::<Chain>()?;
    }
    if let Some(words) = words {
        derivation.words = parse_words(words)?;
    }
    Ok(())
}

fn parse_words(words: &str) -> Result<usize, CliError> {
    words
        .trim()
        .parse()
        .map_err(|_| CliError::Usage("phrase length must be 12, 18 or 24"))
}

/// Picks the document from the flags, or defers to prompts on a terminal.
fn select_document(
    manual: ManualInput,
    rows: Vec<String>,
    interactive: bool,
) -> Result<DocumentSource, CliError> {
    match (manual.is_empty(), rows.is_empty()) {
        (false, false) => Err(CliError::Usage(
            "manual fields and MRZ rows cannot be combined",
        )),
        (false, true) => Ok(DocumentSource::Flags(manual.into())),
        (true, false) => Ok(DocumentSource::Flags(MrzInput::from_rows(&rows)?.into())),
        (true, true) if interactive => Ok(DocumentSource::Prompt),
        (true, true) => Err(CliError::Usage("no document data was provided")),
    }
}

/// Asks for the document shape, then for each of its fields.
fn prompt_document(lines: &mut impl BufRead) -> Result<DocumentInput, CliError> {
    let shape = prompt(lines, "Document data: (1) manual fields, (2) MRZ rows [1]")?;
    match shape.as_deref() {
        None | Some("1") => Ok(prompt_manual(lines)?.into()),
        Some("2") => {
            let mut rows = Vec::with_capacity(3);
            for label in ["MRZ row 1", "MRZ row 2", "MRZ row 3 (blank for Type 3)"] {
                rows.extend(prompt(lines, label)?);
            }
            Ok(MrzInput::from_rows(&rows)?.into())
        }
        Some(_) => Err(CliError::Usage("expected 1 or 2")),
    }
}

/// Asks for the chain; blank keeps the configured one.
fn prompt_chain(
    lines: &mut impl BufRead,
    derivation: &mut DerivationConfig,
) -> Result<(), CliError> {
    let label = format!("Chain (ETH/BTC/SOL) [{}]", derivation.chain);
    if let Some(chain) = prompt(lines, &label)? {
        derivation.chain = chain.parse::<Chain>()?;
    }
    Ok(())
}

/// Asks for the phrase length; blank keeps the configured one.
fn prompt_words(
    lines: &mut impl BufRead,
    derivation: &mut DerivationConfig,
) -> Result<(), CliError> {
    let label = format!("Phrase length (12/18/24) [{}]", derivation.words);
    if let Some(words) = prompt(lines, &label)? {
        derivation.words = parse_words(&words)?;
    }
    Ok(())
}

/// Prompts for every manual field; blank answers are skipped.
fn prompt_manual(lines: &mut impl BufRead) -> io::Result<ManualInput> {
    let mut input = ManualInput::default();
    let fields = [
        ("Names", &mut input.names),
        ("Surname", &mut input.surname),
        ("Birth date (DDMMYYYY)", &mut input.birth_date),
        ("Expire date (DDMMYYYY)", &mut input.expire_date),
        ("Issue date (DDMMYYYY)", &mut input.issue_date),
        ("Nationality", &mut input.nationality),
        ("Sex", &mut input.sex),
        ("Birthplace", &mut input.birthplace),
        ("Origin", &mut input.origin),
        ("Authority", &mut input.authority),
        ("Eye color", &mut input.eye_color),
        ("Hair color", &mut input.hair_color),
        ("Mother names", &mut input.mother_names),
        ("Mother surname", &mut input.mother_surname),
        ("Father names", &mut input.father_names),
        ("Father surname", &mut input.father_surname),
        ("Height", &mut input.height),
        ("Weight", &mut input.weight),
        ("Document number", &mut input.doc_num),
        ("Address", &mut input.address),
        ("Misc 1", &mut input.misc1),
        ("Misc 2", &mut input.misc2),
        ("Misc 3", &mut input.misc3),
    ];
    for (label, slot) in fields {
        *slot = prompt(lines, label)?;
    }
    Ok(input)
}

/// Writes `label` to stderr and reads one trimmed line; blank is `None`.
fn prompt(lines: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    let mut stderr = io::stderr();
    write!(stderr, "{}: ", label)?;
    stderr.flush()?;

    let mut line = String::new();
    lines.read_line(&mut line)?;
    let value = line.trim();
    Ok((!value.is_empty()).then(|| value.to_owned()))
}
