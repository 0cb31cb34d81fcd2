use std::fmt;
use std::path::{Path, PathBuf};

use quiz_core::model::{Question, QuestionId, TestType, sample_questions};
use serde::Deserialize;
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    test_types: Vec<TestType>,
    file: Option<PathBuf>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTestType { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTestType { raw } => {
                write!(f, "invalid --test-type value (expected quick, free or all): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_test_types(raw: &str) -> Result<Vec<TestType>, ArgsError> {
    if raw == "all" {
        return Ok(TestType::ALL.to_vec());
    }
    raw.parse::<TestType>()
        .map(|test_type| vec![test_type])
        .map_err(|_| ArgsError::InvalidTestType {
            raw: raw.to_string(),
        })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("QUIZ_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut test_types = match std::env::var("QUIZ_TEST_TYPE") {
            Ok(value) => parse_test_types(&value)?,
            Err(_) => TestType::ALL.to_vec(),
        };
        let mut file = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--test-type" => {
                    let value = require_value(&mut args, "--test-type")?;
                    test_types = parse_test_types(&value)?;
                }
                "--file" => {
                    let value = require_value(&mut args, "--file")?;
                    file = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            test_types,
            file,
        })
    }
}

/// One entry of a JSON question file.
#[derive(Debug, Deserialize)]
struct QuestionSeed {
    id: u64,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
}

fn load_questions(path: &Path) -> Result<Vec<Question>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    let seeds: Vec<QuestionSeed> = serde_json::from_str(&raw)?;
    let mut questions = Vec::with_capacity(seeds.len());
    for seed in seeds {
        questions.push(Question::new(
            QuestionId::new(seed.id),
            seed.prompt,
            seed.options,
            seed.correct_answer,
        )?);
    }
    Ok(questions)
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --test-type <kind>        quick, free or all (default: all)");
    eprintln!("  --file <path.json>        Questions to load instead of the sample bank");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_DB_URL, QUIZ_TEST_TYPE");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let questions = match &args.file {
        Some(path) => load_questions(path)?,
        None => sample_questions(),
    };

    let storage = Storage::sqlite(&args.db_url).await?;
    for test_type in &args.test_types {
        for (position, question) in questions.iter().enumerate() {
            let position = u32::try_from(position)?;
            storage
                .questions
                .upsert_question(*test_type, position, question)
                .await?;
        }
    }

    println!(
        "Seeded {} questions into {} bank(s) in {}",
        questions.len(),
        args.test_types.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
