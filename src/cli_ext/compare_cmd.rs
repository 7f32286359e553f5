//! `simprint compare`: distance and similarity of two tokens or documents.

use std::path::Path;

use anyhow::Result;
use miette::Diagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{debug, instrument};

use crate::{
    cli::{AppContext, CompareArgs, OutputFormat},
    cli_ext::fingerprint_cmd::fingerprint_file,
    core::{
        features::FeatureExtractor,
        similarity::{TokenPolicy, hamming_distance, similarity_from_distance},
        token::{ParseError, Token},
    },
    infra::Config,
};

/// Result of comparing two fingerprints.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Comparison
{
    pub left: Token,
    pub right: Token,
    pub distance: u32,
    pub similarity: f64,
    pub near_duplicate: bool,
}

impl Comparison
{
    pub fn new(
        left: Token,
        right: Token,
        threshold: f64,
    ) -> Self
    {
        let distance = hamming_distance(left.value(), right.value());
        let similarity = similarity_from_distance(distance);
        Self { left, right, distance, similarity, near_duplicate: similarity >= threshold }
    }
}

/// Pick the token policy from flags, falling back to configuration.
fn policy_for(
    args: &CompareArgs,
    config: &Config,
) -> TokenPolicy
{
    if args.lenient
    {
        TokenPolicy::Lenient
    }
    else if args.strict
    {
        TokenPolicy::Strict
    }
    else
    {
        config
            .compare
            .policy
    }
}

/// Attach the diagnostic help line to a token parse failure.
fn with_help(e: ParseError) -> anyhow::Error
{
    let help = e
        .help()
        .map(|h| h.to_string());
    match help
    {
        Some(help) => anyhow::anyhow!("{e}\nhelp: {help}"),
        None => e.into(),
    }
}

#[instrument(skip_all, fields(files = args.files))]
pub fn run(
    args: CompareArgs,
    config: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let threshold = args
        .threshold
        .unwrap_or(config.compare.threshold);

    let (left, right) = if args.files
    {
        let extractor = FeatureExtractor::with_config(
            args.features
                .resolve(&config.features),
        );
        let l = fingerprint_file(Path::new(&args.left), &extractor)?;
        let r = fingerprint_file(Path::new(&args.right), &extractor)?;
        (l.token, r.token)
    }
    else
    {
        let policy = policy_for(&args, config);
        debug!(?policy, "parsing tokens");
        let l = policy
            .parse(&args.left)
            .map_err(with_help)?;
        let r = policy
            .parse(&args.right)
            .map_err(with_help)?;
        (Token(l), Token(r))
    };

    let cmp = Comparison::new(left, right, threshold);

    match args.format
    {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cmp)?),
        OutputFormat::Table => println!("{}", Table::new([cmp.clone()])),
        OutputFormat::Text =>
        {
            let verdict = if cmp.near_duplicate { "near-duplicate" } else { "distinct" };
            if ctx.no_color
            {
                println!("distance {}  similarity {:.2}%  {}", cmp.distance, cmp.similarity, verdict);
            }
            else if cmp.near_duplicate
            {
                println!(
                    "distance {}  similarity {}  {}",
                    cmp.distance.bold(),
                    format!("{:.2}%", cmp.similarity).green(),
                    verdict.green()
                );
            }
            else
            {
                println!(
                    "distance {}  similarity {}  {}",
                    cmp.distance.bold(),
                    format!("{:.2}%", cmp.similarity).yellow(),
                    verdict.yellow()
                );
            }
        }
    }

    Ok(())
}
