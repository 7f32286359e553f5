//! `simprint fingerprint`: one token per document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{debug, info, instrument};

use crate::{
    cli::{AppContext, FeatureArgs, FingerprintArgs, OutputFormat},
    core::{
        features::{FeatureConfig, FeatureExtractor},
        token::Token,
    },
    infra::{Config, DocumentWalker, read_file_smart},
};

/// Fingerprint of one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPrint
{
    pub path: PathBuf,
    pub token: Token,
    /// Distinct features that went into the token
    pub features: usize,
}

#[derive(Serialize, Tabled)]
struct PrintRow
{
    path: String,
    token: String,
    features: usize,
}

impl FeatureArgs
{
    /// Layer command-line overrides over the configured settings.
    pub fn resolve(
        &self,
        base: &FeatureConfig,
    ) -> FeatureConfig
    {
        let mut cfg = base.clone();
        if let Some(mode) = self.mode
        {
            cfg.mode = mode;
        }
        if let Some(n) = self.ngram
        {
            cfg.ngram = n;
        }
        if let Some(n) = self.min_len
        {
            cfg.min_len = n;
        }
        if self.no_lowercase
        {
            cfg.lowercase = false;
        }
        cfg
    }
}

/// Read and fingerprint a single document.
pub fn fingerprint_file(
    path: &Path,
    extractor: &FeatureExtractor,
) -> Result<DocumentPrint>
{
    let content = read_file_smart(path)?;
    let builder = extractor.builder(&content.text());
    let token = builder.fingerprint();
    debug!(path = %path.display(), %token, features = builder.len(), "fingerprinted");

    Ok(DocumentPrint { path: path.to_path_buf(), token, features: builder.len() })
}

#[instrument(skip_all, fields(paths = args.paths.len()))]
pub fn run(
    args: FingerprintArgs,
    config: &Config,
    ctx: &AppContext,
) -> Result<()>
{
    let prints = collect_prints(&args, config, ctx)?;
    let pad = args.pad || config.fingerprint.pad;
    let render = |t: Token| if pad { t.to_padded_hex() } else { t.to_string() };

    match args.format
    {
        OutputFormat::Json | OutputFormat::Table =>
        {
            // Paths go through display() so non-UTF-8 names render lossily
            let rows: Vec<PrintRow> = prints
                .iter()
                .map(|p| PrintRow {
                    path: p
                        .path
                        .display()
                        .to_string(),
                    token: render(p.token),
                    features: p.features,
                })
                .collect();
            if matches!(args.format, OutputFormat::Json)
            {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            else
            {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Text =>
        {
            for p in &prints
            {
                let token = render(p.token);
                if ctx.no_color
                {
                    println!("{}  {}", token, p.path.display());
                }
                else
                {
                    println!("{}  {}", token.cyan(), p.path.display());
                }
            }
        }
    }

    Ok(())
}

/// Expand arguments and fingerprint every document in parallel, in argument order.
pub fn collect_prints(
    args: &FingerprintArgs,
    config: &Config,
    ctx: &AppContext,
) -> Result<Vec<DocumentPrint>>
{
    let mut ignores = config
        .ignore_patterns
        .clone();
    ignores.extend(
        args.ignore
            .iter()
            .cloned(),
    );

    let walker = DocumentWalker::new(&ignores)
        .context("Invalid ignore pattern")?
        .with_includes(&args.include)
        .context("Invalid include pattern")?
        .with_include_hidden(args.hidden || config.fingerprint.include_hidden)
        .with_max_depth(args.depth.or(config.fingerprint.max_depth));

    let files = walker.expand(&args.paths)?;
    if files.is_empty()
    {
        anyhow::bail!("No documents found under the given paths");
    }

    let features = args
        .features
        .resolve(&config.features);
    info!(documents = files.len(), mode = ?features.mode, "fingerprinting");
    let extractor = FeatureExtractor::with_config(features);

    // Set up progress bar (unless quiet mode or a single document)
    let progress = if ctx.quiet || files.len() < 2
    {
        ProgressBar::hidden()
    }
    else
    {
        let pb = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    };

    let prints = files
        .par_iter()
        .map(|path| {
            let p = fingerprint_file(path, &extractor)?;
            progress.inc(1);
            Ok(p)
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish_and_clear();
    Ok(prints)
}
