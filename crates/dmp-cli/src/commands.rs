use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info_span, warn};

use dmp_cli::batch::{BatchOptions, BatchReport, decode_lines};
use dmp_cli::config::Config;
use dmp_cli::forward::Forwarder;
use dmp_cli::summary::{attributes_table, batch_table, dictionaries_table, taxonomy_table};
use dmp_decode::{Decoder, ExclusionPolicy};
use dmp_taxonomy::Taxonomy;

use crate::cli::{AttributesArgs, DecodeArgs, ForwardArgs, InputArgs, KindArg, TaxonomyArgs};

pub fn run_inspect(config: &Config, args: &TaxonomyArgs) -> Result<()> {
    let taxonomy = load_taxonomy(config, args)?;
    println!("{}", taxonomy_table(&taxonomy));
    println!("{}", dictionaries_table(&taxonomy));
    Ok(())
}

pub fn run_attributes(config: &Config, args: &AttributesArgs) -> Result<()> {
    let taxonomy = load_taxonomy(config, &args.taxonomy)?;
    let attributes = taxonomy
        .attributes()
        .iter()
        .filter(|attribute| match args.type_filter {
            None => true,
            Some(KindArg::Direct) => attribute.kind().is_direct(),
            Some(KindArg::Referential) => !attribute.kind().is_direct(),
        });
    println!("{}", attributes_table(attributes, &taxonomy));
    Ok(())
}

pub fn run_decode(config: &Config, args: &DecodeArgs) -> Result<BatchReport> {
    let decoder = build_decoder(config, &args.taxonomy)?;
    let span = info_span!("decode");
    let _guard = span.enter();

    let input = open_input(&args.input)?;
    let mut out = BufWriter::new(io::stdout().lock());
    let report = decode_lines(&decoder, input, batch_options(&args.input), |record| {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")
    })?;
    out.flush().context("flush decoded records")?;

    eprintln!("{}", batch_table(&report));
    Ok(report)
}

pub fn run_forward(config: &Config, args: &ForwardArgs) -> Result<BatchReport> {
    let decoder = build_decoder(config, &args.taxonomy)?;
    let forwarder = Forwarder::new(&config.forward);
    let span = info_span!("forward", event_name = %args.event);
    let _guard = span.enter();
    if !forwarder.handles(&args.event) {
        warn!(event_name = %args.event, "no forwarding route for event");
    }

    let input = open_input(&args.input)?;
    let mut out = BufWriter::new(io::stdout().lock());
    let report = decode_lines(&decoder, input, batch_options(&args.input), |record| {
        for event in forwarder.project(&args.event, record) {
            serde_json::to_writer(&mut out, &event)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    })?;
    out.flush().context("flush outbound events")?;

    eprintln!("{}", batch_table(&report));
    Ok(report)
}

fn load_taxonomy(config: &Config, args: &TaxonomyArgs) -> Result<Taxonomy> {
    let path = config.taxonomy_path(args.taxonomy.as_deref());
    Taxonomy::load(&path).with_context(|| format!("load taxonomy {}", path.display()))
}

fn build_decoder(config: &Config, args: &TaxonomyArgs) -> Result<Decoder> {
    let taxonomy = load_taxonomy(config, args)?;
    let policy =
        ExclusionPolicy::default().with_extra_sentinels(config.decode.extra_sentinels.iter().cloned());
    debug!(sentinels = ?policy.sentinels(), "exclusion policy");
    Ok(Decoder::new(Arc::new(taxonomy)).with_policy(policy))
}

fn batch_options(args: &InputArgs) -> BatchOptions {
    BatchOptions {
        fail_fast: args.fail_fast,
    }
}

fn open_input(args: &InputArgs) -> Result<Box<dyn BufRead>> {
    match &args.input {
        Some(path) => open_file(path),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_file(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("open input {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
