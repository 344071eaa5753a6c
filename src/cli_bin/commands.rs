//! CLI command handlers that bridge CLI arguments to library operations
//!
//! Every command follows the same flow: resolve files, read and index each
//! document, apply the `--step` chain, run the operation and print the
//! result. A single file prints its result directly; several files print an
//! object keyed by file path, and a file that fails does not stop the rest.

use crate::cli_bin::args::*;
use idxjson::core::pipeline;
use idxjson::error::{IdxJsonError, Result};
use idxjson::io::{DocumentReader, FileResolver, ReaderConfig, ResolverConfig};
use idxjson::{parse_query_value, IndexedJson, Step};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Execute the tag command
pub fn tag_command(args: TagArgs) -> Result<()> {
    debug!("Executing tag command with args: {:?}", args);

    run_query(&args.files, &args.query, &args.output, |index| {
        let entry = index.get_by_tag(&args.tag);
        if entry.is_none() {
            info!("No node tagged '{}'", args.tag);
        }
        to_json(&entry)
    })
}

/// Execute the get command
pub fn get_command(args: KeyValueArgs) -> Result<()> {
    debug!("Executing get command with args: {:?}", args);

    let value = parse_query_value(&args.value);
    run_query(&args.files, &args.query, &args.output, |index| {
        let entry = index.get_by_key_value(&args.key, &value);
        if entry.is_none() {
            info!("No node with '{}' matching {}", args.key, value);
        }
        to_json(&entry)
    })
}

/// Execute the tag-of command
pub fn tag_of_command(args: KeyValueArgs) -> Result<()> {
    debug!("Executing tag-of command with args: {:?}", args);

    let value = parse_query_value(&args.value);
    run_query(&args.files, &args.query, &args.output, |index| {
        to_json(&index.tag_of(&args.key, &value))
    })
}

/// Execute the values command
pub fn values_command(args: CollectArgs) -> Result<()> {
    debug!("Executing values command with args: {:?}", args);

    run_query(&args.files, &args.query, &args.output, |index| {
        to_json(&index.collect_values(args.key.as_deref()))
    })
}

/// Execute the keys command
pub fn keys_command(args: CollectArgs) -> Result<()> {
    debug!("Executing keys command with args: {:?}", args);

    run_query(&args.files, &args.query, &args.output, |index| {
        to_json(&index.collect_keys(args.key.as_deref()))
    })
}

/// Execute the filter command
pub fn filter_command(args: FilterArgs) -> Result<()> {
    debug!("Executing filter command with args: {:?}", args);

    let value = args.value.as_deref().map(parse_query_value);
    run_query(&args.files, &args.query, &args.output, |index| {
        nodes_or_tags(&index.filter(&args.key, value.as_ref()), args.tags)
    })
}

/// Execute the filter-value command
pub fn filter_value_command(args: FilterValueArgs) -> Result<()> {
    debug!("Executing filter-value command with args: {:?}", args);

    let value = parse_query_value(&args.value);
    run_query(&args.files, &args.query, &args.output, |index| {
        nodes_or_tags(&index.filter_by_value(&value), args.tags)
    })
}

/// Execute the children command
pub fn children_command(args: ChildrenArgs) -> Result<()> {
    debug!("Executing children command with args: {:?}", args);

    run_query(&args.files, &args.query, &args.output, |index| {
        nodes_or_tags(&index.children_of(&args.key), args.tags)
    })
}

// Helper functions

fn run_query<F>(
    file_options: &CommonFileOptions,
    query: &QueryOptions,
    output: &OutputOptions,
    operation: F,
) -> Result<()>
where
    F: for<'a> Fn(&IndexedJson<'a>) -> Result<Value>,
{
    let steps = parse_steps(&query.steps)?;
    let files = resolve_files(file_options)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(());
    }

    let reader = create_reader(file_options);

    if let [file] = files.as_slice() {
        let result = query_file(&reader, file, &steps, &operation)?;
        return output_value(&result, output);
    }

    let (results, failures) = query_batch(&reader, &files, &steps, &operation);
    output_value(&Value::Object(results), output)?;
    batch_outcome(failures)
}

fn query_file<F>(
    reader: &DocumentReader,
    file: &Path,
    steps: &[Step],
    operation: &F,
) -> Result<Value>
where
    F: for<'a> Fn(&IndexedJson<'a>) -> Result<Value>,
{
    debug!("Processing file: {}", file.display());

    let document = reader.read_file(file)?;
    let index = IndexedJson::new(&document);
    debug!("Indexed {} nodes from {}", index.len(), file.display());

    let narrowed = pipeline::run(&index, steps);
    operation(&narrowed)
}

/// Run the operation over every file, keyed by path
///
/// Recoverable failures (a document that does not parse, a file over the
/// size limit) are skipped with a warning. The rest are returned alongside
/// the results of the files that succeeded.
fn query_batch<F>(
    reader: &DocumentReader,
    files: &[PathBuf],
    steps: &[Step],
    operation: &F,
) -> (Map<String, Value>, Vec<IdxJsonError>)
where
    F: for<'a> Fn(&IndexedJson<'a>) -> Result<Value>,
{
    let mut results = Map::new();
    let mut failures = Vec::new();

    for file in files {
        match query_file(reader, file, steps, operation) {
            Ok(result) => {
                results.insert(file.to_string_lossy().to_string(), result);
            }
            Err(err) if err.is_recoverable() => {
                warn!("Skipping {} [{}]: {}", file.display(), err.severity(), err);
            }
            Err(err) => {
                error!("{} [{}]: {}", file.display(), err.severity(), err);
                failures.push(err);
            }
        }
    }

    (results, failures)
}

fn batch_outcome(mut failures: Vec<IdxJsonError>) -> Result<()> {
    match failures.len() {
        0 => Ok(()),
        1 => Err(failures.remove(0)),
        _ => Err(IdxJsonError::multiple(failures)),
    }
}

fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    raw.iter().map(|step| step.parse()).collect()
}

fn resolve_files(file_options: &CommonFileOptions) -> Result<Vec<PathBuf>> {
    let defaults = ResolverConfig::default();
    let config = ResolverConfig {
        follow_links: file_options.follow_links,
        max_depth: file_options.max_depth,
        include_hidden: file_options.include_hidden,
        include_extensions: if file_options.extensions.is_empty() {
            defaults.include_extensions
        } else {
            file_options.extensions.clone()
        },
        exclude_patterns: file_options.exclude_patterns.clone(),
    };

    let resolver = FileResolver::with_config(config);
    let resolved = resolver.resolve_paths(&file_options.files)?;

    Ok(resolved
        .into_iter()
        .map(|f| f.path().to_path_buf())
        .collect())
}

fn create_reader(file_options: &CommonFileOptions) -> DocumentReader {
    DocumentReader::with_config(ReaderConfig {
        format: file_options.input_format.map(Into::into),
        ..Default::default()
    })
}

fn nodes_or_tags(index: &IndexedJson<'_>, tags_only: bool) -> Result<Value> {
    if tags_only {
        to_json(&index.collect_keys(None))
    } else {
        to_json(index)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(IdxJsonError::from)
}

fn output_value(value: &Value, output: &OutputOptions) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            let rendered = if output.pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{}", rendered);
        }
        OutputFormat::Yaml => {
            let rendered = serde_yaml::to_string(value)?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
