use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use promptframe_io::catalog_json::catalog_to_json_string;
use promptframe_io::document_json::document_to_json_string;
use promptframe_io::engine::extract_all_segments;
use promptframe_io::inject_json::parse_inject_item_arg;
use promptframe_io::prelude::*;

mod confirm;
mod table;

use confirm::PromptConfirmer;

/// Exit code when a section removal was declined.
const EXIT_DECLINED: i32 = 3;

#[derive(Debug, Parser)]
#[command(name = "promptframe", version, about = "Structured prompt section tooling")]
struct Cli {
    /// Framework catalog JSON (defaults to the built-in catalog)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List frameworks and their sections.
    Frameworks {
        /// Also list labels that are prefixes of other labels
        #[arg(long)]
        collisions: bool,
        /// Print the catalog as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the framework sections found in a document.
    Inspect {
        /// Editor document JSON path
        document: PathBuf,
        #[arg(long)]
        framework: String,
    },
    /// Put a framework's placeholder sections into a document.
    Apply {
        /// Editor document JSON path
        document: PathBuf,
        #[arg(long)]
        framework: String,
        /// Section keys to emit (defaults to the framework's defaults)
        #[arg(long, value_delimiter = ',')]
        sections: Option<Vec<String>>,
        /// replace or insert-top; required when the document has text
        #[arg(long)]
        mode: Option<ApplyMode>,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
    /// Rewrite a document so its sections match a selection.
    Sync {
        /// Editor document JSON path
        document: PathBuf,
        #[arg(long)]
        framework: String,
        /// Desired section keys, comma-separated ("" for none)
        #[arg(long, value_delimiter = ',', required = true)]
        sections: Vec<String>,
        /// Approve every removal
        #[arg(long, conflicts_with = "no")]
        yes: bool,
        /// Decline every removal
        #[arg(long)]
        no: bool,
        /// Print the operation report as JSON on stderr
        #[arg(long)]
        report: bool,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        min: bool,
    },
    /// Place external text into ROLE / CONTEXT / CONSTRAINTS sections.
    Inject {
        /// Editor document JSON path
        document: PathBuf,
        /// TARGET=TEXT, repeatable
        #[arg(long = "item", conflicts_with = "items")]
        item: Vec<String>,
        /// JSON file with [{"target", "text"}] items
        #[arg(long)]
        items: Option<PathBuf>,
        /// Each missing section goes to the very top (last item ends up first)
        #[arg(long)]
        stacked: bool,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        min: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = load_registry(cli.catalog.as_deref())?;

    match cli.cmd {
        Command::Frameworks { collisions, json } => {
            if json {
                println!("{}", catalog_to_json_string(&registry)?);
            } else {
                table::print_frameworks(&registry)?;
            }
            if collisions {
                println!();
                table::print_collisions(&registry.prefix_collisions())?;
            }
        }
        Command::Inspect { document, framework } => {
            let doc = read_document(&document)?;
            let framework = find_framework(&registry, &framework)?;
            let segments = extract_all_segments(&registry, &doc, framework);
            table::print_segments(&registry, &doc, &segments)?;
        }
        Command::Apply {
            document,
            framework,
            sections,
            mode,
            out,
            min,
        } => {
            let doc = read_document(&document)?;
            let next = apply(&registry, &doc, &framework, sections.as_deref(), mode)?;
            tracing::info!(framework = %framework, "framework applied");
            write_document(&next, out.as_deref(), min)?;
        }
        Command::Sync {
            document,
            framework,
            sections,
            yes,
            no,
            report,
            out,
            min,
        } => {
            let doc = read_document(&document)?;
            let framework = find_framework(&registry, &framework)?;
            let desired = section_keys(framework, &sections)?;

            let result = if yes {
                reconcile(&registry, &doc, framework, &desired, &mut AlwaysConfirm)
            } else if no {
                reconcile(&registry, &doc, framework, &desired, &mut NeverConfirm)
            } else {
                let stdin = io::stdin();
                let mut confirmer = PromptConfirmer::new(stdin.lock(), io::stderr());
                reconcile(&registry, &doc, framework, &desired, &mut confirmer)
            };

            if report {
                eprintln!("{}", serde_json::to_string_pretty(&result.report)?);
            }
            if !result.applied {
                let declined = result
                    .report
                    .declined
                    .as_ref()
                    .map(SectionKey::as_str)
                    .unwrap_or_default();
                eprintln!("aborted: removal of section '{declined}' was declined");
                process::exit(EXIT_DECLINED);
            }

            tracing::info!(
                framework = %framework.id,
                changed = result.report.changed(),
                "sections synced"
            );
            write_document(&result.document, out.as_deref(), min)?;
        }
        Command::Inject {
            document,
            item,
            items,
            stacked,
            out,
            min,
        } => {
            let doc = read_document(&document)?;
            let items = match items {
                Some(path) => {
                    let s = read_to_string(&path)?;
                    parse_inject_items_json_str(&s)
                        .with_context(|| format!("in {}", path.display()))?
                }
                None => item
                    .iter()
                    .map(|arg| {
                        parse_inject_item_arg(arg)
                            .with_context(|| format!("--item '{arg}' must look like TARGET=TEXT"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?,
            };
            if items.is_empty() {
                bail!("nothing to inject: pass --item TARGET=TEXT or --items FILE");
            }

            let options = InjectOptions {
                missing_placement: if stacked {
                    MissingPlacement::Stacked
                } else {
                    MissingPlacement::InputOrder
                },
            };
            let injected = inject(&registry, &doc, &items, options);
            tracing::info!(
                items = items.len(),
                changed = injected.report.changed(),
                "context injected"
            );
            write_document(&injected.document, out.as_deref(), min)?;
        }
    }

    Ok(())
}

/// Walk the framework panel flow: select, pick sections, apply.
fn apply(
    registry: &Registry,
    doc: &Document,
    framework_id: &str,
    sections: Option<&[String]>,
    mode: Option<ApplyMode>,
) -> anyhow::Result<Document> {
    let framework = find_framework(registry, framework_id)?;
    let mut session = FrameworkSession::new(registry);
    session.select_framework(Some(&framework.id))?;

    if let Some(sections) = sections {
        let wanted = section_keys(framework, sections)?;
        for key in framework.section_keys() {
            // Not applied yet, so this only edits the selection.
            session.toggle_section(doc, key, wanted.contains(key), &mut NeverConfirm)?;
        }
    }

    match session.apply(doc)? {
        ApplyDecision::Applied(next) => Ok(next),
        ApplyDecision::Pending => match mode {
            Some(mode) => Ok(session.commit_apply(doc, mode)?),
            None => bail!("document already has text; pass --mode replace or --mode insert-top"),
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(level),
        )
        .try_init();
}

fn load_registry(catalog: Option<&Path>) -> anyhow::Result<Registry> {
    match catalog {
        None => Ok(Registry::builtin()),
        Some(path) => {
            let s = read_to_string(path)?;
            let registry = parse_catalog_json_str(&s).with_context(|| format!("in {}", path.display()))?;
            tracing::debug!(
                path = %path.display(),
                frameworks = registry.frameworks().len(),
                "catalog loaded"
            );
            Ok(registry)
        }
    }
}

fn find_framework<'r>(registry: &'r Registry, id: &str) -> anyhow::Result<&'r Framework> {
    match registry.framework(&FrameworkId::new(id)) {
        Some(framework) => Ok(framework),
        None => {
            let known: Vec<&str> = registry.frameworks().iter().map(|f| f.id.as_str()).collect();
            bail!("unknown framework '{id}' (known: {})", known.join(", "))
        }
    }
}

/// Section keys from the command line, checked against the framework.
fn section_keys(framework: &Framework, raw: &[String]) -> anyhow::Result<Vec<SectionKey>> {
    let mut keys = Vec::new();
    for key in raw.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        let key = SectionKey::new(key);
        if framework.section(&key).is_none() {
            bail!("framework '{}' has no section '{key}'", framework.id);
        }
        keys.push(key);
    }
    Ok(keys)
}

fn read_to_string(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let s = read_to_string(path)?;
    parse_document_json_str(&s).with_context(|| format!("in {}", path.display()))
}

fn write_document(doc: &Document, out: Option<&Path>, min: bool) -> anyhow::Result<()> {
    let json = document_to_json_string(doc, !min)?;
    match out {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
