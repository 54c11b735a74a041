//! schema.org Graph CLI
//!
//! Command-line tool for rendering a page's schema.org JSON-LD graph from a
//! file of node descriptions.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use schema_org_graph::{
    build_resolved_graph, dedupe_and_flatten_nodes, render_nodes_to_schema_org_html,
    render_nodes_to_schema_org_json, GraphError, Meta, MetaInput, Node, RenderOptions,
};

#[derive(Parser)]
#[command(name = "schema-org-graph")]
#[command(about = "Build deduplicated schema.org JSON-LD graphs for web pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the JSON-LD document for a page
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// JSON file holding an array of node objects
    source: PathBuf,

    /// JSON file with page metadata (host, url, inLanguage, ...)
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Canonical host, e.g. https://example.com/
    #[arg(long)]
    host: Option<String>,

    /// Canonical page url
    #[arg(long)]
    url: Option<String>,

    /// Page path, joined onto the host when no url is given
    #[arg(long)]
    path: Option<String>,

    /// Page language, e.g. en-AU
    #[arg(long = "lang")]
    in_language: Option<String>,

    /// Currency for offers, e.g. AUD
    #[arg(long)]
    currency: Option<String>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Page description
    #[arg(long)]
    description: Option<String>,

    /// Page image path or url
    #[arg(long)]
    image: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Spaces per indentation level when pretty printing
    #[arg(long, default_value_t = 2)]
    indent: usize,
}

impl RenderArgs {
    fn meta_overrides(&self) -> MetaInput {
        MetaInput {
            host: self.host.clone(),
            url: self.url.clone(),
            path: self.path.clone(),
            in_language: self.in_language.clone(),
            currency: self.currency.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            ..Default::default()
        }
    }
}

/// Load metadata from file (if any) with flags layered on top
fn load_meta(args: &RenderArgs) -> Result<Meta, GraphError> {
    let base = match &args.meta {
        Some(path) => {
            debug!(path = %path.display(), "loading metadata file");
            serde_json::from_str::<MetaInput>(&fs::read_to_string(path)?)?
        }
        None => MetaInput::default(),
    };
    Meta::resolve(base.merged_with(args.meta_overrides()))
}

/// Load the node array; a single object is accepted as one node
fn load_nodes(path: &PathBuf) -> Result<Vec<Node>, GraphError> {
    let content = fs::read_to_string(path)?;
    let nodes = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("@graph") {
            Some(Value::Array(items)) => items.clone(),
            _ => vec![Value::Object(obj)],
        },
        other => {
            return Err(GraphError::InvalidInput {
                path: path.display().to_string(),
                reason: format!("expected an array of nodes, got {}", other),
            })
        }
    };
    Ok(nodes.into_iter().map(Node::from_value).collect())
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), GraphError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("Wrote schema.org graph to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), GraphError> {
    let meta = load_meta(&args)?;
    let nodes = load_nodes(&args.source)?;
    let registered = nodes.len();

    let graph = build_resolved_graph(nodes, meta)?;
    let flattened = dedupe_and_flatten_nodes(graph.into_nodes());
    info!(registered, output = flattened.len(), "rendered graph");

    let output = if args.pretty {
        render_nodes_to_schema_org_html(flattened, &RenderOptions { spaces: args.indent })?
    } else {
        serde_json::to_string(&render_nodes_to_schema_org_json(flattened))?
    };
    write_output(&output, args.output.as_ref())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("schema_org_graph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_org_graph::NodeKind;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "schema-org-graph-{}-{}.json",
            std::process::id(),
            name
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_nodes_rejects_scalar_input() {
        let path = write_temp("scalar", "\"just a string\"");
        let result = load_nodes(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(GraphError::InvalidInput { path: p, reason }) => {
                assert_eq!(p, path.display().to_string());
                assert!(reason.contains("expected an array"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_load_nodes_accepts_array_and_graph() {
        let array = write_temp(
            "array",
            r#"[{"@type": "Organization", "name": "Acme"}, {"name": "untyped"}]"#,
        );
        let nodes = load_nodes(&array).unwrap();
        fs::remove_file(&array).ok();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind(), Some(NodeKind::Organization));
        assert_eq!(nodes[1].kind(), None);

        let graph = write_temp("graph", r#"{"@graph": [{"@type": "WebPage"}]}"#);
        let nodes = load_nodes(&graph).unwrap();
        fs::remove_file(&graph).ok();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), Some(NodeKind::WebPage));
    }
}
