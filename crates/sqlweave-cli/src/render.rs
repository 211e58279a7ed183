use crate::cli::RenderArgs;
use crate::config::{PlaceholderStyle, ProjectConfig};
use crate::query_file::QueryFile;
use anyhow::Context;
use sqlweave::Dialect;
use std::path::Path;

/// Output options after merging the config file with command-line flags.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Forced dialect, overriding the query file.
    pub dialect_override: Option<Dialect>,
    /// Fallback when the query file names no dialect.
    pub default_dialect: Option<Dialect>,
    pub placeholders: PlaceholderStyle,
    pub inline: bool,
}

impl RenderOptions {
    pub fn resolve(config: &ProjectConfig, args: &RenderArgs) -> Self {
        Self {
            dialect_override: args.dialect.as_deref().map(Dialect::parse),
            default_dialect: config.file.dialect.clone(),
            placeholders: if args.native {
                PlaceholderStyle::Native
            } else {
                config.file.placeholders
            },
            inline: args.inline || config.file.inline,
        }
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let config = ProjectConfig::discover(args.config.clone())?;
    let opts = RenderOptions::resolve(&config, &args);

    for (i, path) in args.files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let out = render_file(path, &opts)?;
        println!("-- {}", path.display());
        print!("{out}");
    }
    Ok(())
}

fn render_file(path: &Path, opts: &RenderOptions) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read query file {}", path.display()))?;
    let query = QueryFile::parse(&raw)
        .with_context(|| format!("failed to parse query file {}", path.display()))?;
    render_query(query, opts).with_context(|| format!("failed to render {}", path.display()))
}

/// Render one query description to the text printed for it.
pub fn render_query(query: QueryFile, opts: &RenderOptions) -> anyhow::Result<String> {
    let dialect = opts
        .dialect_override
        .clone()
        .or_else(|| query.dialect.clone())
        .or_else(|| opts.default_dialect.clone());

    let builder = query.into_builder(dialect.as_ref())?;
    let built = builder.build()?;

    if opts.inline {
        return Ok(format!("{};\n", built.to_bound_sql()?));
    }

    let built = match (opts.placeholders, &dialect) {
        (PlaceholderStyle::Native, Some(d)) => built.rebind(d),
        (PlaceholderStyle::Native, None) => {
            anyhow::bail!("native placeholders need a dialect")
        }
        (PlaceholderStyle::Question, _) => built,
    };

    let args = serde_json::to_string(&built.args)?;
    Ok(format!("{};\n-- args: {args}\n", built.sql))
}
