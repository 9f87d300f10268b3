//! CLI for urlq.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use urlq_core::config::{self, UrlqConfig};
use urlq_core::{ParseOptions, ParsedUrl, Syntax, UrlError};

use commands::{run_edit, run_get, run_inspect, run_query, EditOps};

/// Top-level CLI for urlq.
#[derive(Debug, Parser)]
#[command(name = "urlq")]
#[command(about = "urlq: inspect and edit URL query strings", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options that override `config.toml` for one invocation.
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Charset used to encode and decode values (e.g. utf-8, iso-8859-1).
    #[arg(long, global = true, value_name = "LABEL")]
    pub charset: Option<String>,

    /// Do not encode or decode values at all.
    #[arg(long, global = true, conflicts_with = "charset")]
    pub raw: bool,

    /// Require an absolute URL and ignore fragments.
    #[arg(long, global = true)]
    pub protocol: bool,
}

impl GlobalOpts {
    /// Layers command-line overrides on top of the configured defaults.
    pub fn parse_options(&self, cfg: &UrlqConfig) -> ParseOptions {
        let mut opts = cfg.parse_options();
        if let Some(label) = &self.charset {
            opts.charset = Some(label.clone());
        }
        if self.raw {
            opts.charset = None;
        }
        if self.protocol {
            opts.syntax = Syntax::Protocol;
        }
        opts
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the components and parameters of a URL.
    Inspect {
        /// URL to inspect.
        url: String,

        /// Print a JSON document instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the value(s) of one query parameter.
    Get {
        /// URL to read from.
        url: String,

        /// Parameter name.
        name: String,

        /// Print every value, one per line, instead of only the first.
        #[arg(long)]
        all: bool,

        /// Print values as they appear in the URL, without decoding.
        #[arg(long)]
        encoded: bool,
    },

    /// Print the query string (without the leading `?`).
    Query {
        /// URL to read from.
        url: String,
    },

    /// Remove, replace and add parameters, then print the resulting URL.
    Edit {
        /// URL to edit.
        url: String,

        #[command(flatten)]
        ops: EditOps,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let opts = cli.global.parse_options(&cfg);

        match cli.command {
            CliCommand::Inspect { url, json } => run_inspect(&parse_url(&url, &opts)?, json)?,
            CliCommand::Get {
                url,
                name,
                all,
                encoded,
            } => run_get(&parse_url(&url, &opts)?, &name, all, encoded)?,
            CliCommand::Query { url } => run_query(&parse_url(&url, &opts)?),
            CliCommand::Edit { url, ops } => run_edit(parse_url(&url, &opts)?, &ops)?,
            CliCommand::Completions { shell } => {
                let mut cmd = Cli::command();
                clap_complete::generate(shell, &mut cmd, "urlq", &mut std::io::stdout());
            }
        }

        Ok(())
    }
}

fn parse_url(url: &str, opts: &ParseOptions) -> Result<ParsedUrl> {
    Ok(ParsedUrl::parse_with(url, opts)?)
}

/// Class of the first [`UrlError`] in the chain, if any.
pub fn error_kind(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<UrlError>())
        .map(UrlError::kind)
}
