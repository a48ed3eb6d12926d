use clap::{Args, Parser, Subcommand};

use crate::command::types::{
    EstimateParams, SamplingSpec, SplitCommand, TableSelection, TargetNaming,
};
use crate::engine::errors::SplitError;
use crate::engine::types::TableRef;
use crate::shared::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "presplit")]
#[command(about = "Generate SPLIT TABLE statements that pre-split TiDB regions", long_about = None)]
pub struct Cli {
    /// SQL host; overrides `mysql.host`
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// SQL port; overrides `mysql.port`
    #[arg(short = 'P', long, global = true)]
    pub port: Option<u16>,

    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Parallel table pipelines
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Directory receiving one `{db}.{table}.sql` file per table
    #[arg(long, global = true)]
    pub out_dir: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Interpolate boundaries across each table's row handle range
    Range {
        #[command(flatten)]
        target: TargetArgs,

        /// Region size in MiB
        #[arg(long)]
        region_size: Option<u64>,
    },
    /// Re-emit the live region boundaries reported by the status port
    Key {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long)]
        status_port: Option<u16>,
    },
    /// Size a table from row or size hints and split on a column's values
    Estimate {
        #[command(flatten)]
        target: TargetArgs,

        /// Expected row count of the target table
        #[arg(long)]
        new_table_row: Option<u64>,

        /// Expected size of the target table in MiB
        #[arg(long)]
        new_table_size: Option<u64>,

        /// Region size in MiB
        #[arg(long)]
        region_size: Option<u64>,

        /// Column whose values become split points
        #[arg(long)]
        col: String,

        #[arg(long)]
        new_db: Option<String>,

        #[arg(long)]
        new_table: Option<String>,

        /// Index on the target the split points belong to
        #[arg(long)]
        new_index: String,
    },
    /// Copy a base index's split shape onto a new index
    Sampling(SamplingArgs),
    /// Like sampling, but pages through the base index
    Reckon {
        #[command(flatten)]
        sampling: SamplingArgs,

        /// Distinct tuples read per page
        #[arg(long)]
        page_size: Option<usize>,
    },
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    #[arg(long)]
    pub db: String,

    #[arg(long)]
    pub all: bool,

    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub include: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    #[arg(long)]
    pub regex: Option<String>,
}

impl TargetArgs {
    fn selection(&self) -> Result<TableSelection, SplitError> {
        TableSelection::from_flags(
            self.all,
            self.include.clone(),
            self.exclude.clone(),
            self.regex.clone(),
        )
    }
}

#[derive(Args, Debug)]
pub struct SamplingArgs {
    #[arg(long)]
    pub base_db: String,

    #[arg(long)]
    pub base_table: String,

    #[arg(long)]
    pub base_index: String,

    #[arg(long)]
    pub new_db: String,

    #[arg(long)]
    pub new_table: String,

    #[arg(long)]
    pub new_index: String,

    /// Expected row count of the new table
    #[arg(long)]
    pub new_table_row: u64,
}

impl SamplingArgs {
    fn spec(&self) -> SamplingSpec {
        SamplingSpec {
            base_index: self.base_index.clone(),
            target: TableRef::new(&self.new_db, &self.new_table),
            target_index: self.new_index.clone(),
            desired_rows: self.new_table_row,
        }
    }
}

/// Database, table selection and strategy of one run.
#[derive(Debug)]
pub struct Invocation {
    pub db: String,
    pub selection: TableSelection,
    pub command: SplitCommand,
}

impl Cli {
    /// Folds flags that shadow config values into `settings`.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.mysql.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.mysql.port = port;
        }
        if let Some(user) = &self.user {
            settings.mysql.user = user.clone();
        }
        if let Some(password) = &self.password {
            settings.mysql.password = password.clone();
        }
        if let Some(concurrency) = self.concurrency {
            settings.split.concurrency = concurrency;
        }
        if let Some(dir) = &self.out_dir {
            settings.split.output_dir = dir.clone();
        }

        match &self.command {
            CliCommand::Range {
                region_size: Some(mb),
                ..
            }
            | CliCommand::Estimate {
                region_size: Some(mb),
                ..
            } => settings.split.region_size_mb = *mb,
            CliCommand::Key {
                status_port: Some(port),
                ..
            } => settings.status.port = *port,
            CliCommand::Reckon {
                page_size: Some(size),
                ..
            } => settings.split.reckon_page_size = *size,
            _ => {}
        }
    }

    /// Builds the run's inputs. Call after [`Cli::apply_overrides`].
    pub fn invocation(&self, settings: &Settings) -> Result<Invocation, SplitError> {
        let split = &settings.split;
        Ok(match &self.command {
            CliCommand::Range { target, .. } => Invocation {
                db: target.db.clone(),
                selection: target.selection()?,
                command: SplitCommand::Range,
            },
            CliCommand::Key { target, .. } => Invocation {
                db: target.db.clone(),
                selection: target.selection()?,
                command: SplitCommand::Key,
            },
            CliCommand::Estimate {
                target,
                new_table_row,
                new_table_size,
                col,
                new_db,
                new_table,
                new_index,
                ..
            } => Invocation {
                db: target.db.clone(),
                selection: target.selection()?,
                command: SplitCommand::Estimate {
                    column: col.clone(),
                    params: EstimateParams::from_hints(
                        *new_table_row,
                        *new_table_size,
                        split.region_size_mb,
                    )?,
                    target: TargetNaming {
                        db: new_db.clone(),
                        table: new_table.clone(),
                        index: Some(new_index.clone()),
                    },
                },
            },
            CliCommand::Sampling(args) => Invocation {
                db: args.base_db.clone(),
                selection: TableSelection::Include(vec![args.base_table.clone()]),
                command: SplitCommand::Sampling(args.spec()),
            },
            CliCommand::Reckon { sampling, .. } => Invocation {
                db: sampling.base_db.clone(),
                selection: TableSelection::Include(vec![sampling.base_table.clone()]),
                command: SplitCommand::Reckon {
                    spec: sampling.spec(),
                    page_size: split.reckon_page_size,
                },
            },
        })
    }
}
