use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kumbaras_core::time::today_in;
use kumbaras_core::{Category, SavingsGoal, combo_options, parse_combo};
use kumbaras_finance::analytics::{for_month, summarize};
use kumbaras_finance::{Classifier, ClassifierInput, RuleTable, classify_all};
use kumbaras_ingest::read_bank_export;
use std::path::{Path, PathBuf};

mod config;
mod logging;
mod report;
mod state;
mod store;

use config::{Config, init_config, load_config, save_config};
use report::{Dashboard, History};
use state::Workspace;

#[derive(Parser, Debug)]
#[command(
    name = "kumbaras",
    version,
    about = "Personal finance dashboard for Greek bank statements"
)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a bank export and save one processed file per month
    Import {
        file: PathBuf,

        /// Overwrite months already on disk (drops manual corrections)
        #[arg(long)]
        force: bool,
    },

    /// Print the classification of every row without saving anything
    Classify {
        file: PathBuf,

        /// Also print which rule fired
        #[arg(long)]
        explain: bool,

        #[arg(long)]
        json: bool,
    },

    /// List processed months, newest first
    Months,

    /// Show a month's rows with their row numbers
    List {
        /// YYYY-MM (default: newest)
        #[arg(long)]
        month: Option<String>,
    },

    /// Summary, budget, top expenses, goals and advice for one month
    Dashboard {
        /// YYYY-MM (default: newest)
        #[arg(long)]
        month: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Financial advice for one month
    Advice {
        /// YYYY-MM (default: newest)
        #[arg(long)]
        month: Option<String>,
    },

    /// Manually reclassify one row
    Edit {
        #[arg(long)]
        month: String,

        /// Row number as shown by `kumbaras list`
        #[arg(long)]
        row: usize,

        /// "<category> > <subcategory>", see `kumbaras categories`
        #[arg(long)]
        to: String,
    },

    /// Every category/subcategory pair `edit` accepts
    Categories,

    /// Month-by-month overview across all processed months
    History {
        #[arg(long)]
        json: bool,
    },

    /// Monthly budget limits
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },

    /// Savings goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },

    /// Print the classification rules in priority order
    Rules,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BudgetCommand {
    /// Limits, with spending for the newest month
    List,

    /// Set a category's monthly limit (0 removes it)
    Set { category: String, limit: f64 },
}

#[derive(Subcommand, Debug)]
enum GoalsCommand {
    List,

    Add {
        name: String,

        #[arg(long)]
        target: f64,

        #[arg(long, default_value_t = 0.0)]
        saved: f64,

        /// Fraction (0-1) of monthly savings routed to this goal
        #[arg(long)]
        share: Option<f64>,
    },

    Remove { name: String },

    /// Update how much is already saved
    Deposit {
        name: String,
        amount: f64,
    },

    /// When will the goal be reached at a fixed monthly rate
    Project {
        name: String,

        #[arg(long)]
        monthly: f64,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config (never overwrites)
    Init,
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let ws = Workspace::locate()?;
    let mut cfg = load_config(&ws)?;

    match cli.command {
        Command::Import { file, force } => import(&ws, &cfg, &file, force)?,

        Command::Classify {
            file,
            explain,
            json,
        } => classify_file(&cfg, &file, explain, json)?,

        Command::Months => {
            let months = ws.months()?;
            if months.is_empty() {
                println!("No processed months yet. Run: kumbaras import <statement>");
            }
            for m in months {
                println!("{m}");
            }
        }

        Command::List { month } => {
            let month = ws.resolve_month(month)?;
            let txns = store::load_month(&ws, &month)?;
            println!("# {month}\n");
            print!("{}", report::render_rows(&txns));
        }

        Command::Dashboard { month, json } => {
            let month = ws.resolve_month(month)?;
            let txns = store::load_month(&ws, &month)?;
            let today = today_in(&cfg.display.timezone)?;
            let dashboard = Dashboard::build(&month, &txns, &cfg, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", dashboard.render());
            }
        }

        Command::Advice { month } => {
            let month = ws.resolve_month(month)?;
            let txns = store::load_month(&ws, &month)?;
            let advice = kumbaras_finance::advisor::financial_advice(&txns, &summarize(&txns));
            println!("# Advice for {month}\n");
            println!("{}", advice.render());
        }

        Command::Edit { month, row, to } => {
            let classification = parse_combo(&to)?;
            let saved = store::edit_row(&ws, &month, row, classification)?;
            println!(
                "Row {row} ({} {:.2}€) is now {}",
                saved.description,
                saved.amount,
                saved.classification()
            );
        }

        Command::Categories => {
            for combo in combo_options() {
                println!("{combo}");
            }
        }

        Command::History { json } => {
            let txns = store::load_history(&ws)?;
            if txns.is_empty() {
                bail!("no processed months yet. Run: kumbaras import <statement>");
            }
            let history = History::build(&txns);
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                print!("{}", history.render());
            }
        }

        Command::Budget { command } => match command {
            BudgetCommand::List => {
                let txns = match ws.months()?.first() {
                    Some(m) => store::load_month(&ws, m)?,
                    None => Vec::new(),
                };
                print!("{}", report::render_budget_limits(&cfg, &txns));
            }
            BudgetCommand::Set { category, limit } => {
                let category: Category = category.parse()?;
                if category.is_savings() {
                    bail!("savings transfers are not budgeted");
                }
                if limit > 0.0 {
                    cfg.set_limit(category, limit);
                } else {
                    cfg.budget.remove(category.label());
                }
                save_config(&ws, &cfg)?;
                println!("{}: {:.2}€", category.label(), limit.max(0.0));
            }
        },

        Command::Goals { command } => goals(&ws, &mut cfg, command)?,

        Command::Rules => {
            let table = rule_table(&cfg);
            for (i, rule) in table.rules().iter().enumerate() {
                println!(
                    "{:>2}. {:<16} {} > {}",
                    i + 1,
                    rule.name,
                    rule.category,
                    rule.subcategory
                );
                println!("    {}", rule.matcher.describe());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(&ws)?,
            ConfigCommand::Show => {
                println!("# {}", ws.config_path().display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn rule_table(cfg: &Config) -> RuleTable {
    RuleTable::with_owner_aliases(&cfg.classifier.owner_aliases)
}

fn import(ws: &Workspace, cfg: &Config, file: &Path, force: bool) -> Result<()> {
    if !file.exists() {
        bail!("statement not found: {}", file.display());
    }
    let rows = read_bank_export(file).with_context(|| format!("parsing {}", file.display()))?;
    let classifier = Classifier::new(rule_table(cfg));
    let txns = classify_all(&classifier, &rows);

    let report = store::save_months(ws, &txns, force)?;
    println!("Classified {} transactions from {}", txns.len(), file.display());
    for m in &report.written {
        println!("  saved  {m}  {}", ws.month_path(m).display());
    }
    for m in &report.kept {
        println!("  kept   {m}  (already processed; --force to overwrite)");
    }

    if let Some(newest) = report.written.iter().max() {
        let month = for_month(&txns, newest);
        let s = summarize(&month);
        println!(
            "\n{newest}: income {:.2}€, expenses {:.2}€, savings {:.2}€",
            s.income, s.expenses, s.savings
        );
    }
    Ok(())
}

fn classify_file(cfg: &Config, file: &Path, explain: bool, json: bool) -> Result<()> {
    let rows = read_bank_export(file).with_context(|| format!("parsing {}", file.display()))?;
    let classifier = Classifier::new(rule_table(cfg));

    if json {
        let txns = classify_all(&classifier, &rows);
        println!("{}", serde_json::to_string_pretty(&txns)?);
        return Ok(());
    }

    for row in &rows {
        let verdict = classifier.explain(&ClassifierInput::from(row));
        print!(
            "{}  {:>9.2}€  {:<36} {}",
            row.date.format("%d/%m/%Y"),
            row.amount,
            row.description,
            verdict.classification
        );
        if explain {
            print!("  [{}]", verdict.rule.name);
        }
        println!();
    }
    Ok(())
}

fn goals(ws: &Workspace, cfg: &mut Config, command: GoalsCommand) -> Result<()> {
    match command {
        GoalsCommand::List => {
            let savings = match ws.months()?.first() {
                Some(m) => summarize(&store::load_month(ws, m)?).savings,
                None => 0.0,
            };
            let today = today_in(&cfg.display.timezone)?;
            print!(
                "{}",
                report::render_goals(&report::goal_views(&cfg.goals, savings, today))
            );
        }
        GoalsCommand::Add {
            name,
            target,
            saved,
            share,
        } => {
            if cfg.goal_mut(&name).is_some() {
                bail!("goal already exists: {name}");
            }
            if target <= 0.0 {
                bail!("target must be positive");
            }
            let mut goal = SavingsGoal::new(name.clone(), target, saved);
            goal.share = share.map(|s| s.clamp(0.0, 1.0));
            cfg.goals.push(goal);
            save_config(ws, cfg)?;
            println!("Added goal {name}");
        }
        GoalsCommand::Remove { name } => {
            let before = cfg.goals.len();
            cfg.goals.retain(|g| g.name != name);
            if cfg.goals.len() == before {
                bail!("no goal named {name}");
            }
            save_config(ws, cfg)?;
            println!("Removed goal {name}");
        }
        GoalsCommand::Deposit { name, amount } => {
            let goal = cfg
                .goal_mut(&name)
                .with_context(|| format!("no goal named {name}"))?;
            goal.saved += amount;
            let (saved, target) = (goal.saved, goal.target);
            save_config(ws, cfg)?;
            println!("{name}: {saved:.2}€ of {target:.2}€");
        }
        GoalsCommand::Project { name, monthly } => {
            let goal = cfg
                .goals
                .iter()
                .find(|g| g.name == name)
                .with_context(|| format!("no goal named {name}"))?;
            let today = today_in(&cfg.display.timezone)?;
            let projection = goal.project(monthly, today);
            print!("{}", report::render_projection(goal, monthly, &projection));
        }
    }
    Ok(())
}
