//! Command-line surface over `lifexp_core`.
//!
//! # Responsibility
//! - Map subcommands onto store mutations and derived read models.
//! - Choose the storage adapter (SQLite file by default, JSON file opt-in).
//!
//! # Invariants
//! - All state changes go through `XpStore`; the CLI never writes storage.

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use lifexp_core::db::open_db;
use lifexp_core::model::category;
use lifexp_core::{
    default_log_level, filter_entries, group_by_month, init_logging, parse_tags,
    quests_by_date_desc, CapsuleEntryType, CapsuleFilter, CategoryId, JsonFileSnapshotRepository,
    LoadOutcome, NewBonusQuest, NewCapsuleEntry, ReviewUpdate, SnapshotRepository,
    SqliteSnapshotRepository, XpStore, UNDATED_MONTH,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lifexp")]
#[command(about = "Life XP tracker: monthly reviews, bonus quests and year capsule", long_about = None)]
#[command(version = lifexp_core::core_version())]
struct Cli {
    /// SQLite database holding the snapshot
    #[arg(long, global = true, default_value = "lifexp.sqlite3")]
    db: PathBuf,

    /// Use a JSON snapshot file instead of SQLite
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Absolute directory for rolling log files (logging is off when unset)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage
    Ping,

    /// Yearly per-category XP overview
    Dashboard {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Scores for every category in one month
    Month {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Create or update one monthly review
    Review(ReviewArgs),

    /// Set the yearly goal for a category
    Goal {
        #[arg(long)]
        category: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Bonus quests
    #[command(subcommand)]
    Quest(QuestCommand),

    /// Year capsule entries
    #[command(subcommand)]
    Capsule(CapsuleCommand),
}

#[derive(Args)]
struct ReviewArgs {
    #[arg(long)]
    month: u32,
    #[arg(long)]
    category: String,
    #[arg(long)]
    year: Option<i32>,
    /// Score 0-3 (clamped)
    #[arg(long, allow_hyphen_values = true)]
    xp: Option<i64>,
    #[arg(long)]
    did: Option<String>,
    #[arg(long)]
    improved: Option<String>,
    #[arg(long)]
    frustrated: Option<String>,
    #[arg(long)]
    intent: Option<String>,
}

#[derive(Subcommand)]
enum QuestCommand {
    /// Log a bonus quest
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Award 1-3 (clamped)
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        xp: i64,
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List quests, newest first
    List,
    /// Delete a quest by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum CapsuleCommand {
    /// Add a capsule entry
    Add {
        #[arg(long)]
        content: String,
        #[arg(long = "type", default_value = "memory")]
        kind: String,
        /// Comma separated
        #[arg(long, default_value = "")]
        tags: String,
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries grouped by month
    List {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Delete an entry by id
    Delete { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    if let Commands::Ping = cli.command {
        println!("lifexp_core ping={}", lifexp_core::ping());
        println!("lifexp_core version={}", lifexp_core::core_version());
        return Ok(());
    }

    match cli.json.as_ref() {
        Some(path) => run(XpStore::open(JsonFileSnapshotRepository::new(path)), cli.command),
        None => {
            let conn = open_db(&cli.db)
                .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
            run(XpStore::open(SqliteSnapshotRepository::new(&conn)), cli.command)
        }
    }
}

fn run<R: SnapshotRepository>(mut store: XpStore<R>, command: Commands) -> Result<()> {
    match store.load_outcome() {
        LoadOutcome::Recovered(reason) => {
            eprintln!("warning: saved data could not be parsed, starting fresh ({reason})");
        }
        LoadOutcome::Unreadable(reason) => {
            eprintln!("warning: storage could not be read, changes will not be saved ({reason})");
        }
        LoadOutcome::Loaded | LoadOutcome::Empty => {}
    }
    let this_year = Local::now().year();

    match command {
        Commands::Ping => {}
        Commands::Dashboard { year } => print_dashboard(&store, year.unwrap_or(this_year)),
        Commands::Month { month, year } => {
            print_month(&store, year.unwrap_or(this_year), check_month(month)?)
        }
        Commands::Review(args) => {
            let year = args.year.unwrap_or(this_year);
            let month = check_month(args.month)?;
            let category_id = parse_category(&args.category)?;
            let update = ReviewUpdate {
                xp_score: args.xp,
                what_i_did: args.did,
                what_improved: args.improved,
                what_frustrated: args.frustrated,
                next_month_intent: args.intent,
            };
            let review = store.upsert_monthly_review(year, month, category_id, &update);
            println!(
                "review {} {year}-{month:02} {category_id} xp={}",
                review.id, review.xp_score
            );
        }
        Commands::Goal {
            category,
            text,
            year,
        } => {
            let category_id = parse_category(&category)?;
            let goal = store.set_category_goal(year.unwrap_or(this_year), category_id, text);
            println!("goal {} {} {category_id}", goal.id, goal.year);
        }
        Commands::Quest(command) => run_quest(&mut store, command)?,
        Commands::Capsule(command) => run_capsule(&mut store, command)?,
    }

    if let Some(err) = store.last_save_error() {
        eprintln!("warning: changes are not saved: {err}");
    }
    Ok(())
}

fn run_quest<R: SnapshotRepository>(store: &mut XpStore<R>, command: QuestCommand) -> Result<()> {
    match command {
        QuestCommand::Add {
            title,
            notes,
            xp,
            category,
            date,
        } => {
            let title = require_text(title, "title")?;
            let mut quest = NewBonusQuest::new(date.unwrap_or_else(today), title, xp)
                .with_notes(notes);
            quest.category_id = category.as_deref().map(parse_category).transpose()?;
            println!("quest {}", store.add_bonus_quest(quest));
        }
        QuestCommand::List => {
            for quest in quests_by_date_desc(store.bonus_quests()) {
                println!(
                    "{} {} +{}xp [{}] {}",
                    quest.id,
                    display_date(quest.date),
                    quest.xp_award,
                    category_label(quest.category_id),
                    quest.title
                );
            }
        }
        QuestCommand::Delete { id } => report_delete(store.delete_bonus_quest(&id), &id),
    }
    Ok(())
}

fn run_capsule<R: SnapshotRepository>(
    store: &mut XpStore<R>,
    command: CapsuleCommand,
) -> Result<()> {
    match command {
        CapsuleCommand::Add {
            content,
            kind,
            tags,
            category,
            date,
        } => {
            let content = require_text(content, "content")?;
            let mut entry =
                NewCapsuleEntry::new(date.unwrap_or_else(today), parse_kind(&kind)?, content)
                    .with_tags(parse_tags(&tags));
            entry.category_id = category.as_deref().map(parse_category).transpose()?;
            println!("capsule {}", store.add_capsule_entry(entry));
        }
        CapsuleCommand::List {
            year,
            kind,
            category,
            search,
        } => {
            let filter = CapsuleFilter {
                year,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category: category.as_deref().map(parse_category).transpose()?,
                search,
            };
            let matched = filter_entries(store.capsule_entries(), &filter);
            for bucket in group_by_month(&matched) {
                if bucket.month == UNDATED_MONTH {
                    println!("== undated");
                } else {
                    println!("== month {:02}", bucket.month);
                }
                for entry in bucket.entries {
                    println!(
                        "{} {} {} {} [{}] #{} {}",
                        entry.id,
                        display_date(entry.date),
                        entry.kind.icon(),
                        entry.kind.label(),
                        category_label(entry.category_id),
                        entry.tags.join(" #"),
                        entry.content
                    );
                }
            }
        }
        CapsuleCommand::Delete { id } => report_delete(store.delete_capsule_entry(&id), &id),
    }
    Ok(())
}

fn print_dashboard<R: SnapshotRepository>(store: &XpStore<R>, year: i32) {
    println!("Quick glance for {year}");
    for stat in store.category_stats(year) {
        let config = stat.category_id.config();
        let goal = store
            .goal_for(year, stat.category_id)
            .map(|goal| goal.goal_text.as_str())
            .unwrap_or_default();
        println!(
            "{} {:<28} total={:<3} monthly={:<3} bonus={:<3} avg={:.2} ({}) goal={goal}",
            config.icon,
            config.label,
            stat.total_xp,
            stat.monthly_xp_total,
            stat.bonus_xp,
            stat.average,
            stat.label
        );
    }

    let summary = store.year_summary(year);
    println!("Total XP this year: {}", summary.total_xp);
    println!("Most leveled up: {}", category_label(summary.most_leveled));
    println!("Needs attention: {}", category_label(summary.needs_attention));
}

fn print_month<R: SnapshotRepository>(store: &XpStore<R>, year: i32, month: u32) {
    println!("Month {year}-{month:02}");
    for review in store.month_sheet(year, month) {
        let config = review.category_id.config();
        println!("{} {:<28} xp={}", config.icon, config.label, review.xp_score);
    }
    let summary = store.month_summary(year, month);
    println!("Total XP: {}", summary.total_xp);
    println!("Strongest: {}", category_label(summary.strongest));
    println!("Weakest: {}", category_label(summary.weakest));
}

fn report_delete(removed: bool, id: &str) {
    if removed {
        println!("deleted {id}");
    } else {
        println!("nothing to delete for {id}");
    }
}

fn category_label(category_id: Option<CategoryId>) -> &'static str {
    category_id.map_or("Unassigned", |id| id.config().label)
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "undated".to_string(), |date| date.to_string())
}

fn parse_category(value: &str) -> Result<CategoryId> {
    category::by_id(value).map(|config| config.id).ok_or_else(|| {
        let known: Vec<_> = category::list().iter().map(|c| c.id.as_str()).collect();
        anyhow!("unknown category `{value}`; expected one of {}", known.join("|"))
    })
}

fn parse_kind(value: &str) -> Result<CapsuleEntryType> {
    CapsuleEntryType::parse(value).ok_or_else(|| {
        anyhow!("unknown entry type `{value}`; expected memory|win|lesson|dream|quote|other")
    })
}

fn check_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(anyhow!("month must be 1-12, got {month}"))
    }
}

fn require_text(value: String, field: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} cannot be empty"));
    }
    Ok(value)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
