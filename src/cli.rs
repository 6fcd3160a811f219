//! Command-line interface.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use fitquest::gamification::types::{
    ChallengeCategory, ChallengeDefinition, ChallengeType, Difficulty, Rarity,
};
use fitquest::gamification::{auditor, catalog, classifier, level_for_xp, ChallengeManager};
use fitquest::storage::{config, Database, SqliteChallengeStore};
use fitquest::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "fitquest", version, about = "Challenge and gamification engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog challenges
    Catalog {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        #[arg(long = "type")]
        challenge_type: Option<String>,
        /// Case-insensitive text search over title and description
        #[arg(long)]
        search: Option<String>,
    },
    /// List catalog achievements
    Achievements {
        #[arg(long, value_parser = parse_rarity)]
        rarity: Option<Rarity>,
    },
    /// Show the level reached with a given XP total
    Level { xp: u64 },
    /// Show which challenges are tracked automatically
    Classify,
    /// Start a catalog challenge for a user
    Start {
        #[arg(long)]
        user: Uuid,
        title: String,
    },
    /// Add progress to a challenge
    Progress { challenge: Uuid, amount: f64 },
    /// Audit a user's stored challenges
    Audit {
        #[arg(long)]
        user: Uuid,
        /// Write the proposed fixes
        #[arg(long)]
        apply: bool,
    },
    /// Show XP, level and challenge counts for a user
    Summary {
        #[arg(long)]
        user: Uuid,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{}'", s))
}

fn parse_rarity(s: &str) -> Result<Rarity, String> {
    Rarity::from_str(s).ok_or_else(|| format!("unknown rarity '{}'", s))
}

pub fn run(cli: Cli) -> Result<()> {
    let config = config::load_config().context("loading configuration")?;

    match cli.command {
        Command::Catalog {
            category,
            difficulty,
            challenge_type,
            search,
        } => {
            let category = category.map(|c| ChallengeCategory::parse(&c));
            let challenge_type = challenge_type.map(|t| ChallengeType::parse(&t));
            let query = search.unwrap_or_default();

            let matches: Vec<&ChallengeDefinition> = catalog::search_challenges(&query)
                .into_iter()
                .filter(|d| category.as_ref().map_or(true, |c| &d.category == c))
                .filter(|d| difficulty.map_or(true, |x| d.difficulty == x))
                .filter(|d| challenge_type.as_ref().map_or(true, |t| &d.challenge_type == t))
                .filter(|d| config.display.show_unimplemented || classifier::is_implementable(&d.title))
                .collect();

            for def in matches {
                println!(
                    "{} {:<28} {:<8} {:<9} {:>8} {:<10} {:>5} XP",
                    def.icon,
                    def.title,
                    def.category.as_str(),
                    def.difficulty.as_str(),
                    def.target,
                    def.unit,
                    def.xp_reward
                );
            }
        }
        Command::Achievements { rarity } => {
            for def in catalog::achievement_definitions()
                .iter()
                .filter(|a| rarity.map_or(true, |r| a.rarity == r))
            {
                println!(
                    "{} {:<22} {:<10} {:>5} XP  {}",
                    def.icon,
                    def.name,
                    def.rarity.as_str(),
                    def.xp_reward,
                    def.condition
                );
            }
        }
        Command::Level { xp } => {
            let info = level_for_xp(xp);
            if info.is_max_level() {
                println!("Level {} (max), {} XP past the last level", info.level, info.current_level_xp);
            } else {
                println!(
                    "Level {}: {}/{} XP ({:.0}%)",
                    info.level,
                    info.current_level_xp,
                    info.next_level_xp,
                    info.progress_percentage()
                );
            }
        }
        Command::Classify => {
            let stats = classifier::stats();
            let parts = classifier::partition();
            println!(
                "{} challenges: {} implemented, {} implementable, {} unimplementable ({:.1}% of implementable done)",
                stats.total,
                stats.implemented,
                stats.implementable,
                stats.unimplementable,
                stats.implementation_rate
            );
            println!("\nPending:");
            for def in parts.pending {
                println!("  {}", def.title);
            }
            println!("\nUnimplementable:");
            for def in parts.unimplementable {
                println!(
                    "  {}: {}",
                    def.title,
                    classifier::unimplementation_reason(&def.title).unwrap_or_default()
                );
            }
            let drift = classifier::catalog_drift();
            if !drift.is_empty() {
                println!("\nNot in catalog: {}", drift.join(", "));
            }
        }
        Command::Start { user, title } => {
            let manager = open_manager(&config)?;
            let challenge = manager.start_challenge(user, &title)?;
            println!(
                "Started '{}' ({}) until {}",
                challenge.title(),
                challenge.id,
                challenge.end_date
            );
        }
        Command::Progress { challenge, amount } => {
            let manager = open_manager(&config)?;
            let updated = manager.record_progress(challenge, amount)?;
            println!(
                "'{}': {}/{} {} ({}%), {}",
                updated.title(),
                updated.current,
                updated.target(),
                updated.definition.unit,
                updated.progress_percentage(),
                updated.status
            );
        }
        Command::Audit { user, apply } => {
            let manager = open_manager(&config)?;
            let audit = manager.audit_user(user)?;
            print!("{}", auditor::render_report(&audit));

            if apply || config.audit.apply_fixes {
                let patched = manager.apply_audit_fixes(user)?;
                println!("\nApplied fixes to {} challenges", patched.len());
            }
        }
        Command::Summary { user } => {
            let manager = open_manager(&config)?;
            let summary = manager.summary(user)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn open_manager(config: &AppConfig) -> Result<ChallengeManager<SqliteChallengeStore>> {
    let path = config.database_path();
    if config.database_file.trim().is_empty() {
        bail!("no database file configured");
    }
    let db = Database::open(&path)
        .with_context(|| format!("opening database at {}", path.display()))?;

    Ok(ChallengeManager::new(SqliteChallengeStore::new(db)).with_parallel_audit(config.audit.parallel))
}
