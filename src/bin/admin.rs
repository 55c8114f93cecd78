//! CLI administration tool for campus-records.
//!
//! Provides commands for provisioning admin accounts, managing bearer
//! sessions, and performing database operations without requiring HTTP API
//! access.
//!
//! # Usage
//!
//! ```bash
//! # Provision a center admin
//! cargo run --bin admin -- admin create --center-id 1
//!
//! # Provision a super admin
//! cargo run --bin admin -- admin create --super
//!
//! # List sessions
//! cargo run --bin admin -- session list
//!
//! # Revoke a session
//! cargo run --bin admin -- session revoke 42
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `admin create`): HMAC key used to
//!   hash passwords, must match the server's

use campus_records::domain::entities::Role;
use campus_records::domain::repositories::{PrincipalRepository, SessionRepository};
use campus_records::infrastructure::persistence::{PgPrincipalRepository, PgSessionRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing campus-records.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Manage bearer sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Admin account subcommands.
#[derive(Subcommand)]
enum AdminAction {
    /// Provision an admin account
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: Option<String>,

        /// Center the admin is pinned to (required unless --super)
        #[arg(short, long)]
        center_id: Option<i64>,

        /// Create a super admin spanning all centers
        #[arg(long = "super")]
        super_admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Session management subcommands.
#[derive(Subcommand)]
enum SessionAction {
    /// List all sessions
    List,

    /// Revoke a session by id
    Revoke {
        /// Session id to revoke
        id: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Admin { action } => handle_admin_action(action, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches admin account commands.
async fn handle_admin_action(action: AdminAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgPrincipalRepository::new(Arc::new(pool.clone())));

    match action {
        AdminAction::Create {
            name,
            email,
            center_id,
            super_admin,
            yes,
        } => {
            create_admin(repo, name, email, center_id, super_admin, yes).await?;
        }
    }

    Ok(())
}

/// Provisions an admin account with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for name, email and password (or use provided flags)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Hash password with HMAC-SHA256 keyed by `TOKEN_SIGNING_SECRET`
/// 4. Store in database
///
/// # Security
///
/// - Only the keyed hash of the password is stored
/// - The hash key must match the server's `TOKEN_SIGNING_SECRET`
async fn create_admin(
    repo: Arc<PgPrincipalRepository>,
    name: Option<String>,
    email: Option<String>,
    center_id: Option<i64>,
    super_admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create admin account".bright_blue().bold());
    println!();

    if !super_admin && center_id.is_none() {
        anyhow::bail!("--center-id is required unless --super is given");
    }

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password: String = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let (role, center_id) = if super_admin {
        (Role::SuperAdmin, None)
    } else {
        (Role::Admin, center_id)
    };

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:   {}", name.cyan());
    println!("  Email:  {}", email.cyan());
    println!("  Role:   {}", role.as_str().bright_yellow());
    if let Some(center) = center_id {
        println!("  Center: {}", center.to_string().bright_yellow());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    let password_hash = keyed_hash(&secret, &password);

    let id = repo
        .create_admin(&name, &email, &password_hash, role, center_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create admin: {}", e))?;

    println!();
    println!("{}", "Admin created successfully!".green().bold());
    println!("  ID: {}", id.to_string().bright_white());
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST http://localhost:3000/auth/login \\\n    -H 'Content-Type: application/json' \\\n    -d '{{\"role\": \"{}\", \"email\": \"{}\", \"password\": \"...\"}}'",
        role.as_str().bright_yellow(),
        email.bright_yellow()
    );
    println!();

    Ok(())
}

/// Dispatches session management commands.
async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgSessionRepository::new(Arc::new(pool.clone())));

    match action {
        SessionAction::List => list_sessions(repo).await?,
        SessionAction::Revoke { id } => revoke_session(repo, id).await?,
    }

    Ok(())
}

/// Lists all sessions with status indicators.
async fn list_sessions(repo: Arc<PgSessionRepository>) -> Result<()> {
    println!("{}", "Sessions".bright_blue().bold());
    println!();

    let sessions = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sessions: {}", e))?;

    if sessions.is_empty() {
        println!("{}", "  No sessions found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<12} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Role".bright_white().bold(),
        "Principal".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(65).bright_black());

    for session in &sessions {
        let status = if session.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<5} {:<12} {:<12} {:<20} {}",
            session.id.to_string().bright_black(),
            session.role.as_str().cyan(),
            session.principal_id.to_string().bright_black(),
            session
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        sessions.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a session by id with confirmation prompt.
async fn revoke_session(repo: Arc<PgSessionRepository>, id: i64) -> Result<()> {
    println!("{}", "Revoke session".bright_blue().bold());
    println!();

    let confirmed = Confirm::new()
        .with_prompt(format!("Revoke session {id}?"))
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

    println!();
    println!("{}", "Session revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of students
/// - Total number of score records
/// - Number of active sessions
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let students_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?;

    let scores_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_scores")
        .fetch_one(pool)
        .await?;

    let sessions_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Students:        {}",
        students_count.to_string().bright_green().bold()
    );
    println!(
        "  Score records:   {}",
        scores_count.to_string().bright_green().bold()
    );
    println!(
        "  Active sessions: {}",
        sessions_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Hashes a password using HMAC-SHA256 keyed by the signing secret.
///
/// Returns lowercase hex-encoded hash for database storage. Must match the
/// server's hashing so logins verify.
fn keyed_hash(secret: &str, input: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(input.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
