// CLI module - command-line argument parsing and handlers
//
// With no subcommand `fest` starts the TUI. Subcommands run headless:
// - events / categories: print the catalog or a filtered listing
// - login / logout: manage the stored credential
// - profile show / update: view or edit the signed-in user's profile
// - config: show, reset, edit or update the config file

use crate::api::ApiClient;
use crate::config::{Config, VERSION};
use crate::filter::{count_label, empty_message, filter_events, FilterId};
use crate::format::{self, category_icon};
use crate::loader::{load_listing, Route, LOAD_FAILED};
use crate::profile::{save_profile, ProfileForm};
use crate::session::Session;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// fest - browse festival events from the terminal
#[derive(Parser)]
#[command(name = "fest")]
#[command(version = VERSION)]
#[command(about = "Browse college festival events from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List events (all, or one category's)
    Events {
        /// Load the listing scoped to this category id
        #[arg(long)]
        category: Option<String>,

        /// Filter the loaded events by category id or name ("all" for none)
        #[arg(long)]
        filter: Option<String>,

        /// Print the filtered events as JSON
        #[arg(long)]
        json: bool,
    },

    /// List event categories
    Categories {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store an access token and cache the signed-in user
    Login {
        /// Bearer token issued by the festival site
        #[arg(long)]
        token: String,
    },

    /// Forget the stored credential
    Logout,

    /// View or edit the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Rewrite config with the current layout (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the cached profile
    Show {
        /// Fetch a fresh copy from the server first
        #[arg(long)]
        refresh: bool,
    },
    /// Update profile fields; omitted fields stay as they are
    Update(ProfileArgs),
}

#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "mobile")]
    pub mobile_no: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub college: Option<String>,
    #[arg(long)]
    pub course: Option<String>,
}

impl ProfileArgs {
    /// Overlay the supplied values onto a prefilled form
    pub fn apply_to(&self, form: &mut ProfileForm) {
        let pairs = [
            (&mut form.name, &self.name),
            (&mut form.mobile_no, &self.mobile_no),
            (&mut form.gender, &self.gender),
            (&mut form.city, &self.city),
            (&mut form.college, &self.college),
            (&mut form.course, &self.course),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}

impl Commands {
    /// Config maintenance that must still run when config.toml is broken
    pub fn repairs_config(&self) -> bool {
        matches!(
            self,
            Commands::Config { reset: true, .. }
                | Commands::Config { edit: true, .. }
                | Commands::Config { path: true, .. }
        )
    }
}

/// Handle a headless subcommand
pub async fn handle_cli(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Events {
            category,
            filter,
            json,
        } => handle_events(config, category, filter, json).await,
        Commands::Categories { json } => handle_categories(config, json).await,
        Commands::Login { token } => handle_login(config, token).await,
        Commands::Logout => handle_logout(),
        Commands::Profile { action } => match action {
            ProfileAction::Show { refresh } => handle_profile_show(config, refresh).await,
            ProfileAction::Update(args) => handle_profile_update(config, args).await,
        },
        Commands::Config {
            show,
            reset,
            edit,
            update,
            path,
        } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show(config)
            } else if reset {
                handle_config_reset()
            } else if edit {
                handle_config_edit()
            } else if update {
                handle_config_update()
            } else {
                println!("Usage: fest config [--show|--reset|--edit|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --update  Rewrite config with the current layout (preserves user values)");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
    }
}

fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.api_url, config.request_timeout()).context("Cannot reach festival API")
}

fn session_path() -> Result<PathBuf> {
    Session::default_path().context("Could not determine session path")
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_events(
    config: &Config,
    category: Option<String>,
    filter: Option<String>,
    json: bool,
) -> Result<()> {
    let api = api_client(config)?;
    let route = category.map(Route::Category).unwrap_or_default();
    let listing = match load_listing(&api, route).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!("{}", e);
            bail!(LOAD_FAILED);
        }
    };

    let filter = filter.as_deref().map(FilterId::parse).unwrap_or_default();
    let events = filter_events(&listing.events, &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    println!("{}", listing.heading());
    println!("{}", listing.subheading());
    println!("{}", count_label(events.len()));
    println!();

    if events.is_empty() {
        println!("{}", empty_message(&filter, &listing.filter_options));
        return Ok(());
    }

    let locale = config.chrono_locale();
    for event in events {
        let category = format::category_name(event.category.as_ref());
        println!(
            "{} {}  [{}]  {}  {}",
            category_icon(category).glyph(),
            event.display_title(),
            category,
            format::format_date(event.start_time.as_deref(), locale),
            format::fee_label(event.fee.as_ref()),
        );
        println!("    {}", format::image_url(&event.images));
    }
    Ok(())
}

async fn handle_categories(config: &Config, json: bool) -> Result<()> {
    let api = api_client(config)?;
    let categories = api.categories().await.context("Failed to load categories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    if categories.is_empty() {
        println!("No categories available yet.");
    }
    for category in &categories {
        let name = category.label().unwrap_or(format::UNCATEGORIZED);
        println!(
            "{} {:<24} {}",
            category_icon(name).glyph(),
            name,
            category.id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_login(config: &Config, token: String) -> Result<()> {
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("Token must not be empty");
    }

    let api = api_client(config)?;
    let user = api
        .current_user(&token)
        .await
        .context("Could not verify token")?;

    let session = Session {
        access_token: token,
        user,
    };
    session.save_to(&session_path()?)?;

    println!(
        "Signed in as {}",
        session
            .user
            .name
            .as_deref()
            .or(session.user.email.as_deref())
            .unwrap_or("user")
    );
    Ok(())
}

fn handle_logout() -> Result<()> {
    if Session::clear(&session_path()?)? {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}

async fn handle_profile_show(config: &Config, refresh: bool) -> Result<()> {
    let path = session_path()?;
    let mut session = Session::require(&path)?;

    if refresh {
        let api = api_client(config)?;
        session.user = api
            .current_user(&session.access_token)
            .await
            .context("Failed to fetch profile")?;
        session.save_to(&path)?;
    }

    for (label, value) in session.user.rows() {
        println!("{:<8} {}", label, if value.is_empty() { "-" } else { value });
    }
    Ok(())
}

async fn handle_profile_update(config: &Config, args: ProfileArgs) -> Result<()> {
    let path = session_path()?;
    let mut session = Session::require(&path)?;

    let mut form = ProfileForm::from_record(&session.user);
    args.apply_to(&mut form);

    let api = api_client(config)?;
    let outcome = save_profile(&api, &session.access_token, &mut session.user, &form)
        .await
        .map_err(|e| {
            tracing::error!("{}", e);
            anyhow::anyhow!("{}", e.user_message())
        })?;

    session.save_to(&path)?;
    println!("{}", outcome.message());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show(config: &Config) -> Result<()> {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Error writing {}", path.display()))?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}'. Set $EDITOR to your preferred editor",
            editor
        )
    })?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

fn handle_config_update() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    let backup_path = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup_path) {
        Ok(_) => println!("Backup created: {}", backup_path.display()),
        Err(e) => eprintln!("Warning: Could not create backup: {}", e),
    }

    // FEST_* overrides belong to this shell, not to the file
    let config = Config::from_file(&path)?;
    config
        .save()
        .with_context(|| format!("Error writing {}", path.display()))?;
    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_events() {
        let cli = Cli::try_parse_from(["fest", "events", "--category", "c1", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Events {
                category,
                filter,
                json,
            }) => {
                assert_eq!(category.as_deref(), Some("c1"));
                assert_eq!(filter, None);
                assert!(json);
            }
            _ => panic!("expected events command"),
        }

        let cli = Cli::try_parse_from(["fest"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_repair_commands() {
        let reset = Cli::try_parse_from(["fest", "config", "--reset"]).unwrap();
        assert!(reset.command.unwrap().repairs_config());

        let show = Cli::try_parse_from(["fest", "config", "--show"]).unwrap();
        assert!(!show.command.unwrap().repairs_config());
    }

    #[test]
    fn test_profile_args_overlay() {
        let cli = Cli::try_parse_from([
            "fest", "profile", "update", "--city", "Pune", "--mobile", "9876543210",
        ])
        .unwrap();
        let Some(Commands::Profile {
            action: ProfileAction::Update(args),
        }) = cli.command
        else {
            panic!("expected profile update");
        };

        let mut form = ProfileForm {
            name: "Asha".into(),
            city: "Mumbai".into(),
            ..Default::default()
        };
        args.apply_to(&mut form);
        assert_eq!(form.name, "Asha");
        assert_eq!(form.city, "Pune");
        assert_eq!(form.mobile_no, "9876543210");
    }
}
