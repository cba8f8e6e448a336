//! visadesk CLI
//!
//! Command-line access to the visadesk dashboard backend.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use visadesk_admin::pages::{AttributesPage, Catalog, ContactRequestsPage, CountriesPage};
use visadesk_admin::{DragEnd, ReorderOutcome};
use visadesk_client::models::ContactRequestFilter;
use visadesk_client::services::PublicService;
use visadesk_client::{
    ApiClient, ClientConfig, NoticeBoard, NoticeLevel, Session, API_URL_ENV, DEFAULT_BASE_URL,
};
use visadesk_forms::{parse_rules, FieldValue, Language};

/// Manage visa destinations from the command line.
#[derive(Parser)]
#[command(name = "visadesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the backend API.
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Bearer token for admin endpoints.
    #[arg(long, env = "VISADESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Language of names and validation messages (`en` or `ar`).
    #[arg(long, default_value = "en")]
    lang: Language,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Country attributes.
    Attributes {
        #[command(subcommand)]
        action: OrderedAction,
    },

    /// Published countries.
    Countries {
        #[command(subcommand)]
        action: OrderedAction,
    },

    /// Visitor contact requests.
    ContactRequests {
        #[command(subcommand)]
        action: ContactRequestAction,
    },

    /// Search the public catalog.
    Catalog {
        /// Text to look for in English or Arabic names.
        search: Option<String>,
    },

    /// Validate a value against a rule list without contacting the server.
    Check {
        /// Comma-separated rules, e.g. `required,isEn`.
        #[arg(short, long)]
        rules: String,

        /// Value to validate.
        value: String,
    },
}

#[derive(Subcommand)]
enum OrderedAction {
    /// Show one page in display order.
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Move an item onto the position of another.
    Move {
        /// Id of the dragged item.
        source: i64,

        /// Id of the item it is dropped on.
        target: i64,
    },
}

#[derive(Subcommand)]
enum ContactRequestAction {
    /// Show one filtered page.
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only requests from this nationality.
        #[arg(long)]
        nationality: Option<String>,

        /// Only requests for this destination.
        #[arg(long)]
        destination: Option<String>,

        /// First day, `YYYY-MM-DD`.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day, `YYYY-MM-DD`.
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(clap::Args)]
struct PageArgs {
    /// Page number.
    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Page size (10, 20, 50 or 100).
    #[arg(short, long, default_value_t = 10)]
    limit: u32,

    /// Search text.
    #[arg(short, long)]
    search: Option<String>,
}

/// Reordering works on everything, not on one page.
const REORDER_PAGE_SIZE: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let lang = cli.lang;
    if let Commands::Check { rules, value } = &cli.command {
        return check(rules, value, lang);
    }

    let config = ClientConfig::from_env()?;
    let config = ClientConfig {
        base_url: cli.api_url.clone(),
        ..config
    };
    let session = cli.token.as_deref().map_or_else(Session::new, Session::with_token);
    let client = ApiClient::http(config)?.with_session(session);
    let notices = client.notices().clone();

    let result = run(cli.command, client.clone(), lang).await;
    print_notices(&notices);
    if client.session().login_required() {
        warn!("the token was rejected; pass a fresh one with --token or VISADESK_TOKEN");
    }
    result
}

async fn run(command: Commands, client: ApiClient, lang: Language) -> anyhow::Result<()> {
    match command {
        Commands::Attributes { action } => {
            let mut page = AttributesPage::new(client, lang);
            match action {
                OrderedAction::List { page: args } => {
                    args.apply(page.list_mut());
                    page.load().await?;
                    for attribute in page.items() {
                        let name = lang.pick(&attribute.name_en, &attribute.name_ar);
                        println!("{:>4}  #{:<3} {name}", attribute.id, attribute.order);
                    }
                    println!("page {} of {}", page.list().query().page, page.list().total_pages());
                }
                OrderedAction::Move { source, target } => {
                    page.list_mut().set_page_size(REORDER_PAGE_SIZE);
                    page.load().await?;
                    let outcome = page.move_item(DragEnd::new(source, target)).await;
                    report(&outcome)?;
                }
            }
        }

        Commands::Countries { action } => {
            let mut page = CountriesPage::new(client, lang);
            match action {
                OrderedAction::List { page: args } => {
                    args.apply(page.list_mut());
                    page.load().await?;
                    for country in page.items() {
                        let name = lang.pick(country.name_en(), country.name_ar());
                        let active = country.active_attributes().count();
                        println!(
                            "{:>4}  #{:<3} {name} ({active} attributes)",
                            country.id, country.order
                        );
                    }
                }
                OrderedAction::Move { source, target } => {
                    page.list_mut().set_page_size(REORDER_PAGE_SIZE);
                    page.load().await?;
                    let outcome = page.move_item(DragEnd::new(source, target)).await;
                    report(&outcome)?;
                }
            }
        }

        Commands::ContactRequests {
            action:
                ContactRequestAction::List {
                    page: args,
                    nationality,
                    destination,
                    from,
                    to,
                },
        } => {
            let mut page = ContactRequestsPage::new(client);
            args.apply(page.list_mut());
            page.set_filter(ContactRequestFilter {
                destination_country: destination,
                nationality,
                start_date: from,
                end_date: to,
            });
            page.load().await?;
            for request in page.items() {
                println!(
                    "{:>4}  {} | {} | {} | {}",
                    request.id,
                    request.name,
                    request.nationality,
                    request.phone_number,
                    request.destination_country
                );
            }
            println!("page {} of {}", page.list().query().page, page.list().total_pages());
        }

        Commands::Catalog { search } => {
            let mut catalog = Catalog::new(PublicService::new(client));
            catalog.load().await?;
            let found = catalog.search(search.as_deref().unwrap_or_default());
            for country in &found {
                println!("{}", lang.pick(country.name_en(), country.name_ar()));
                for attribute in country.active_attributes() {
                    let label = attribute
                        .attribute
                        .as_ref()
                        .map_or("", |a| lang.pick(&a.name_en, &a.name_ar));
                    let value = lang.pick(&attribute.value_en, &attribute.value_ar);
                    println!("    {label}: {value}");
                }
            }
            info!(count = found.len(), "catalog search done");
        }

        Commands::Check { rules, value } => check(&rules, &value, lang)?,
    }
    Ok(())
}

impl PageArgs {
    fn apply<T>(&self, list: &mut visadesk_admin::ListPage<T>) {
        list.set_page_size(self.limit);
        if let Some(search) = &self.search {
            list.set_search(search);
        }
        list.set_page(self.page);
    }
}

fn report(outcome: &ReorderOutcome) -> anyhow::Result<()> {
    match outcome {
        ReorderOutcome::Committed => info!("new order saved"),
        ReorderOutcome::NoOp => info!("nothing to move"),
        ReorderOutcome::RolledBack(reason) => anyhow::bail!("reorder rejected: {reason}"),
        ReorderOutcome::Busy | ReorderOutcome::Stale => {
            anyhow::bail!("reorder did not run: {outcome:?}")
        }
    }
    Ok(())
}

fn check(rules: &str, value: &str, lang: Language) -> anyhow::Result<()> {
    let rules = parse_rules(rules)?;
    let value = FieldValue::from(value);
    let mut failed = false;
    for rule in rules {
        match rule.validate(&value, lang) {
            Ok(()) => println!("ok    {rule}"),
            Err(message) => {
                failed = true;
                println!("fail  {rule}: {message}");
            }
        }
    }
    if failed {
        anyhow::bail!("value is invalid");
    }
    Ok(())
}

fn print_notices(notices: &NoticeBoard) {
    for notice in notices.drain() {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => info!("{}", notice.text),
            NoticeLevel::Error => warn!("{}", notice.text),
        }
    }
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
    fn test_parse_move() {
        let cli = Cli::try_parse_from([
            "visadesk",
            "--api-url",
            "http://localhost:3001/api",
            "--lang",
            "ar",
            "attributes",
            "move",
            "3",
            "1",
        ])
        .unwrap();
        assert_eq!(cli.lang, Language::Ar);
        assert!(matches!(
            cli.command,
            Commands::Attributes {
                action: OrderedAction::Move { source: 3, target: 1 }
            }
        ));
    }

    #[test]
    fn test_parse_contact_request_dates() {
        let cli = Cli::try_parse_from([
            "visadesk",
            "contact-requests",
            "list",
            "--from",
            "2024-01-01",
            "--nationality",
            "Syrian",
        ])
        .unwrap();
        let Commands::ContactRequests {
            action: ContactRequestAction::List { from, nationality, .. },
        } = cli.command
        else {
            panic!("expected contact-requests list");
        };
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(nationality.as_deref(), Some("Syrian"));
    }

    #[test]
    fn test_check_rules_offline() {
        assert!(check("required,isEn", "Visa", Language::En).is_ok());
        assert!(check("required,isNum", "12a", Language::En).is_err());
        assert!(check("required,bogus", "x", Language::En).is_err());
    }
}
