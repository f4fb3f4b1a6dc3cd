//! Command-line front end for the sales dashboard.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

use sales_dashboard::App;
use sales_dashboard::domain::sales::SalesByDay;
use sales_dashboard::domain::types::ClientId;
use sales_dashboard::forms::client::ClientForm;
use sales_dashboard::models::config::AppConfig;
use sales_dashboard::services::clients::{self, ClientCard};
use sales_dashboard::services::dashboard;
use sales_dashboard::services::{ServiceError, ServiceResult};

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the signed-in operator
    Whoami,
    /// Manage the client roster
    #[command(subcommand)]
    Clients(ClientsCommand),
    /// Show sales statistics
    Dashboard,
}

#[derive(Subcommand, Debug)]
enum ClientsCommand {
    /// List clients with their missing letter
    List,
    /// Add a client
    Add(ClientFields),
    /// Edit a client; omitted fields keep their current value
    Edit {
        #[arg(value_parser = parse_client_id)]
        id: ClientId,
        #[command(flatten)]
        fields: OptionalClientFields,
    },
    /// Delete a client after confirmation
    Delete {
        #[arg(value_parser = parse_client_id)]
        id: ClientId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct ClientFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    birth_date: String,
}

#[derive(Args, Debug)]
struct OptionalClientFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    birth_date: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let app = match App::start(&config) {
        Ok(app) => app,
        Err(err) => {
            log::error!("Failed to set up backend gateway: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&app, cli.command).await {
        Ok(code) => code,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App, command: Command) -> ServiceResult<ExitCode> {
    let session = app.sessions.handle();

    match command {
        Command::Login { email, password } => {
            let outcome = app.sessions.login(&app.gateway, &email, &password).await;
            match outcome.error() {
                None => println!("Signed in as {email}"),
                Some(reason) => {
                    eprintln!("{reason}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Logout => {
            app.sessions.logout().await;
            println!("Signed out");
        }
        Command::Whoami => match app.sessions.current() {
            Some(current) => println!("{} <{}>", current.name, current.email),
            None => println!("Not signed in"),
        },
        Command::Clients(ClientsCommand::List) => {
            let page = clients::load_clients(&app.gateway, &session).await?;
            if page.is_empty() {
                println!("No clients yet. Start by adding one.");
            }
            for card in &page.cards {
                print_card(card);
            }
        }
        Command::Clients(ClientsCommand::Add(fields)) => {
            let form = ClientForm {
                name: fields.name,
                email: fields.email,
                birth_date: fields.birth_date,
            };
            let created = clients::add_client(&app.gateway, &session, &form).await?;
            println!("Added client {} ({})", created.name, created.id);
        }
        Command::Clients(ClientsCommand::Edit {
            id: client_id,
            fields,
        }) => {
            let page = clients::load_clients(&app.gateway, &session).await?;
            let card = page
                .find(&client_id)
                .ok_or_else(|| ServiceError::NotFound(client_id.clone()))?;

            let mut form = ClientForm::from_client(&card.client);
            if let Some(name) = fields.name {
                form.name = name;
            }
            if let Some(email) = fields.email {
                form.email = email;
            }
            if let Some(birth_date) = fields.birth_date {
                form.birth_date = birth_date;
            }

            clients::edit_client(&app.gateway, &session, &client_id, &form).await?;
            println!("Updated client {client_id}");
        }
        Command::Clients(ClientsCommand::Delete { id, yes }) => {
            let pending = clients::request_delete(&session, id)?;
            if !yes && !confirm(&format!("Delete client {}? [y/N] ", pending.client_id())) {
                println!("Cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            let client_id = pending.client_id().clone();
            clients::confirm_delete(&app.gateway, &session, pending).await?;
            println!("Deleted client {client_id}");
        }
        Command::Dashboard => {
            let data = dashboard::load_dashboard(&app.gateway, &session).await?;
            let summary = &data.summary;

            println!("Total sales:   {}", format_amount(summary.total));
            println!("Daily average: {}", format_amount(summary.average));
            if let Some(best) = &summary.best_day {
                println!(
                    "Best day:      {} on {}",
                    format_amount(best.total),
                    best.date.format("%d/%m")
                );
            }
            println!("Active days:   {}", summary.active_days);
            println!();
            print_sales(&data.sales_by_day);
            println!();

            let top = &data.top_clients;
            println!(
                "Highest volume:    {} <{}>",
                top.highest_volume_client.name, top.highest_volume_client.email
            );
            println!(
                "Highest average:   {} <{}>",
                top.highest_average_client.name, top.highest_average_client.email
            );
            println!(
                "Highest frequency: {} <{}>",
                top.highest_frequency_client.name, top.highest_frequency_client.email
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_client_id(raw: &str) -> Result<ClientId, String> {
    ClientId::new(raw).map_err(|err| err.to_string())
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn report(err: &ServiceError) {
    eprintln!("{err}");
    if let ServiceError::Form(form_err) = err {
        for (field, message) in form_err.field_messages() {
            eprintln!("  {field}: {message}");
        }
    }
}

fn print_card(card: &ClientCard) {
    let client = &card.client;
    println!("{} [{}]", client.name, client.id);
    println!("  email:        {}", client.email);
    match client.birth_date {
        Some(birth_date) => println!("  birth date:   {}", birth_date.format("%d/%m/%Y")),
        None => println!("  birth date:   unknown"),
    }
    if let Some(created_at) = client.created_at {
        println!("  registered:   {}", created_at.format("%d/%m/%Y"));
    }
    if card.has_every_letter() {
        println!("  missing letter: - (every letter present!)");
    } else {
        println!(
            "  missing letter: {}",
            card.missing_letter.to_ascii_uppercase()
        );
    }
}

fn print_sales(days: &[SalesByDay]) {
    for day in days {
        println!("{}  {:>12}", day.date.format("%d/%m"), format_amount(day.total));
    }
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
