mod logs;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use contact_countries_rest::RestCountryNameProvider;
use contact_domain::{
    ServiceError, ServiceResult,
    contact::{ArcContactService, ContactDraft, ContactServiceImpl},
    country::{ArcCountryNameProvider, CountryNameProvider},
    validate::{is_valid_email, is_valid_phone},
};
use contact_persistence_sqlite::SqliteContactRepository;
use log::warn;

#[derive(Parser)]
#[command(name = "contact-book", about = "Personal contact manager")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new contact
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        country: String,
        /// Path to an image file stored with the contact
        #[arg(long)]
        photo: PathBuf,
    },
    /// List contacts, optionally filtered by first name
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the country suggestion list
    Countries,
}

async fn run_add(
    contact_service: &ArcContactService,
    country_provider: &ArcCountryNameProvider,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    country: String,
    photo: PathBuf,
) -> ServiceResult<()> {
    // Same rule as the entry form: blank optional fields skip validation,
    // non-blank ones must be well-formed before anything is stored.
    if !email.is_empty() && !is_valid_email(&email) {
        return ServiceError::validation("email", "not a valid email address");
    }
    if !phone.is_empty() && !is_valid_phone(&phone) {
        return ServiceError::validation("phone", "must be 6 to 14 digits");
    }

    // Suggestion list is best-effort; on failure the country stays free text.
    match country_provider.fetch_country_names().await {
        Ok(countries) => {
            if !country.is_empty() && !countries.iter().any(|c| c == &country) {
                warn!("Country '{}' is not in the suggestion list", country);
            }
        }
        Err(e) => warn!("Country suggestions unavailable: {}", e),
    }

    let photo = std::fs::read(&photo)
        .map_err(|e| ServiceError::Validation {
            field: "photo".to_string(),
            reason: format!("could not read {}: {}", photo.display(), e),
        })?;

    let contact = contact_service
        .create_contact(ContactDraft {
            first_name,
            last_name,
            email,
            phone,
            country,
            photo,
        })
        .await?;
    println!("Added contact {} ({})", contact.id, contact.full_name());
    Ok(())
}

async fn run_list(contact_service: &ArcContactService, query: Option<String>) -> ServiceResult<()> {
    let contacts = match query {
        Some(query) if !query.is_empty() => contact_service.search_contacts(&query).await?,
        _ => contact_service.list_contacts().await?,
    };
    for contact in contacts {
        println!("{:>4}  {}  {}", contact.id, contact.full_name(), contact.email);
    }
    Ok(())
}

async fn run_countries(country_provider: &ArcCountryNameProvider) -> ServiceResult<()> {
    let countries = country_provider.fetch_country_names().await?;
    for country in countries {
        println!("{}", country);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    logs::init_logger();

    let cli = Cli::parse();

    let contact_repository = SqliteContactRepository::new();
    if let Err(e) = contact_repository.init_schema().await {
        log::error!("Failed to initialize contact store: {}", e);
        std::process::exit(1);
    }

    let contact_service: ArcContactService = Arc::new(Box::new(ContactServiceImpl::new(
        Arc::new(Box::new(contact_repository)),
    )));
    let country_provider: ArcCountryNameProvider =
        Arc::new(Box::new(RestCountryNameProvider::new()));

    let result = match cli.command {
        Command::Add {
            first_name,
            last_name,
            email,
            phone,
            country,
            photo,
        } => {
            run_add(
                &contact_service,
                &country_provider,
                first_name,
                last_name,
                email,
                phone,
                country,
                photo,
            )
            .await
        }
        Command::List { query } => run_list(&contact_service, query).await,
        Command::Countries => run_countries(&country_provider).await,
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
