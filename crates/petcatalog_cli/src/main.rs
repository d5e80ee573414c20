//! Command-line front end for the pet catalog.
//!
//! # Responsibility
//! - Map subcommands onto catalog service calls.
//! - Print outcome lines; every write is followed by a fresh read when shown.

mod args;

use anyhow::{anyhow, bail, Context, Result};
use args::{Cli, Command, PetFields};
use clap::Parser;
use log::info;
use petcatalog_core::db::open_db;
use petcatalog_core::{
    default_log_level, init_logging, CatalogService, DeleteOutcome, Gender, Pet, PetAddress,
    PetForm, SaveOutcome, SqlitePetGateway,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = open_db(&cli.db).with_context(|| format!("failed to open catalog `{}`", cli.db))?;
    let service = CatalogService::new(SqlitePetGateway::try_new(&conn)?);
    info!("event=cli_command module=cli status=start command={}", command_name(&cli.cmd));

    match cli.cmd {
        Command::List { json } => {
            let pets = service.list_pets()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pets)?);
            } else if pets.is_empty() {
                println!("No pets in the catalog.");
            } else {
                for pet in &pets {
                    println!("{}", render_pet(pet));
                }
            }
        }
        Command::Show { id } => match service.load_pet(PetAddress::item(id))? {
            Some(pet) => println!("{}", render_pet(&pet)),
            None => bail!("pet {id} not found"),
        },
        Command::Add(fields) => {
            let outcome = service.save_pet(None, &to_form(&fields)?)?;
            println!("{}", describe_save(outcome));
        }
        Command::Edit { id, fields } => {
            let outcome = service.save_pet(Some(PetAddress::item(id)), &to_form(&fields)?)?;
            println!("{}", describe_save(outcome));
        }
        Command::Delete { id } => match service.delete_pet(PetAddress::item(id))? {
            DeleteOutcome::Deleted(_) => println!("Pet deleted"),
            DeleteOutcome::DeleteFailed => println!("Error with deleting pet"),
        },
        Command::DeleteAll => {
            let removed = service.delete_all_pets()?;
            println!("Deleted {removed} pets");
        }
        Command::Dummy => match service.insert_dummy_pet()? {
            Some(address) => println!("Pet saved at {address}"),
            None => println!("Error with saving pet"),
        },
        Command::Type { address } => {
            println!("{}", service.content_type(&address)?.as_str());
        }
    }

    Ok(())
}

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::List { .. } => "list",
        Command::Show { .. } => "show",
        Command::Add(_) => "add",
        Command::Edit { .. } => "edit",
        Command::Delete { .. } => "delete",
        Command::DeleteAll => "delete-all",
        Command::Dummy => "dummy",
        Command::Type { .. } => "type",
    }
}

fn to_form(fields: &PetFields) -> Result<PetForm> {
    let gender = Gender::parse_label(&fields.gender)
        .with_context(|| format!("unknown gender `{}`", fields.gender))?;
    Ok(PetForm {
        name: fields.name.clone(),
        breed: fields.breed.clone(),
        gender,
        weight: fields.weight.clone(),
    })
}

fn describe_save(outcome: SaveOutcome) -> String {
    match outcome {
        SaveOutcome::Skipped => "Nothing to save".to_string(),
        SaveOutcome::Inserted(address) => format!("Pet saved at {address}"),
        SaveOutcome::InsertFailed => "Error with saving pet".to_string(),
        SaveOutcome::Updated(_) => "Pet updated".to_string(),
        SaveOutcome::UpdateFailed => "Error with updating pet".to_string(),
    }
}

fn render_pet(pet: &Pet) -> String {
    format!(
        "{:>4}  {:<20} {:<16} {:<8} {}",
        pet.id,
        pet.name,
        pet.breed.as_deref().unwrap_or("-"),
        pet.gender.label(),
        pet.weight
    )
}
