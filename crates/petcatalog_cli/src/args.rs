use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage a local pet catalog",
    long_about = "List, add, edit and delete pets stored in a local SQLite catalog."
)]
pub struct Cli {
    #[arg(
        long,
        env = "PETCATALOG_DB",
        default_value = "petcatalog.sqlite3",
        value_name = "PATH",
        help = "SQLite database file holding the catalog"
    )]
    pub db: String,

    #[arg(
        long = "log-dir",
        env = "PETCATALOG_LOG_DIR",
        value_name = "DIR",
        help = "Absolute directory for rolling log files (logging is off when unset)"
    )]
    pub log_dir: Option<String>,

    #[arg(
        long = "log-level",
        env = "PETCATALOG_LOG_LEVEL",
        value_name = "LEVEL",
        help = "trace|debug|info|warn|error (defaults to the build-mode level)"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List every pet in the catalog")]
    List {
        #[arg(long, help = "Print pets as JSON")]
        json: bool,
    },
    #[command(about = "Show one pet")]
    Show { id: i64 },
    #[command(about = "Add a new pet")]
    Add(PetFields),
    #[command(about = "Replace every field of an existing pet")]
    Edit {
        id: i64,
        #[command(flatten)]
        fields: PetFields,
    },
    #[command(about = "Delete one pet")]
    Delete { id: i64 },
    #[command(name = "delete-all", about = "Delete every pet")]
    DeleteAll,
    #[command(about = "Insert the sample pet (Toto the terrier)")]
    Dummy,
    #[command(about = "Print the content type of an address")]
    Type { address: String },
}

#[derive(Args, Debug, Clone)]
pub struct PetFields {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub breed: String,
    #[arg(long, default_value = "unknown", help = "unknown|male|female")]
    pub gender: String,
    #[arg(long, default_value = "", help = "Whole number, empty means 0")]
    pub weight: String,
}
