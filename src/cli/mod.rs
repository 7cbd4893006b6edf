pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "menuctl")]
#[command(about = "Menu API operator CLI - database bootstrap and account management")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply the database schema (users and menus tables)")]
    InitDb,

    #[command(about = "Create a user account")]
    CreateUser {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        password: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::InitDb => commands::init_db::handle().await,
        Commands::CreateUser { email, name, password } => {
            commands::user::handle_create(&email, &name, &password).await
        }
    }
}
