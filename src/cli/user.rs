//! User command implementation

use anyhow::Result;
use clap::Subcommand;

use tavern::store::UserDirectory;
use tavern::{User, UserRole};

use super::Context;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user or update an existing one
    Add {
        /// Stable user id
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// user, admin, owner or moderator
        #[arg(long, default_value = "user")]
        role: UserRole,

        /// Also store this user as settings.default_user
        #[arg(long)]
        default: bool,
    },

    /// List registered users
    List,
}

pub fn user_command(ctx: &Context, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Add {
            id,
            name,
            role,
            default,
        } => {
            let user = User::new(id, name.trim()).with_role(role);
            ctx.db().upsert_user(&user)?;
            println!("Saved {} ({}) as {}", user.display_name, user.id, user.role);

            if default {
                ctx.set_default_user(&user.id)?;
                println!("Default user is now {}", user.id);
            }
        }
        UserCommand::List => {
            let users = ctx.db().list_users()?;
            if users.is_empty() {
                println!("No users registered.");
                return Ok(());
            }
            let default_user = ctx.config.settings.default_user.as_deref();
            println!("Users ({}):\n", users.len());
            for user in users {
                let mark = if default_user == Some(user.id.as_str()) { "*" } else { " " };
                println!("{} {:<16} {:<24} {}", mark, user.id, user.display_name, user.role);
            }
        }
    }
    Ok(())
}
