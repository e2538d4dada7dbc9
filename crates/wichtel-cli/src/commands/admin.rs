use chrono::Utc;
use clap::Subcommand;
use wichtel_core::Command;

use crate::common::{open_store, print_events, CliResult};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Set the admin password
    SetPassword {
        password: String,
    },
    /// Check the admin password
    Login {
        password: String,
    },
    /// Wipe the whole application state
    Reset {
        /// Required confirmation flag
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: AdminAction) -> CliResult {
    let (mut store, _config) = open_store()?;
    let now = Utc::now();

    match action {
        AdminAction::SetPassword { password } => {
            let events = store.dispatch(Command::SetAdminPassword { password }, now)?;
            print_events(&events)?;
        }
        AdminAction::Login { password } => {
            match &store.state().admin_password {
                Some(stored) if stored == &password => println!("{{\"admin\": true}}"),
                Some(_) => return Err("wrong admin password".into()),
                None => return Err("no admin password set".into()),
            }
        }
        AdminAction::Reset { yes } => {
            if !yes {
                return Err("refusing to reset without --yes".into());
            }
            let events = store.dispatch(Command::Reset, now)?;
            print_events(&events)?;
        }
    }

    Ok(())
}
