use clap::Subcommand;
use wichtel_core::{decode_share_data, encode_share_data, ShareData};

use crate::common::{open_store, CliResult};

#[derive(Subcommand)]
pub enum ShareAction {
    /// Build a share token for a giver's reveal page
    Link {
        /// Giver participant id
        participant: String,
        /// Group id
        group: String,
        /// Organizer name embedded in the payload
        #[arg(long, default_value = "Organizer")]
        admin_name: String,
    },
    /// Decode a share token and print its payload
    Decode {
        token: String,
    },
}

pub fn run(action: ShareAction) -> CliResult {
    match action {
        ShareAction::Link {
            participant,
            group,
            admin_name,
        } => {
            let (store, _config) = open_store()?;
            let state = store.state();
            let giver = state
                .participant(&participant)
                .ok_or_else(|| format!("unknown participant: {participant}"))?;
            let g = state
                .group(&group)
                .ok_or_else(|| format!("unknown group: {group}"))?;
            let receiver_id = giver
                .assignments
                .get(&group)
                .ok_or("the draw has not run for this group yet")?;
            let receiver = state
                .participant(receiver_id)
                .ok_or("drawn receiver no longer exists")?;

            let token = encode_share_data(&ShareData {
                recipient_name: receiver.name.clone(),
                recipient_wishlist: receiver.wishlist_items.clone(),
                group_name: g.name.clone(),
                budget: g.budget.clone(),
                currency: g.currency.clone(),
                exchange_date: g.exchange_date,
                admin_name,
            })?;
            println!("{token}");
        }
        ShareAction::Decode { token } => {
            let data = decode_share_data(&token)?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}
