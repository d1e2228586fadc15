use clap::Subcommand;

use banafit_core::{Action, CosmeticItem, StoreError};
use chrono::NaiveDate;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum ShopAction {
    /// List every item with price and ownership
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Buy an item, e.g. "frame:gold" or "theme:midnight"
    Buy { item: CosmeticItem },
    /// Apply an owned theme or frame, or toggle an accessory
    Activate { item: CosmeticItem },
    /// Remove the active avatar frame
    Unframe,
}

#[derive(serde::Serialize)]
struct ShopEntry {
    item: CosmeticItem,
    price: u64,
    owned: bool,
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    badge: Option<&'static str>,
}

pub fn run(action: ShopAction, today: Option<NaiveDate>) -> CmdResult {
    let mut session = Session::open(today)?;
    match action {
        ShopAction::List { json } => {
            let profile = session.store.profile().ok_or(StoreError::NoSession)?;
            let entries: Vec<ShopEntry> = CosmeticItem::catalog()
                .into_iter()
                .map(|item| ShopEntry {
                    item,
                    price: item.price(),
                    owned: profile.inventory.owns(item),
                    active: profile.inventory.is_active(item),
                    badge: item.badge(),
                })
                .collect();
            if json {
                return print_json(&entries);
            }
            println!("Balance: {} 💎", profile.diamonds);
            for entry in &entries {
                let status = match (entry.owned, entry.active) {
                    (true, true) => "active",
                    (true, false) => "owned",
                    _ => "",
                };
                println!(
                    "  {:<22} {:>5} 💎  {:<6} {}",
                    entry.item.to_string(),
                    entry.price,
                    status,
                    entry.badge.unwrap_or_default()
                );
            }
            Ok(())
        }
        ShopAction::Buy { item } => session.run(Action::PurchaseCosmetic(item)),
        ShopAction::Activate { item } => session.run(Action::ActivateCosmetic(item)),
        ShopAction::Unframe => session.run(Action::DeactivateFrame),
    }
}
