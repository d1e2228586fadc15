use clap::Subcommand;

use banafit_core::gamification::DIAMOND_PACKS;
use banafit_core::{Action, SocialPlatform, StoreError};
use chrono::NaiveDate;

use super::{CmdResult, Session};

#[derive(Subcommand)]
pub enum DiamondsAction {
    /// Show the balance
    Balance,
    /// Watch an ad for a few diamonds
    Ad,
    /// List the diamond packs
    Packs,
    /// Buy a diamond pack
    Buy {
        /// Pack number as listed by 'packs' (1-4)
        pack: usize,
    },
    /// Follow BanaFit on a social network (once per platform)
    Follow {
        /// instagram, facebook or x
        platform: SocialPlatform,
    },
}

pub fn run(action: DiamondsAction, today: Option<NaiveDate>) -> CmdResult {
    if let DiamondsAction::Packs = action {
        for (i, pack) in DIAMOND_PACKS.iter().enumerate() {
            println!("{}. {:>5} 💎  ${}", i + 1, pack.diamonds, pack.price);
        }
        return Ok(());
    }

    let mut session = Session::open(today)?;
    match action {
        DiamondsAction::Balance => {
            let profile = session.store.profile().ok_or(StoreError::NoSession)?;
            println!("{} 💎", profile.diamonds);
            for platform in SocialPlatform::ALL {
                if !profile.claimed_social_rewards.contains(&platform) {
                    println!("  Follow us on {platform} for a bonus.");
                }
            }
            Ok(())
        }
        DiamondsAction::Ad => session.run(Action::WatchAd),
        DiamondsAction::Buy { pack } => {
            let pack = pack.checked_sub(1).ok_or("pack numbers start at 1")?;
            session.run(Action::BuyPack { pack })
        }
        DiamondsAction::Follow { platform } => session.run(Action::ClaimSocial(platform)),
        DiamondsAction::Packs => Ok(()),
    }
}
