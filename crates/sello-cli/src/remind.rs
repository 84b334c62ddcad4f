//! `sello remind` — schedule and list regeneration reminders.

use std::path::Path;

use clap::{Args, Subcommand};

use sello_core::{RecordId, Timestamp, WalletAddress};
use sello_store::{ReminderRecord, ReminderStatus, ReminderStore};

use crate::statefile;

/// Arguments for `sello remind`.
#[derive(Args, Debug)]
pub struct RemindArgs {
    #[command(subcommand)]
    pub action: RemindAction,
}

/// Reminder operations.
#[derive(Subcommand, Debug)]
pub enum RemindAction {
    /// Schedule a reminder N days out.
    Set {
        /// Holder wallet address.
        #[arg(long)]
        owner: String,
        /// Days until the reminder fires (the demo offers 7/15/30/60).
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// List a holder's reminders.
    List {
        /// Holder wallet address.
        #[arg(long)]
        owner: String,
    },
    /// Print and complete every reminder that is due.
    Due,
}

/// Run `sello remind`.
pub async fn run_remind(args: &RemindArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;

    match &args.action {
        RemindAction::Set { owner, days } => {
            let owner = WalletAddress::new(owner.clone())?;
            let now = Timestamp::now();
            let record = ReminderRecord {
                reminder_id: RecordId::new(),
                owner,
                remind_at: now.plus_days(*days),
                status: ReminderStatus::Pending,
                created_at: now,
            };
            world.store.put_reminder(record.clone()).await?;
            statefile::save(state_path, &world)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(0)
        }
        RemindAction::List { owner } => {
            let owner = WalletAddress::new(owner.clone())?;
            let records = world.store.reminders_for_owner(&owner).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(0)
        }
        RemindAction::Due => {
            let due = world.store.due_reminders(&Timestamp::now()).await?;
            for record in &due {
                println!("{}", serde_json::to_string_pretty(record)?);
                world.store.complete_reminder(record.reminder_id).await?;
            }
            if !due.is_empty() {
                statefile::save(state_path, &world)?;
            }
            Ok(0)
        }
    }
}
