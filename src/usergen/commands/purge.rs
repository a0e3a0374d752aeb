use crate::commands::{CmdMessage, CmdResult, PurgeReport};
use crate::error::Result;
use crate::progress::Progress;
use crate::roles::{purgeable_roles, RoleRegistry};
use crate::store::AccountStore;
use tracing::{debug, info};

pub const CONFIRM_PROMPT: &str =
    "Are you sure you want to remove all users? This will NOT delete administrators.";

/// Delete every account outside the administrator role.
///
/// `confirm` is asked once, before anything is read from the store, unless
/// `skip_confirm` is set. Accounts that also hold `admin_role` are left alone
/// even when listed under another role. Deletion errors abort the run.
pub fn run<S, R>(
    store: &mut S,
    registry: &R,
    admin_role: &str,
    skip_confirm: bool,
    confirm: &mut dyn FnMut(&str) -> Result<bool>,
    progress: &mut dyn Progress,
) -> Result<CmdResult>
where
    S: AccountStore + ?Sized,
    R: RoleRegistry + ?Sized,
{
    if !skip_confirm && !confirm(CONFIRM_PROMPT)? {
        return Ok(CmdResult::cancelled());
    }

    let mut report = PurgeReport::default();
    for role in purgeable_roles(registry, admin_role)? {
        let accounts: Vec<_> = store
            .accounts_with_role(&role.key)?
            .into_iter()
            .filter(|account| {
                let protected = account.has_role(admin_role);
                if protected {
                    debug!(id = %account.id, role = %role.key, "keeping administrator");
                }
                !protected
            })
            .collect();

        if accounts.is_empty() {
            continue;
        }

        progress.start(
            &format!("Deleting {} {}(s)", accounts.len(), role.display_name),
            accounts.len(),
        );
        for account in &accounts {
            progress.tick();
            store.delete_account(account.id, None)?;
            debug!(id = %account.id, username = %account.username, "deleted user");
        }
        progress.finish();

        report.deleted += accounts.len();
    }

    info!(deleted = report.deleted, "purge finished");

    let mut result = CmdResult::default().with_purged(report);
    result.add_message(CmdMessage::success("Done."));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UsergenError;
    use crate::model::Role;
    use crate::progress::recording::RecordingProgress;
    use crate::progress::NoProgress;
    use crate::roles::ConfiguredRoles;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn yes(_: &str) -> Result<bool> {
        Ok(true)
    }

    fn no(_: &str) -> Result<bool> {
        Ok(false)
    }

    fn populated() -> InMemoryStore {
        StoreFixture::new()
            .with_admin("root")
            .with_admin("second_admin")
            .with_accounts(3, "subscriber")
            .with_accounts(2, "editor")
            .with_accounts(1, "author")
            .store
    }

    #[test]
    fn declining_deletes_nothing() {
        let mut store = populated();
        let before = store.len();

        let result = run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            false,
            &mut no,
            &mut NoProgress,
        )
        .unwrap();

        assert!(result.cancelled);
        assert!(result.purged.is_none());
        assert_eq!(result.messages[0].content, "Operation cancelled.");
        assert_eq!(store.len(), before);
    }

    #[test]
    fn confirming_keeps_only_administrators() {
        let mut store = populated();

        let result = run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            false,
            &mut yes,
            &mut NoProgress,
        )
        .unwrap();

        assert_eq!(result.purged.unwrap().deleted, 6);
        assert_eq!(store.len(), 2);
        assert!(store
            .accounts()
            .iter()
            .all(|a| a.has_role("administrator")));
    }

    #[test]
    fn prompt_is_shown_once_with_the_warning() {
        let mut store = populated();
        let mut prompts = Vec::new();
        let mut record = |prompt: &str| -> Result<bool> {
            prompts.push(prompt.to_string());
            Ok(true)
        };

        run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            false,
            &mut record,
            &mut NoProgress,
        )
        .unwrap();

        assert_eq!(prompts, [CONFIRM_PROMPT]);
    }

    #[test]
    fn skip_confirm_never_prompts() {
        let mut store = populated();
        let mut asked = false;
        let mut record = |_: &str| -> Result<bool> {
            asked = true;
            Ok(false)
        };

        let result = run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            true,
            &mut record,
            &mut NoProgress,
        )
        .unwrap();

        assert!(!asked);
        assert_eq!(result.purged.unwrap().deleted, 6);
    }

    #[test]
    fn admins_with_extra_roles_survive() {
        let mut store = InMemoryStore::new();
        store.insert("boss", "boss@example.test", &["administrator", "editor"]);
        store.insert("writer", "writer@example.test", &["editor"]);

        run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            true,
            &mut yes,
            &mut NoProgress,
        )
        .unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_username("boss").is_some());
    }

    #[test]
    fn one_bar_per_non_empty_role() {
        let mut store = populated();
        let mut progress = RecordingProgress::default();

        run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            true,
            &mut yes,
            &mut progress,
        )
        .unwrap();

        let labels: Vec<&str> = progress.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Deleting 2 Editor(s)", "Deleting 1 Author(s)", "Deleting 3 Subscriber(s)"]
        );
        assert!(progress.bars.iter().all(|b| b.finished && b.ticks == b.total));
    }

    #[test]
    fn accounts_without_a_listed_role_are_kept() {
        let mut store = populated();
        store.insert("shopper", "shopper@example.test", &["customer"]);

        run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            true,
            &mut yes,
            &mut NoProgress,
        )
        .unwrap();

        assert!(store.find_by_username("shopper").is_some());
    }

    #[test]
    fn custom_admin_role_is_protected() {
        let mut store = InMemoryStore::new();
        store.insert("owner", "owner@example.test", &["site_owner"]);
        store.insert("member", "member@example.test", &["member"]);
        let registry = ConfiguredRoles::new(vec![
            Role::new("site_owner", "Site owner"),
            Role::new("member", "Member"),
        ]);

        run(&mut store, &registry, "site_owner", true, &mut yes, &mut NoProgress).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_by_username("owner").is_some());
    }

    #[test]
    fn prompt_errors_propagate() {
        let mut store = populated();
        let mut broken = |_: &str| -> Result<bool> {
            Err(UsergenError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )))
        };

        let result = run(
            &mut store,
            &ConfiguredRoles::default(),
            "administrator",
            false,
            &mut broken,
            &mut NoProgress,
        );

        assert!(result.is_err());
        assert_eq!(store.len(), 8);
    }
}
