use crate::commands::{CmdMessage, CmdResult, GenerateReport};
use crate::error::{Result, UsergenError};
use crate::model::{AccountId, NewAccount, UserRecord};
use crate::progress::Progress;
use crate::store::AccountStore;
use tracing::{debug, info, warn};

use super::helpers::generate_password;

pub const INVALID_COUNT: &str = "You must specify the amount of users you wish to generate.";

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(AccountId),
    Skipped,
    Failed,
}

/// Parse the user-typed count.
///
/// Accepts what an integer filter would: optional surrounding whitespace, an
/// optional sign, then digits without leading zeros. Anything negative is
/// rejected as well.
pub fn parse_count(raw: &str) -> Result<usize> {
    let invalid = || UsergenError::InvalidArgument(INVALID_COUNT.to_string());

    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'+') => (false, &trimmed[1..]),
        Some(b'-') => (true, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(invalid());
    }
    if negative && digits != "0" {
        return Err(invalid());
    }

    digits.parse::<usize>().map_err(|_| invalid())
}

/// Provision accounts for the first `count` records.
///
/// Fails with `InsufficientData` before touching the store when `count`
/// exceeds the records on hand. Duplicate and failed records are counted in
/// the report, never surfaced as errors.
pub fn run<S: AccountStore + ?Sized>(
    store: &mut S,
    records: &[UserRecord],
    count: usize,
    password_length: usize,
    progress: &mut dyn Progress,
) -> Result<CmdResult> {
    let total = records.len();
    if count > total {
        return Err(UsergenError::InsufficientData { total });
    }

    let batch = &records[..count];
    let mut report = GenerateReport {
        requested: count,
        ..GenerateReport::default()
    };

    progress.start(&format!("Generating {} users(s)", count), count);
    for record in batch {
        progress.tick();
        match provision(store, record, password_length) {
            Outcome::Created(_) => report.created += 1,
            Outcome::Skipped => report.skipped += 1,
            Outcome::Failed => report.failed += 1,
        }
    }
    progress.finish();

    info!(
        requested = report.requested,
        created = report.created,
        skipped = report.skipped,
        failed = report.failed,
        "generate finished"
    );

    let mut result = CmdResult::default().with_generated(report);
    result.add_message(CmdMessage::success("Done."));
    Ok(result)
}

/// Create one account unless its username or email is already taken.
///
/// Never fails: a store error on the existence check or the create is logged
/// and reported as `Outcome::Failed`, so the batch keeps going.
pub fn provision<S: AccountStore + ?Sized>(
    store: &mut S,
    record: &UserRecord,
    password_length: usize,
) -> Outcome {
    let registered = match store.username_exists(&record.username) {
        Ok(false) => store.email_exists(&record.email),
        other => other,
    };
    match registered {
        Ok(true) => {
            debug!(
                username = %record.username,
                email = %record.email,
                "already registered, skipping"
            );
            return Outcome::Skipped;
        }
        Ok(false) => {}
        Err(err) => {
            warn!(
                username = %record.username,
                error = %err,
                "could not check for an existing user"
            );
            return Outcome::Failed;
        }
    }

    let account = NewAccount {
        username: record.username.clone(),
        email: record.email.clone(),
        password: generate_password(password_length),
    };

    let id = match store.create_account(&account) {
        Ok(id) => id,
        Err(err) => {
            warn!(username = %record.username, error = %err, "could not create user");
            return Outcome::Failed;
        }
    };

    if let Err(err) = store.update_names(id, &record.first_name, &record.last_name) {
        warn!(%id, error = %err, "created user but could not set names");
    }
    debug!(%id, username = %record.username, "created user");
    Outcome::Created(id)
}
