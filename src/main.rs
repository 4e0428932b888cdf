use tracing::{error, info, info_span, warn};
use user_records::{setup_tracing, StorageConfig, UserError, UserRecord, UserStorage};

fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorageConfig::from_env().map_err(|e| e.to_string())?;
    info!(storage_dir = %config.storage_dir.display(), max_id = config.max_id, "Starting user records demo");

    let storage = UserStorage::new(config).map_err(|e| e.to_string())?;

    let user_id = {
        let _span = info_span!("user_creation").entered();
        let mut user = UserRecord::new(storage.clone());
        let id = create_with_retry(&mut user, "Alice", 100.0)?;

        user.increase_balance(25.0).map_err(|e| e.to_string())?;
        user.decrease_balance(40.0).map_err(|e| e.to_string())?;
        user.save().map_err(|e| e.to_string())?;
        id
    };

    info!(user_id, "User created successfully");

    let _span = info_span!("user_reload", user_id).entered();
    let mut user = UserRecord::open(storage, user_id).map_err(|e| e.to_string())?;
    info!(user_name = %user.name(), balance = user.balance(), "User reloaded");

    // An overdraft is rejected and leaves the balance alone.
    match user.decrease_balance(1_000.0) {
        Err(e @ UserError::Validation(_)) => info!(error = %e, balance = user.balance(), "Overdraft rejected"),
        Err(e) => {
            error!(error = %e, "Unexpected failure");
            return Err(e.to_string());
        }
        Ok(()) => return Err("overdraft was accepted".to_string()),
    }

    info!("Demo completed successfully");
    Ok(())
}

/// `create` never retries on its own; the caller decides how often to redraw.
fn create_with_retry(user: &mut UserRecord, name: &str, balance: f64) -> Result<u32, String> {
    const MAX_ATTEMPTS: usize = 5;

    for attempt in 1..=MAX_ATTEMPTS {
        match user.create(name, balance) {
            Ok(id) => return Ok(id),
            Err(UserError::Conflict(id)) => warn!(attempt, id, "Id already taken, drawing again"),
            Err(e) => return Err(e.to_string()),
        }
    }
    Err(format!("no free user id after {} attempts", MAX_ATTEMPTS))
}
