use tracing::{debug, info, instrument, warn};

use super::validation::{validate_balance, validate_name};
use crate::error::{Result, UserError};
use crate::storage::{self, UserStorage};

/// A user persisted as one file in a storage directory.
///
/// A record starts out uninitialized (no id). It becomes initialized through
/// [`UserRecord::create`] or [`UserRecord::load`]; only then can its balance
/// change or its state be saved. Changes are kept in memory until
/// [`UserRecord::save`] is called.
#[derive(Debug, Clone)]
pub struct UserRecord {
    id: Option<u32>,
    name: String,
    balance: f64,
    storage: UserStorage,
}

impl UserRecord {
    /// Creates an uninitialized record bound to `storage`.
    pub fn new(storage: UserStorage) -> Self {
        Self {
            id: None,
            name: String::new(),
            balance: 0.0,
            storage,
        }
    }

    /// Loads an existing user into a fresh record.
    pub fn open(storage: UserStorage, id: u32) -> Result<Self> {
        let mut record = Self::new(storage);
        record.load(id)?;
        Ok(record)
    }

    /// Creates a new user under a freshly drawn id and writes its file.
    ///
    /// # Arguments
    /// * `name` - User name, 1 to 100 characters
    /// * `balance` - Opening balance, not negative
    ///
    /// # Errors
    /// - [`UserError::Validation`] for a bad name or balance
    /// - [`UserError::Conflict`] if the drawn id is already taken. There is
    ///   no retry; call `create` again to draw another id.
    ///
    /// In-memory state is left untouched on failure.
    #[instrument(fields(user_name = %name), skip(self, name))]
    pub fn create(&mut self, name: &str, balance: f64) -> Result<u32> {
        debug!("Processing create request");

        if let Err(e) = validate_name(name).and_then(|_| validate_balance(balance)) {
            warn!(error = %e, "Validation failed");
            return Err(e);
        }

        self.storage.ensure_dir()?;
        let id = self.storage.generate_id();
        self.storage.create_new(id, &storage::encode(name, balance))?;

        self.id = Some(id);
        self.name = name.to_string();
        self.balance = balance;

        info!(user_id = id, "User created successfully");
        Ok(id)
    }

    /// Replaces in-memory state with the stored user `id`.
    ///
    /// # Errors
    /// - [`UserError::NotFound`] if there is no file for `id`
    /// - [`UserError::Corrupt`] if the file is not a valid user file
    #[instrument(skip(self))]
    pub fn load(&mut self, id: u32) -> Result<()> {
        debug!("Processing load request");

        let contents = self.storage.read(id)?;
        let (name, balance) = storage::decode(id, &contents)?;

        self.id = Some(id);
        self.name = name;
        self.balance = balance;

        debug!(user_name = %self.name, balance = self.balance, "User loaded");
        Ok(())
    }

    /// Writes in-memory state to the user's file, replacing its contents.
    #[instrument(fields(user_id = ?self.id), skip(self))]
    pub fn save(&self) -> Result<()> {
        let id = self.require_id()?;
        self.storage.write(id, &storage::encode(&self.name, self.balance))?;
        info!(balance = self.balance, "User saved");
        Ok(())
    }

    /// Adds `amount` to the balance.
    ///
    /// Unlike a plain unchecked add, the result must stay non-negative:
    /// negative amounts are accepted only while the balance remains `>= 0`,
    /// otherwise [`UserError::Validation`] is returned and nothing changes.
    #[instrument(fields(user_id = ?self.id), skip(self))]
    pub fn increase_balance(&mut self, amount: f64) -> Result<()> {
        self.require_id()?;
        self.apply_balance(self.balance + amount)
    }

    /// Subtracts `amount` from the balance.
    ///
    /// The resulting balance is checked before anything changes, so a
    /// rejected withdrawal leaves the record as it was.
    #[instrument(fields(user_id = ?self.id), skip(self))]
    pub fn decrease_balance(&mut self, amount: f64) -> Result<()> {
        self.require_id()?;
        self.apply_balance(self.balance - amount)
    }

    /// Assigned id, or `None` before `create`/`load`.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// In-memory name; empty for a fresh record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// In-memory balance; `0.0` for a fresh record.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Whether the record has an id and a backing file.
    pub fn is_initialized(&self) -> bool {
        self.id.is_some()
    }

    /// Renames the user in memory. Works on uninitialized records too;
    /// call [`UserRecord::save`] to persist.
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.name = name.to_string();
        Ok(())
    }

    fn require_id(&self) -> Result<u32> {
        self.id.ok_or_else(|| {
            warn!("Operation on uninitialized user record");
            UserError::Uninitialized
        })
    }

    fn apply_balance(&mut self, new_balance: f64) -> Result<()> {
        if let Err(e) = validate_balance(new_balance) {
            warn!(balance = self.balance, rejected = new_balance, "Balance change rejected");
            return Err(e);
        }
        debug!(old = self.balance, new = new_balance, "Balance updated");
        self.balance = new_balance;
        Ok(())
    }
}
