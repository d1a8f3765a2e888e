use crate::auth::{AuthError, AuthResult, PasswordPolicy, PlaintextPasswords};
use crate::clock::{next_id, Clock, SystemClock};
use crate::model::user::{Role, StoredUser, User};
use crate::store::{Collection, KeyValueStore, RecordStore, SESSION_KEY};
use log::{info, warn};

/// Auth repository over the `users` collection and the `currentUser` slot.
pub struct KvAuthRepository<
    S: KeyValueStore,
    P: PasswordPolicy = PlaintextPasswords,
    C: Clock = SystemClock,
> {
    records: RecordStore<S>,
    passwords: P,
    clock: C,
}

impl<S: KeyValueStore> KvAuthRepository<S> {
    pub fn new(backend: S) -> Self {
        Self::with_parts(backend, PlaintextPasswords, SystemClock)
    }
}

impl<S: KeyValueStore, P: PasswordPolicy, C: Clock> KvAuthRepository<S, P, C> {
    pub fn with_parts(backend: S, passwords: P, clock: C) -> Self {
        Self {
            records: RecordStore::new(backend),
            passwords,
            clock,
        }
    }

    /// Creates an account and opens a session for it.
    ///
    /// # Errors
    /// - `DuplicateEmail` when the email is taken; stored users stay untouched.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> AuthResult<User> {
        let mut users = self.records.read::<StoredUser>(Collection::Users)?;
        if users.iter().any(|user| user.email == email) {
            warn!("event=auth_register module=auth status=error error_code=duplicate_email");
            return Err(AuthError::DuplicateEmail(email.to_string()));
        }

        let stored = StoredUser {
            id: next_id(&self.clock),
            email: email.to_string(),
            password: self.passwords.seal(password),
            name: name.to_string(),
            role,
        };
        let user = stored.view();
        users.push(stored);
        self.records.write(Collection::Users, &users)?;
        self.open_session(&user)?;

        info!(
            "event=auth_register module=auth status=ok user_id={} role={}",
            user.id,
            user.role.as_str()
        );
        Ok(user)
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    /// - `InvalidCredentials` when no account matches; the session is left as is.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let users = self.records.read::<StoredUser>(Collection::Users)?;
        let Some(stored) = users
            .iter()
            .find(|user| user.email == email && self.passwords.verify(&user.password, password))
        else {
            warn!("event=auth_login module=auth status=error error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let user = stored.view();
        self.open_session(&user)?;
        info!("event=auth_login module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Clears the session pointer.
    pub fn logout(&self) -> AuthResult<()> {
        self.records.remove_value(SESSION_KEY)?;
        info!("event=auth_logout module=auth status=ok");
        Ok(())
    }

    /// Returns the user of the active session, if any.
    pub fn current_user(&self) -> AuthResult<Option<User>> {
        Ok(self.records.read_value::<User>(SESSION_KEY)?)
    }

    pub fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.records.backend().get(SESSION_KEY)?.is_some())
    }

    /// Lists every account as password-stripped views.
    pub fn list_users(&self) -> AuthResult<Vec<User>> {
        let users = self.records.read::<StoredUser>(Collection::Users)?;
        Ok(users.iter().map(StoredUser::view).collect())
    }

    fn open_session(&self, user: &User) -> AuthResult<()> {
        self.records.write_value(SESSION_KEY, user)?;
        Ok(())
    }
}
