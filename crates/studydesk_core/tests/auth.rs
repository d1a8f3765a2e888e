use studydesk_core::model::user::StoredUser;
use studydesk_core::store::{Collection, RecordStore};
use studydesk_core::{
    AuthError, KvAuthRepository, MemoryKeyValueStore, PasswordPolicy, Role, SystemClock,
};

#[test]
fn register_opens_session_without_password() {
    let store = MemoryKeyValueStore::new();
    let auth = KvAuthRepository::new(&store);

    let user = auth
        .register("sam@uni.edu", "secret", "Sam", Role::User)
        .unwrap();
    assert_eq!(user.email, "sam@uni.edu");
    assert_eq!(user.role, Role::User);
    assert!(!user.id.is_empty());
    assert_eq!(auth.current_user().unwrap(), Some(user));
    assert!(auth.is_authenticated().unwrap());
}

#[test]
fn duplicate_email_is_rejected_and_stored_user_untouched() {
    let store = MemoryKeyValueStore::new();
    let auth = KvAuthRepository::new(&store);
    auth.register("sam@uni.edu", "secret", "Sam", Role::User)
        .unwrap();
    let before = RecordStore::new(&store)
        .read::<StoredUser>(Collection::Users)
        .unwrap();

    let err = auth
        .register("sam@uni.edu", "other", "Impostor", Role::Admin)
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail(ref email) if email == "sam@uni.edu"));

    let after = RecordStore::new(&store)
        .read::<StoredUser>(Collection::Users)
        .unwrap();
    assert_eq!(after, before);
    assert_eq!(after[0].name, "Sam");
}

#[test]
fn login_requires_exact_email_and_password() {
    let store = MemoryKeyValueStore::new();
    let auth = KvAuthRepository::new(&store);
    let registered = auth
        .register("sam@uni.edu", "secret", "Sam", Role::User)
        .unwrap();
    auth.logout().unwrap();

    assert!(matches!(
        auth.login("sam@uni.edu", "Secret"),
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.login("SAM@uni.edu", "secret"),
        Err(AuthError::InvalidCredentials)
    ));
    assert_eq!(auth.current_user().unwrap(), None);

    let user = auth.login("sam@uni.edu", "secret").unwrap();
    assert_eq!(user, registered);
    assert_eq!(auth.current_user().unwrap(), Some(user));
}

#[test]
fn logout_keeps_the_account() {
    let store = MemoryKeyValueStore::new();
    let auth = KvAuthRepository::new(&store);
    auth.register("sam@uni.edu", "secret", "Sam", Role::User)
        .unwrap();

    auth.logout().unwrap();
    auth.logout().unwrap();

    assert!(!auth.is_authenticated().unwrap());
    assert_eq!(auth.list_users().unwrap().len(), 1);
}

struct ReversedPasswords;

impl PasswordPolicy for ReversedPasswords {
    fn seal(&self, password: &str) -> String {
        password.chars().rev().collect()
    }

    fn verify(&self, stored: &str, candidate: &str) -> bool {
        self.seal(candidate) == stored
    }
}

#[test]
fn password_policy_is_the_only_comparison_point() {
    let store = MemoryKeyValueStore::new();
    let auth = KvAuthRepository::with_parts(&store, ReversedPasswords, SystemClock);
    auth.register("kim@uni.edu", "abc", "Kim", Role::User)
        .unwrap();

    let stored = RecordStore::new(&store)
        .read::<StoredUser>(Collection::Users)
        .unwrap();
    assert_eq!(stored[0].password, "cba");
    assert!(auth.login("kim@uni.edu", "abc").is_ok());
    assert!(auth.login("kim@uni.edu", "cba").is_err());
}
