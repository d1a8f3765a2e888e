/// Single seam for password storage and comparison.
///
/// Call sites only ever `seal` on registration and `verify` on login, so a
/// salted-hash policy can replace `PlaintextPasswords` without touching them.
pub trait PasswordPolicy {
    /// Turns a raw password into its stored form.
    fn seal(&self, password: &str) -> String;
    /// Checks a login attempt against a stored form.
    fn verify(&self, stored: &str, candidate: &str) -> bool;
}

/// Stores passwords as given and compares with plain string equality.
///
/// Not a security boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextPasswords;

impl PasswordPolicy for PlaintextPasswords {
    fn seal(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, stored: &str, candidate: &str) -> bool {
        stored == candidate
    }
}
