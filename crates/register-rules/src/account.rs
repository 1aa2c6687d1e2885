//! Username and email rules, mirroring the server-side registration form.

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 80;
pub const EMAIL_MAX_LENGTH: usize = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountIssue {
    UsernameLength,
    InvalidEmail,
    EmailTooLong,
}

impl std::fmt::Display for AccountIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountIssue::UsernameLength => write!(
                f,
                "Username must be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters"
            ),
            AccountIssue::InvalidEmail => write!(f, "Please enter a valid email address"),
            AccountIssue::EmailTooLong => {
                write!(f, "Email cannot exceed {EMAIL_MAX_LENGTH} characters")
            }
        }
    }
}

impl std::error::Error for AccountIssue {}

pub fn check_username(username: &str) -> Result<(), AccountIssue> {
    let length = username.trim().chars().count();
    if (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(AccountIssue::UsernameLength)
    }
}

pub fn check_email(email: &str) -> Result<(), AccountIssue> {
    let email = email.trim();
    if !is_email_shaped(email) {
        return Err(AccountIssue::InvalidEmail);
    }
    if email.chars().count() > EMAIL_MAX_LENGTH {
        return Err(AccountIssue::EmailTooLong);
    }
    Ok(())
}

fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1 && !domain.starts_with('.'),
        None => false,
    }
}
