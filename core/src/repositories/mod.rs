pub mod credential;

pub use credential::CredentialRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockCredentialRepository;
