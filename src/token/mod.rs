mod cached;
mod exchange;
mod manager;
mod policy;

pub use cached::CachedToken;
pub use exchange::{CredentialExchanger, IamTokenExchanger};
pub use manager::{RefreshMode, TokenManager};
pub use policy::TokenLifetimePolicy;
