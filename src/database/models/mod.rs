pub mod account;
pub mod booth;

pub use account::{Account, AccountPatch, Role, CREATION_EDGES};
pub use booth::{Booth, BoothPatch};
