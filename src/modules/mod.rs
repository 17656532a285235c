pub mod billing;
pub mod h2h;
