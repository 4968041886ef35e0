mod user;


pub use user::{Address, User};
