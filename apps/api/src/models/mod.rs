pub mod achievement;
pub mod requirements;
pub mod tailored;
