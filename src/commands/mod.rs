pub mod inspect;
pub mod prepare;
