pub mod doctor;
pub mod import;
pub mod inspect;
pub mod stats;
