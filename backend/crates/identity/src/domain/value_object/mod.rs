//! Value Object Module

pub mod email;
pub mod id_token;
pub mod uid;
