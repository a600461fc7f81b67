//! HTTP handlers, grouped by route family.

pub mod interacoes;
pub mod system;
