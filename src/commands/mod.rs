pub mod changes;
pub mod check;
pub mod entities;
pub mod extract;
pub mod status;
