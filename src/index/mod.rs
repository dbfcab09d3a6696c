pub mod document;
pub mod corpus;
pub mod statistics;
pub mod snapshot;
