pub mod analyses;
pub mod host;
pub mod socket;
pub mod storage;
