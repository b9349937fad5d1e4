mod common;
mod report;
mod session;
