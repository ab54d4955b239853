pub mod email;
pub mod enquiries;
pub mod invoices;
pub mod meetings;
pub mod notification;
pub mod projects;
pub mod stats;
pub mod storage;
pub mod support;
pub mod users;
