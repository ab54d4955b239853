pub mod enquiries;
pub mod invoices;
pub mod leads;
pub mod meetings;
pub mod notifications;
pub mod planning;
pub mod projects;
pub mod quotations;
pub mod settings;
pub mod stats;
pub mod support;
pub mod team;
pub mod transactions;
pub mod upload;
pub mod users;
