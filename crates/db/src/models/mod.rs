pub mod enquiry;
pub mod invoice;
pub mod lead;
pub mod meeting_request;
pub mod notification;
pub mod planning_note;
pub mod project;
pub mod quotation;
pub mod support_request;
pub mod system_setting;
pub mod team_member;
pub mod transaction;
pub mod user;
