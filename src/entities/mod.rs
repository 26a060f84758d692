pub mod sea_orm_active_enums;

pub mod assignment;
pub mod assignment_mentee;
pub mod feedback;
pub mod invitation_code;
pub mod meeting;
pub mod mentee_data;
pub mod message;
pub mod points_log;
pub mod profile;
pub mod progress_record;
pub mod scheduled_meeting;
pub mod submission;
